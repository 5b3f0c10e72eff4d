//! Coarse hit detection shared by every entity pair.
//!
//! Both points are the top-left corners of their sprites, not the centres:
//! only a hit near the "head" counts.  The window is the same whatever the
//! real sprite sizes are.

/// Half-width of the hit window on each axis, in field pixels.
pub const HIT_TOLERANCE: f32 = 20.0;

/// True when `a` and `b` are within `tolerance` of each other on both axes.
pub fn overlaps(a: (f32, f32), b: (f32, f32), tolerance: f32) -> bool {
    (a.0 - b.0).abs() <= tolerance && (a.1 - b.1).abs() <= tolerance
}

/// Index of the first candidate overlapping `point`, in iteration order.
pub fn first_overlap<I>(point: (f32, f32), candidates: I, tolerance: f32) -> Option<usize>
where
    I: IntoIterator<Item = (f32, f32)>,
{
    candidates
        .into_iter()
        .position(|c| overlaps(point, c, tolerance))
}
