use robot_payback::collision::*;

#[test]
fn overlap_is_inclusive_at_tolerance() {
    assert!(overlaps((0.0, 0.0), (20.0, 20.0), HIT_TOLERANCE));
    assert!(overlaps((0.0, 0.0), (-20.0, 20.0), HIT_TOLERANCE));
    assert!(overlaps((5.5, 5.5), (5.5, 5.5), HIT_TOLERANCE));
}

#[test]
fn overlap_fails_when_either_axis_is_out() {
    assert!(!overlaps((0.0, 0.0), (21.0, 0.0), HIT_TOLERANCE));
    assert!(!overlaps((0.0, 0.0), (0.0, -21.0), HIT_TOLERANCE));
    assert!(!overlaps((0.0, 0.0), (20.5, 20.5), HIT_TOLERANCE));
}

#[test]
fn overlap_is_symmetric() {
    let a = (100.0, 40.0);
    let b = (117.0, 59.0);
    assert_eq!(overlaps(a, b, HIT_TOLERANCE), overlaps(b, a, HIT_TOLERANCE));
}

#[test]
fn overlap_is_a_square_not_a_circle() {
    // Corner of the window: ~28 px away but still a hit
    assert!(overlaps((0.0, 0.0), (20.0, 20.0), 20.0));
}

#[test]
fn first_overlap_returns_first_match_in_order() {
    let candidates = vec![(500.0, 500.0), (10.0, 10.0), (0.0, 0.0)];
    assert_eq!(first_overlap((0.0, 0.0), candidates, HIT_TOLERANCE), Some(1));
}

#[test]
fn first_overlap_none_when_nothing_close() {
    let candidates = vec![(500.0, 500.0), (30.0, 0.0)];
    assert_eq!(first_overlap((0.0, 0.0), candidates, HIT_TOLERANCE), None);
    assert_eq!(first_overlap((0.0, 0.0), Vec::new(), HIT_TOLERANCE), None);
}
