use robot_payback::compute::init_state;
use robot_payback::config::GameConfig;
use robot_payback::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Behavior::Chase, Behavior::Chase);
    assert_ne!(Behavior::Chase, Behavior::Wander);
    assert_eq!(Screen::Running, Screen::Running);
    assert_ne!(Screen::Intro, Screen::Mechanics);
    assert_ne!(Screen::Running, Screen::GameOver);

    let door = Door { x: 0, y: 40, spawned_at_ms: 10 };
    assert_eq!(door.clone(), door);
}

#[test]
fn game_state_clone_is_independent() {
    let mut original = init_state(&GameConfig::default(), 0);
    original.screen = Screen::Running;
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.score = 999;
    cloned.monsters.push(Monster {
        x: 5,
        y: 5,
        speed: 2,
        behavior: Behavior::Wander,
        dx: 2,
        dy: -2,
    });
    cloned.rules.has_scoring = false;

    assert_eq!(original.player.x, 520);
    assert_eq!(original.score, 0);
    assert!(original.monsters.is_empty());
    assert!(original.rules.has_scoring);
}

#[test]
fn rect_contains_is_half_open() {
    let r = Rect { x: 10, y: 20, w: 5, h: 3 };
    assert!(r.contains(10, 20));
    assert!(r.contains(14, 22));
    assert!(!r.contains(15, 20));
    assert!(!r.contains(10, 23));
    assert!(!r.contains(9, 21));
    assert!(!r.contains(12, 19));
}

#[test]
fn tick_input_default_is_idle() {
    let input = TickInput::default();
    assert!(!input.left && !input.right && !input.up && !input.down);
    assert!(!input.aim_ccw && !input.aim_cw && !input.fire);
}
