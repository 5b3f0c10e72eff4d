use proptest::prelude::*;

use robot_payback::compute::*;
use robot_payback::config::GameConfig;
use robot_payback::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn running_state() -> GameState {
    let mut s = init_state(&GameConfig::default(), 0);
    s.screen = Screen::Running;
    s
}

fn to_input(keys: (bool, bool, bool, bool, bool, bool)) -> TickInput {
    TickInput {
        left: keys.0,
        right: keys.1,
        up: keys.2,
        down: keys.3,
        aim_ccw: keys.4,
        aim_cw: keys.5,
        fire: false,
    }
}

proptest! {
    #[test]
    fn player_never_leaves_the_field(
        start_x in 0i32..=1040,
        start_y in 0i32..=680,
        keys in prop::collection::vec(any::<(bool, bool, bool, bool, bool, bool)>(), 0..400),
    ) {
        let s = running_state();
        let mut player = Player { x: start_x, y: start_y, ..s.player.clone() };
        for k in keys {
            player = apply_input(&player, &to_input(k), s.field, s.sprites.player);
            prop_assert!(player.x >= 0 && player.x <= s.field.width - s.sprites.player.w);
            prop_assert!(player.y >= 0 && player.y <= s.field.height - s.sprites.player.h);
        }
    }

    #[test]
    fn door_spawn_respects_cap(
        monsters in 0usize..8,
        doors in 0usize..8,
        limit in 3usize..8,
        seed in any::<u64>(),
    ) {
        prop_assume!(monsters + doors <= limit);
        let mut s = running_state();
        s.monster_limit = limit;
        for i in 0..monsters {
            s.monsters.push(Monster {
                x: 100 + i as i32 * 50,
                y: 100,
                speed: 2,
                behavior: Behavior::Wander,
                dx: 2,
                dy: 2,
            });
        }
        for _ in 0..doors {
            s.doors.push(Door { x: 0, y: 0, spawned_at_ms: 0 });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let s2 = try_spawn_door(&s, 10_000, &mut rng);
        prop_assert!(s2.monsters.len() + s2.doors.len() <= limit);
    }

    #[test]
    fn wanderer_flips_only_axes_on_an_edge(
        x in -3i32..=1043,
        y in -3i32..=683,
        speed in 2i32..=4,
        sx in any::<bool>(),
        sy in any::<bool>(),
    ) {
        let s = running_state();
        let m = Monster {
            x,
            y,
            speed,
            behavior: Behavior::Wander,
            dx: if sx { speed } else { -speed },
            dy: if sy { speed } else { -speed },
        };
        let m2 = step_monster(&m, (0, 0), s.field, s.sprites.monster);
        let x_edge = x <= 0 || x >= s.field.width - s.sprites.monster.w;
        let y_edge = y <= 0 || y >= s.field.height - s.sprites.monster.h;
        prop_assert_eq!(m2.dx, if x_edge { -m.dx } else { m.dx });
        prop_assert_eq!(m2.dy, if y_edge { -m.dy } else { m.dy });
        prop_assert_eq!(m2.x, x + m2.dx);
        prop_assert_eq!(m2.y, y + m2.dy);
    }

    #[test]
    fn ticks_never_panic_and_keep_player_on_field(
        seed in any::<u64>(),
        steps in prop::collection::vec(any::<(bool, bool, bool, bool, bool, bool)>(), 1..200),
        fire_every in 1usize..20,
    ) {
        let mut s = running_state();
        s.rules.monsters_catch_player = false;
        let mut rng = StdRng::seed_from_u64(seed);
        // Big clock jumps so doors open and expire within the run
        for (i, k) in steps.into_iter().enumerate() {
            let input = TickInput { fire: i % fire_every == 0, ..to_input(k) };
            s = tick(&s, &input, i as u64 * 500, &mut rng);
            prop_assert!(s.player.x >= 0 && s.player.x <= 1040);
            prop_assert!(s.player.y >= 0 && s.player.y <= 680);
        }
    }
}
