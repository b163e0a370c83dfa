use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;
use bevy_rapier2d::rapier::prelude::CollisionEventFlags;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fruit_drop::core::catalog::{kind_of, FRUITS, WINNING_RANK};
use fruit_drop::core::components::{Boundary, Fruit, FruitRadius};
use fruit_drop::core::config::GameConfig;
use fruit_drop::core::session::GameSession;
use fruit_drop::gameplay::drop::{drop_on_release, DropCooldown, PointerWorld};
use fruit_drop::gameplay::game_over::{monitor_danger_line, DangerState};
use fruit_drop::gameplay::merge::resolve_merges;
use fruit_drop::gameplay::restart::{apply_restart, RestartRequested};
use fruit_drop::physics::spawn_arena;
use fruit_drop::rendering::assets::FruitAssets;

fn test_session() -> GameSession {
    GameSession::new(&mut StdRng::seed_from_u64(7), 4)
}

fn spawn_ranked(app: &mut App, rank: usize, pos: Vec2) -> Entity {
    let radius = kind_of(rank).expect("catalog rank").radius;
    app.world_mut()
        .spawn((
            Fruit { rank },
            FruitRadius(radius),
            Transform::from_xyz(pos.x, pos.y, 0.0),
            GlobalTransform::default(),
        ))
        .id()
}

fn collide(app: &mut App, a: Entity, b: Entity) {
    app.world_mut()
        .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
}

fn fruit_ranks(app: &mut App) -> Vec<usize> {
    let world = app.world_mut();
    let mut ranks: Vec<usize> = world
        .query::<&Fruit>()
        .iter(world)
        .map(|fruit| fruit.rank)
        .collect();
    ranks.sort_unstable();
    ranks
}

fn score(app: &App) -> u32 {
    app.world().resource::<GameSession>().score
}

mod merging {
    use super::*;

    fn merge_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(FruitAssets::placeholder());
        app.insert_resource(test_session());
        app.add_event::<CollisionEvent>();
        app.add_systems(Update, resolve_merges);
        app
    }

    #[test]
    fn equal_rank_pair_becomes_one_successor() {
        let mut app = merge_app();
        let a = spawn_ranked(&mut app, 0, Vec2::new(-10.0, 0.0));
        let b = spawn_ranked(&mut app, 0, Vec2::new(10.0, 0.0));
        collide(&mut app, a, b);
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![1]);
        assert_eq!(score(&app), FRUITS[1].score);

        // The successor sits at the pair's midpoint.
        let world = app.world_mut();
        let (fruit, tf) = world
            .query::<(&Fruit, &Transform)>()
            .single(world)
            .expect("one fruit");
        assert_eq!(fruit.rank, 1);
        assert_eq!(tf.translation.truncate(), Vec2::ZERO);
    }

    #[test]
    fn mismatched_ranks_keep_both_bodies() {
        let mut app = merge_app();
        let a = spawn_ranked(&mut app, 0, Vec2::new(-10.0, 0.0));
        let b = spawn_ranked(&mut app, 3, Vec2::new(10.0, 0.0));
        collide(&mut app, a, b);
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![0, 3]);
        assert_eq!(score(&app), 0);
    }

    #[test]
    fn watermelons_never_merge() {
        let mut app = merge_app();
        let a = spawn_ranked(&mut app, WINNING_RANK, Vec2::new(-10.0, 0.0));
        let b = spawn_ranked(&mut app, WINNING_RANK, Vec2::new(10.0, 0.0));
        collide(&mut app, a, b);
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![WINNING_RANK, WINNING_RANK]);
        assert_eq!(score(&app), 0);
        assert!(!app.world().resource::<GameSession>().game_won);
    }

    #[test]
    fn first_watermelon_wins_the_run() {
        let mut app = merge_app();
        let a = spawn_ranked(&mut app, WINNING_RANK - 1, Vec2::new(-10.0, 0.0));
        let b = spawn_ranked(&mut app, WINNING_RANK - 1, Vec2::new(10.0, 0.0));
        collide(&mut app, a, b);
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![WINNING_RANK]);
        assert_eq!(score(&app), FRUITS[WINNING_RANK].score);
        assert!(app.world().resource::<GameSession>().game_won);
    }

    #[test]
    fn body_reported_twice_merges_once() {
        let mut app = merge_app();
        let a = spawn_ranked(&mut app, 0, Vec2::new(-20.0, 0.0));
        let b = spawn_ranked(&mut app, 0, Vec2::new(0.0, 0.0));
        let c = spawn_ranked(&mut app, 0, Vec2::new(20.0, 0.0));
        collide(&mut app, a, b);
        collide(&mut app, b, c);
        app.update();

        // b was consumed by the first pair, so c survives untouched.
        assert_eq!(fruit_ranks(&mut app), vec![0, 1]);
        assert_eq!(score(&app), FRUITS[1].score);
    }

    #[test]
    fn merges_at_disjoint_times_accumulate_score() {
        let mut app = merge_app();
        let a = spawn_ranked(&mut app, 0, Vec2::new(-10.0, 0.0));
        let b = spawn_ranked(&mut app, 0, Vec2::new(10.0, 0.0));
        collide(&mut app, a, b);
        app.update();
        assert_eq!(score(&app), FRUITS[1].score);

        let c = spawn_ranked(&mut app, 0, Vec2::new(-50.0, 0.0));
        let d = spawn_ranked(&mut app, 0, Vec2::new(-30.0, 0.0));
        collide(&mut app, c, d);
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![1, 1]);
        assert_eq!(score(&app), 2 * FRUITS[1].score);
        assert!(!app.world().resource::<GameSession>().game_won);
    }

    #[test]
    fn no_merges_after_game_over() {
        let mut app = merge_app();
        app.world_mut().resource_mut::<GameSession>().game_over = true;
        let a = spawn_ranked(&mut app, 0, Vec2::new(-10.0, 0.0));
        let b = spawn_ranked(&mut app, 0, Vec2::new(10.0, 0.0));
        collide(&mut app, a, b);
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![0, 0]);
        assert_eq!(score(&app), 0);
    }
}

mod dropping {
    use super::*;

    fn drop_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(FruitAssets::placeholder());
        app.insert_resource(test_session());
        app.init_resource::<DropCooldown>();
        app.init_resource::<Touches>();
        app.init_resource::<ButtonInput<MouseButton>>();
        app.insert_resource(PointerWorld { x: Some(500.0) });
        app.add_systems(Update, drop_on_release);
        app
    }

    fn release_pointer(app: &mut App) {
        let mut buttons = app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>();
        buttons.press(MouseButton::Left);
        buttons.release(MouseButton::Left);
    }

    #[test]
    fn release_drops_one_clamped_body() {
        let mut app = drop_app();
        let session = app.world().resource::<GameSession>().clone();
        let expected_rank = session.current_rank;
        let queued = session.next_rank;

        release_pointer(&mut app);
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![expected_rank]);
        let cfg = app.world().resource::<GameConfig>().clone();
        let radius = kind_of(expected_rank).expect("catalog rank").radius;
        let world = app.world_mut();
        let tf = world
            .query_filtered::<&Transform, With<Fruit>>()
            .single(world)
            .expect("one fruit");
        // Pointer x=500 lies far outside the 400-wide world and gets clamped.
        assert_eq!(tf.translation.x, cfg.world.half_width() - radius);
        assert_eq!(tf.translation.y, cfg.world.spawn_y());

        let session = app.world().resource::<GameSession>();
        assert!(session.drop_locked);
        assert_eq!(session.current_rank, queued);
        assert!(app.world().resource::<DropCooldown>().is_armed());
    }

    #[test]
    fn locked_drop_is_ignored() {
        let mut app = drop_app();
        app.world_mut().resource_mut::<GameSession>().drop_locked = true;
        let before = app.world().resource::<GameSession>().clone();

        release_pointer(&mut app);
        app.update();

        assert!(fruit_ranks(&mut app).is_empty());
        assert_eq!(*app.world().resource::<GameSession>(), before);
    }

    #[test]
    fn no_drops_after_the_run_ends() {
        let mut app = drop_app();
        app.world_mut().resource_mut::<GameSession>().game_won = true;
        release_pointer(&mut app);
        app.update();
        assert!(fruit_ranks(&mut app).is_empty());
    }

    #[test]
    fn touch_release_drops_like_a_click() {
        // Real input plumbing: TouchInput events go through Bevy's touch
        // system, so the ended touch only shows up as just-released.
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin));
        app.insert_resource(GameConfig::default());
        app.insert_resource(FruitAssets::placeholder());
        app.insert_resource(test_session());
        app.init_resource::<DropCooldown>();
        app.insert_resource(PointerWorld { x: Some(40.0) });
        app.add_systems(Update, drop_on_release);
        let window = app.world_mut().spawn_empty().id();
        let touch = |phase| TouchInput {
            phase,
            position: Vec2::new(220.0, 40.0),
            window,
            force: None,
            id: 3,
        };

        app.world_mut().send_event(touch(TouchPhase::Started));
        app.update();
        assert!(fruit_ranks(&mut app).is_empty(), "a held touch must not drop");

        app.world_mut().send_event(touch(TouchPhase::Ended));
        app.update();

        assert_eq!(fruit_ranks(&mut app).len(), 1);
        let world = app.world_mut();
        let tf = world
            .query_filtered::<&Transform, With<Fruit>>()
            .single(world)
            .expect("one fruit");
        assert_eq!(tf.translation.x, 40.0);
        assert!(app.world().resource::<GameSession>().drop_locked);
    }
}

mod monitoring {
    use super::*;

    fn monitor_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut cfg = GameConfig::default();
        // Zero grace: a sustained violation ends the run on the second tick.
        cfg.game_over.grace_secs = 0.0;
        app.insert_resource(cfg);
        app.insert_resource(test_session());
        app.init_resource::<DangerState>();
        app.add_systems(Update, monitor_danger_line);
        app
    }

    #[test]
    fn top_edge_over_the_line_ends_the_run() {
        let mut app = monitor_app();
        // Danger line at y=290 (350 - 60). A rank-4 fruit (r=60) at y=235
        // pokes 5 units over the line while its center stays well below.
        spawn_ranked(&mut app, 4, Vec2::new(0.0, 235.0));
        app.update(); // arms the deadline
        app.update(); // deadline elapsed
        assert!(app.world().resource::<GameSession>().game_over);
        assert_eq!(*app.world().resource::<DangerState>(), DangerState::Over);
    }

    #[test]
    fn top_edge_touching_the_line_is_no_violation() {
        let mut app = monitor_app();
        // y + radius == danger_line_y exactly (230 + 60 == 290).
        spawn_ranked(&mut app, 4, Vec2::new(0.0, 230.0));
        for _ in 0..5 {
            app.update();
        }
        assert!(!app.world().resource::<GameSession>().game_over);
        assert_eq!(*app.world().resource::<DangerState>(), DangerState::Clear);
    }

    #[test]
    fn fruit_below_the_line_keeps_the_run_alive() {
        let mut app = monitor_app();
        spawn_ranked(&mut app, 0, Vec2::new(0.0, -300.0));
        for _ in 0..5 {
            app.update();
        }
        assert!(!app.world().resource::<GameSession>().game_over);
    }
}

mod restarting {
    use super::*;

    fn restart_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(test_session());
        app.insert_resource(DangerState::Over);
        app.init_resource::<DropCooldown>();
        app.add_event::<RestartRequested>();
        app.add_systems(Startup, spawn_arena);
        app.add_systems(Update, apply_restart);
        app
    }

    fn boundary_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world
            .query_filtered::<(), With<Boundary>>()
            .iter(world)
            .count()
    }

    #[test]
    fn restart_clears_fruits_and_run_state() {
        let mut app = restart_app();
        spawn_ranked(&mut app, 0, Vec2::new(0.0, 0.0));
        spawn_ranked(&mut app, 4, Vec2::new(40.0, 0.0));
        {
            let mut session = app.world_mut().resource_mut::<GameSession>();
            session.score = 480;
            session.game_over = true;
            session.drop_locked = true;
        }
        app.world_mut()
            .resource_mut::<DropCooldown>()
            .arm(10.0);

        app.world_mut().send_event(RestartRequested);
        app.update();

        assert!(fruit_ranks(&mut app).is_empty());
        let session = app.world().resource::<GameSession>();
        assert_eq!(session.score, 0);
        assert!(!session.game_over);
        assert!(!session.game_won);
        assert!(session.can_drop());
        assert_eq!(*app.world().resource::<DangerState>(), DangerState::Clear);
        assert!(!app.world().resource::<DropCooldown>().is_armed());
        // Floor, two walls and the danger line survive the reset.
        assert_eq!(boundary_count(&mut app), 4);
    }

    #[test]
    fn no_request_means_no_reset() {
        let mut app = restart_app();
        spawn_ranked(&mut app, 2, Vec2::new(0.0, 0.0));
        app.world_mut().resource_mut::<GameSession>().score = 60;
        app.update();

        assert_eq!(fruit_ranks(&mut app), vec![2]);
        assert_eq!(score(&app), 60);
        assert_eq!(*app.world().resource::<DangerState>(), DangerState::Over);
    }
}
