/// Integration tests for game logic
///
/// These tests drive a whole session through the public API: starting,
/// firing, collisions, scoring and the high-score table at game over.
use banshee::{
    Bounds, Enemy, GameConfig, GameOver, GameState, Movement, Projectile, ScoreBoard, ScoreEntry,
    ScoreStore, World,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

fn playing_world() -> World {
    let mut world = World::new(&GameConfig::default());
    assert!(world.start());
    world
}

#[test]
fn test_player_moves_right_by_speed() {
    let mut world = playing_world();
    world.player.x = 100.0;
    world.player.y = 100.0;

    world.step(Movement::RIGHT);

    assert_eq!(world.player.x, 104.0);
    assert_eq!(world.player.y, 100.0);
}

#[test]
fn test_fire_adds_two_opposing_projectiles() {
    let mut world = playing_world();
    world.player.x = 200.0;
    world.player.y = 300.0;

    world.fire();

    assert_eq!(world.projectiles.len(), 2);
    let velocities: Vec<f32> = world.projectiles.iter().map(|p| p.vx).collect();
    assert_eq!(velocities, vec![-6.0, 6.0]);
    assert!(world.projectiles.iter().all(|p| p.y == 300.0 + 64.0));
    assert_eq!(world.projectiles[0].x, 200.0);
    assert_eq!(world.projectiles[1].x, 328.0);
}

#[test]
fn test_projectile_inside_enemy_sinks_it() {
    let enemy = Bounds::new(50.0, 50.0, 64.0, 64.0);
    assert!(enemy.contains_strict(60.0, 70.0));

    let mut world = playing_world();
    world.player.x = 600.0;
    world.player.y = 400.0;
    // One step moves these to the enemy box [50,50,64,64] and the point (60,70)
    world.enemies.push(Enemy::new(48.0, 50.0, 2.0, 64.0));
    world.projectiles.push(Projectile::new(54.0, 70.0, 6.0));

    world.step(Movement::default());

    assert!(world.enemies.is_empty());
    assert!(world.projectiles.is_empty());
    assert_eq!(world.score, 100);
}

#[test]
fn test_last_health_point_ends_game_once() {
    let mut world = playing_world();
    world.health = 1;
    world.score = 400;
    world.enemies.push(Enemy::new(world.player.x, world.player.y, 2.0, 64.0));

    let mut finalized = 0;
    for _ in 0..10 {
        if let Some(over) = world.step(Movement::default()) {
            assert_eq!(over, GameOver { score: 400 });
            finalized += 1;
        }
    }

    assert_eq!(finalized, 1);
    assert_eq!(world.health, 0);
    assert_eq!(world.state(), GameState::GameOver);
}

#[test]
fn test_game_over_ranks_score_and_takes_initials() {
    let dir = TempDir::new().unwrap();
    let store = ScoreStore::new(dir.path().join("wbg_scores.json"));
    let mut board = ScoreBoard::new(store.clone());

    let mut world = playing_world();
    world.health = 1;
    world.score = 900;
    world.enemies.push(Enemy::new(world.player.x, world.player.y, 2.0, 64.0));

    let over = world.step(Movement::default()).expect("game should end");
    board.finalize(over.score).unwrap();
    assert!(board.awaiting_initials());

    for c in "zed!".chars() {
        board.type_initial(c);
    }
    board.submit_initials().unwrap();

    assert_eq!(
        store.load().entries(),
        &[ScoreEntry {
            score: 900,
            initials: "ZED".to_string(),
        }]
    );
}

#[test]
fn test_sessions_keep_table_at_ten() {
    let dir = TempDir::new().unwrap();
    let store = ScoreStore::new(dir.path().join("wbg_scores.json"));

    for session in 0..15u32 {
        let mut board = ScoreBoard::new(store.clone());
        board.finalize(session * 100).unwrap();
        board.submit_initials().unwrap();
    }

    let saved = store.load();
    assert_eq!(saved.entries().len(), 10);
    assert_eq!(saved.entries()[0].score, 1400);
    assert_eq!(saved.entries()[9].score, 500);
}

#[test]
fn test_enemies_spawn_and_sail_across() {
    let mut world = playing_world();
    world.player.y = 0.0;
    let mut rng = StdRng::seed_from_u64(42);
    world.spawn_enemy(&mut rng);
    world.enemies[0].y = 500.0;

    // (800 + 64 + 64) / 2 steps takes the ship fully across the field
    for _ in 0..470 {
        world.step(Movement::default());
    }

    assert!(world.enemies.is_empty());
    assert_eq!(world.enemies_spawned(), 1);
    assert_eq!(world.enemies_removed(), 1);
    assert_eq!(world.health, 10);
    assert_eq!(world.score, 0);
}

#[test]
fn test_launch_screen_ignores_gameplay() {
    let mut world = World::new(&GameConfig::default());
    let start = world.player.clone();
    let mut rng = StdRng::seed_from_u64(1);

    assert!(!world.fire());
    assert!(!world.spawn_enemy(&mut rng));
    assert_eq!(world.step(Movement::RIGHT), None);

    assert_eq!(world.player, start);
    assert_eq!(world.state(), GameState::Launch);
}
