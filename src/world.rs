use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, Movement, Player, Projectile, Side};

/// Reported by [`World::step`] on the frame health runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
}

/// Everything one session mutates: entities, score, health and state.
///
/// The app owns a single `World` and hands it to the step and the renderer;
/// nothing else holds game state.
#[derive(Debug, Clone)]
pub struct World {
    config: GameConfig,
    state: GameState,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub health: u8,
    enemies_spawned: u64,
    enemies_removed: u64,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
            state: GameState::Launch,
            player: Player::centered(
                config.field_width,
                config.field_height,
                config.player_size,
                config.player_speed,
            ),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            health: config.max_health,
            enemies_spawned: 0,
            enemies_removed: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn enemies_spawned(&self) -> u64 {
        self.enemies_spawned
    }

    pub fn enemies_removed(&self) -> u64 {
        self.enemies_removed
    }

    /// Leaves the launch screen. Returns false if the game already started.
    pub fn start(&mut self) -> bool {
        if self.state != GameState::Launch {
            return false;
        }
        self.state = GameState::Playing;
        info!("game started");
        true
    }

    /// Fires a broadside from the player's ship. Ignored unless playing.
    pub fn fire(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let shots = self.player.fire(self.config.projectile_speed);
        self.projectiles.extend(shots);
        true
    }

    /// Adds one enemy on a random flank at a random height. Ignored unless
    /// playing.
    pub fn spawn_enemy<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.state != GameState::Playing {
            return false;
        }

        let side = if rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        let y = rng.random::<f32>() * (self.config.field_height - self.config.enemy_size);
        let enemy = Enemy::entering_from(
            side,
            y,
            self.config.field_width,
            self.config.enemy_size,
            self.config.enemy_speed,
        );
        debug!(?side, y, "enemy spawned");

        self.enemies.push(enemy);
        self.enemies_spawned += 1;
        true
    }

    /// Advances the session by one frame.
    ///
    /// Returns `Some` exactly once per session: on the frame the last point of
    /// health is lost.
    pub fn step(&mut self, movement: Movement) -> Option<GameOver> {
        if self.state != GameState::Playing {
            return None;
        }

        let field_width = self.config.field_width;
        self.player
            .apply_movement(movement, field_width, self.config.field_height);

        for projectile in &mut self.projectiles {
            projectile.update();
        }
        self.projectiles.retain(|p| !p.is_out_of_bounds(field_width));

        for enemy in &mut self.enemies {
            enemy.update();
        }
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.has_crossed(field_width));
        self.enemies_removed += (before - self.enemies.len()) as u64;

        self.resolve_collisions()
    }

    fn resolve_collisions(&mut self) -> Option<GameOver> {
        let mut sunk = vec![false; self.enemies.len()];
        let mut spent = vec![false; self.projectiles.len()];

        // Enemies outer, projectiles inner: an enemy takes the first live
        // projectile that is inside its hull
        for (e_idx, enemy) in self.enemies.iter().enumerate() {
            let hull = enemy.bounds();
            let hit = self
                .projectiles
                .iter()
                .enumerate()
                .find(|(p_idx, p)| !spent[*p_idx] && hull.contains_strict(p.x, p.y));

            if let Some((p_idx, _)) = hit {
                sunk[e_idx] = true;
                spent[p_idx] = true;
                self.score += self.config.hit_bonus;
            }
        }

        let mut game_over = None;
        let ship = self.player.bounds();
        for (e_idx, enemy) in self.enemies.iter().enumerate() {
            if sunk[e_idx] || !enemy.bounds().overlaps(&ship) {
                continue;
            }

            sunk[e_idx] = true;
            self.health = self.health.saturating_sub(1);
            debug!(health = self.health, "player rammed");

            if self.health == 0 {
                self.state = GameState::GameOver;
                info!(score = self.score, "game over");
                game_over = Some(GameOver { score: self.score });
                break;
            }
        }

        let mut flags = spent.into_iter();
        self.projectiles.retain(|_| !flags.next().unwrap_or(false));

        let before = self.enemies.len();
        let mut flags = sunk.into_iter();
        self.enemies.retain(|_| !flags.next().unwrap_or(false));
        self.enemies_removed += (before - self.enemies.len()) as u64;

        game_over
    }
}
