use std::path::PathBuf;
use std::time::Duration;

/// Tunable constants for a game session.
///
/// Distances are in playfield units (the field is 800x600 regardless of the
/// terminal size) and speeds are in units per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub player_size: f32,
    pub player_speed: f32,
    pub projectile_speed: f32,
    pub enemy_size: f32,
    pub enemy_speed: f32,
    /// Score awarded for each enemy sunk by a projectile
    pub hit_bonus: u32,
    pub max_health: u8,
    pub spawn_interval: Duration,
    pub frame_interval: Duration,
    /// Terminals without key release events keep a key held this long after
    /// its last press or repeat
    pub hold_timeout: Duration,
    pub score_path: PathBuf,
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            player_size: 128.0,
            player_speed: 4.0,
            projectile_speed: 6.0,
            enemy_size: 64.0,
            enemy_speed: 2.0,
            hit_bonus: 100,
            max_health: 10,
            spawn_interval: Duration::from_millis(1500),
            frame_interval: Duration::from_millis(16),
            hold_timeout: Duration::from_millis(120),
            score_path: PathBuf::from("wbg_scores.json"),
            asset_dir: PathBuf::from("images"),
        }
    }
}

impl GameConfig {
    /// Same constants, but scores go to `path` instead of the working directory
    pub fn with_score_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.score_path = path.into();
        self
    }
}
