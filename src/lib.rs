// Library exports for testing
pub use config::GameConfig;
pub use entities::{Bounds, Enemy, GameState, Movement, Player, Projectile, Side};
pub use highscores::{HighScores, ScoreBoard, ScoreEntry, ScoreStore};
pub use world::{GameOver, World};

pub mod app;
pub mod assets;
pub mod config;
pub mod entities;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod spawner;
pub mod world;
