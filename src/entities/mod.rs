mod bounds;
mod enemy;
mod game_state;
mod player;
mod projectile;

// Re-export all public types
pub use bounds::Bounds;
pub use enemy::{Enemy, Side};
pub use game_state::GameState;
pub use player::{Movement, Player};
pub use projectile::Projectile;
