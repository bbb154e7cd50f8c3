/// Which screen the game is on; drives what each frame updates and draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Splash screen, waiting for the start key
    #[default]
    Launch,
    Playing,
    GameOver,
}
