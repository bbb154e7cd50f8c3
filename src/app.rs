use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, backend::Backend};
use std::time::Instant;
use tracing::{error, info};

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::entities::GameState;
use crate::highscores::{ScoreBoard, ScoreStore};
use crate::input::{InputAction, InputManager, InputMode};
use crate::renderer::{GameRenderer, RenderView};
use crate::spawner::Spawner;
use crate::world::{GameOver, World};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    config: GameConfig,
    world: World,
    spawner: Spawner,
    score_board: ScoreBoard,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Builds the app on the launch screen. `reports_key_release` tells the
    /// input layer whether held keys need a timeout.
    pub fn new(config: GameConfig, reports_key_release: bool) -> Self {
        let hold_timeout = (!reports_key_release).then_some(config.hold_timeout);
        let assets = Assets::load(&config.asset_dir);

        Self {
            running: true,
            world: World::new(&config),
            spawner: Spawner::new(config.spawn_interval),
            score_board: ScoreBoard::new(ScoreStore::new(config.score_path.clone())),
            input_manager: InputManager::new(hold_timeout),
            renderer: GameRenderer::new(assets),
            config,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score_board(&self) -> &ScoreBoard {
        &self.score_board
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn input_mode(&self) -> InputMode {
        match self.world.state() {
            GameState::Launch => InputMode::Launch,
            GameState::Playing => InputMode::Playing,
            GameState::GameOver if self.score_board.awaiting_initials() => {
                InputMode::EnteringInitials
            }
            GameState::GameOver => InputMode::GameOver,
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            terminal.draw(|frame| {
                let world = &self.world;
                let view = RenderView {
                    game_state: world.state(),
                    player: &world.player,
                    enemies: &world.enemies,
                    projectiles: &world.projectiles,
                    score: world.score,
                    health: world.health,
                    field_width: self.config.field_width,
                    field_height: self.config.field_height,
                    high_scores: self.score_board.table(),
                    initials: self.score_board.prompt(),
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            let now = Instant::now();
            while let Some(key_event) = self.input_manager.next_key_event()? {
                self.handle_key(key_event, now);
            }
            self.tick(&[], now);

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(self.config.frame_interval);
        }

        self.shutdown();
        Ok(())
    }

    /// Applies one key event under the mode it arrives in, so a key that
    /// changes the screen affects the keys queued behind it
    pub fn handle_key(&mut self, key_event: KeyEvent, now: Instant) {
        let mode = self.input_mode();
        self.input_manager.handle_key_event(key_event, mode, now);
        let actions = self.input_manager.take_actions();
        self.process_actions(&actions, now);
    }

    /// One frame of game logic: actions, then spawning, then the simulation
    /// step
    pub fn tick(&mut self, actions: &[InputAction], now: Instant) {
        self.process_actions(actions, now);

        if self.spawner.poll(now, self.world.state()) {
            self.world.spawn_enemy(&mut rand::rng());
        }

        if self.world.state() == GameState::Playing {
            let movement = self.input_manager.movement(now);
            if let Some(game_over) = self.world.step(movement) {
                self.finalize(game_over);
            }
        }
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction], now: Instant) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Start => {
                    if self.world.start() {
                        self.spawner.start(now);
                    }
                }
                InputAction::Fire => {
                    self.world.fire();
                }
                InputAction::Restart => {
                    if self.world.state() == GameState::GameOver
                        && !self.score_board.awaiting_initials()
                    {
                        info!("restarting");
                        self.world = World::new(&self.config);
                        self.world.start();
                        self.spawner.start(now);
                    }
                }
                InputAction::TypeInitial(c) => self.score_board.type_initial(*c),
                InputAction::DeleteInitial => self.score_board.delete_initial(),
                InputAction::SubmitInitials => {
                    if let Err(err) = self.score_board.submit_initials() {
                        error!(%err, "could not save high scores");
                    }
                }
            }
        }
    }

    fn finalize(&mut self, game_over: GameOver) {
        if let Err(err) = self.score_board.finalize(game_over.score) {
            error!(%err, "could not save high scores");
        }
    }

    /// Saves a high score that is still waiting for initials
    fn shutdown(&mut self) {
        if let Err(err) = self.score_board.submit_initials() {
            error!(%err, "could not save high scores");
        }
    }
}
