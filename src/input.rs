use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::entities::Movement;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Start,
    Fire,
    Restart,
    Quit,
    TypeInitial(char),
    DeleteInitial,
    SubmitInitials,
}

/// Keys that act for as long as they are held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldKey {
    Up,
    Down,
    Left,
    Right,
}

impl HeldKey {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(HeldKey::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(HeldKey::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(HeldKey::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(HeldKey::Right),
            _ => None,
        }
    }
}

/// What the keyboard is currently driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Launch,
    Playing,
    /// Game-over screen while the initials prompt is open
    EnteringInitials,
    GameOver,
}

/// Tracks held keys and translates raw key events into game actions
pub struct InputManager {
    held: HashMap<HeldKey, bool>,
    last_seen: HashMap<HeldKey, Instant>,
    /// Set when the terminal never reports key releases
    hold_timeout: Option<Duration>,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    /// `hold_timeout` is `None` when the terminal reports key releases;
    /// otherwise a key counts as released that long after its last press
    pub fn new(hold_timeout: Option<Duration>) -> Self {
        Self {
            held: HashMap::new(),
            last_seen: HashMap::new(),
            hold_timeout,
            oneshot_actions: Vec::new(),
        }
    }

    /// Next pending key event, without blocking. Non-key events are skipped.
    pub fn next_key_event(&mut self) -> color_eyre::Result<Option<KeyEvent>> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                return Ok(Some(key_event));
            }
        }
        Ok(None)
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, mode: InputMode, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => {
                self.handle_key_press(key_event, mode, now);
            }
            KeyEventKind::Repeat => {
                if mode != InputMode::EnteringInitials {
                    self.hold(key_event.code, now);
                }
            }
            KeyEventKind::Release => {
                if let Some(key) = HeldKey::from_code(key_event.code) {
                    self.held.insert(key, false);
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, mode: InputMode, now: Instant) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // Character keys are initials while the prompt is open
        if mode == InputMode::EnteringInitials {
            let action = match key_event.code {
                KeyCode::Enter | KeyCode::Esc => Some(InputAction::SubmitInitials),
                KeyCode::Backspace => Some(InputAction::DeleteInitial),
                KeyCode::Char(c) => Some(InputAction::TypeInitial(c)),
                _ => None,
            };
            self.oneshot_actions.extend(action);
            return;
        }

        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match (mode, key_event.code) {
            (InputMode::Launch, KeyCode::Enter) => {
                self.oneshot_actions.push(InputAction::Start);
            }
            (InputMode::Playing, KeyCode::Char(' ')) => {
                self.oneshot_actions.push(InputAction::Fire);
            }
            (InputMode::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => {
                self.oneshot_actions.push(InputAction::Restart);
            }
            _ => self.hold(key_event.code, now),
        }
    }

    fn hold(&mut self, code: KeyCode, now: Instant) {
        if let Some(key) = HeldKey::from_code(code) {
            self.held.insert(key, true);
            self.last_seen.insert(key, now);
        }
    }

    pub fn is_held(&self, key: HeldKey, now: Instant) -> bool {
        if !self.held.get(&key).copied().unwrap_or(false) {
            return false;
        }
        match (self.hold_timeout, self.last_seen.get(&key)) {
            (Some(timeout), Some(&seen)) => now.saturating_duration_since(seen) < timeout,
            _ => true,
        }
    }

    /// Directions held at `now`
    pub fn movement(&self, now: Instant) -> Movement {
        Movement {
            up: self.is_held(HeldKey::Up, now),
            down: self.is_held(HeldKey::Down, now),
            left: self.is_held(HeldKey::Left, now),
            right: self.is_held(HeldKey::Right, now),
        }
    }

    /// Returns the one-shot actions gathered since the last call
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.oneshot_actions)
    }
}
