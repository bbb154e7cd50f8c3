use std::time::{Duration, Instant};

use tracing::debug;

use crate::entities::GameState;

/// Interval clock that decides when the next enemy is due.
///
/// The first firing happens as soon as the spawner is started. Every firing
/// checks the game state: if the game is no longer running the clock disarms
/// itself and stays idle until started again.
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Spawner {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when an enemy should be spawned this frame.
    ///
    /// A late poll fires once and schedules the next firing one interval
    /// after `now`; missed firings are not replayed.
    pub fn poll(&mut self, now: Instant, state: GameState) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        if state != GameState::Playing {
            debug!(?state, "spawner stopped");
            self.next_due = None;
            return false;
        }

        self.next_due = Some(now + self.interval);
        true
    }
}
