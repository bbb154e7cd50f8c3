use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Number of entries kept on the table
pub const MAX_ENTRIES: usize = 10;

/// Length of the initials a player may leave on the table
pub const INITIALS_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Empty until the player has signed the entry
    pub initials: String,
}

impl ScoreEntry {
    pub fn new(score: u32) -> Self {
        Self {
            score,
            initials: String::new(),
        }
    }

    /// Initials as shown on the table; blanks read as `---`
    pub fn display_initials(&self) -> &str {
        if self.initials.is_empty() {
            "---"
        } else {
            &self.initials
        }
    }
}

/// Keeps the letters and digits of a raw entry, uppercased and cut down to
/// [`INITIALS_LEN`] characters
pub fn normalize_initials(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .take(INITIALS_LEN)
        .collect()
}

/// The ranked table, highest score first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Ranks a finished session's score on the table with blank initials.
    ///
    /// Returns the entry's index if it made the top [`MAX_ENTRIES`]. Equal
    /// scores keep their order, so a new score ranks below older ties.
    /// Recording the same score twice ranks it twice.
    pub fn record(&mut self, score: u32) -> Option<usize> {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        let rank = self.entries.partition_point(|e| e.score >= score);
        self.entries.insert(rank, ScoreEntry::new(score));
        self.entries.truncate(MAX_ENTRIES);

        (rank < MAX_ENTRIES).then_some(rank)
    }

    pub fn set_initials(&mut self, index: usize, raw: &str) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.initials = normalize_initials(raw);
        }
    }
}

/// The named score record on disk: a JSON array of [`ScoreEntry`]
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the table. A missing, unreadable or malformed record is an empty
    /// table.
    pub fn load(&self) -> HighScores {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return HighScores::default(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read high scores");
                return HighScores::default();
            }
        };

        match serde_json::from_str::<Vec<ScoreEntry>>(&text) {
            Ok(entries) => HighScores::from_entries(entries),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring malformed high scores");
                HighScores::default()
            }
        }
    }

    /// Overwrites the record with `scores`
    pub fn save(&self, scores: &HighScores) -> Result<()> {
        let json =
            serde_json::to_string(scores.entries()).wrap_err("failed to serialize high scores")?;
        fs::write(&self.path, json)
            .wrap_err_with(|| format!("failed to write {}", self.path.display()))?;
        info!(path = %self.path.display(), entries = scores.entries().len(), "high scores saved");
        Ok(())
    }
}

/// Initials typed so far on the game-over screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialsPrompt {
    buffer: String,
}

impl InitialsPrompt {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Appends a letter or digit; anything else is ignored
    pub fn push(&mut self, c: char) {
        if !c.is_alphanumeric() {
            return;
        }
        let room = INITIALS_LEN.saturating_sub(self.buffer.chars().count());
        self.buffer.extend(c.to_uppercase().take(room));
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }
}

#[derive(Debug, Clone)]
struct PendingEntry {
    index: usize,
    prompt: InitialsPrompt,
}

/// Game-over bookkeeping: ranks the session, waits for initials if the score
/// placed, and writes the table back.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    store: ScoreStore,
    table: HighScores,
    pending: Option<PendingEntry>,
}

impl ScoreBoard {
    pub fn new(store: ScoreStore) -> Self {
        Self {
            store,
            table: HighScores::default(),
            pending: None,
        }
    }

    pub fn table(&self) -> &HighScores {
        &self.table
    }

    /// Initials prompt, open while the session's entry awaits a signature
    pub fn prompt(&self) -> Option<&InitialsPrompt> {
        self.pending.as_ref().map(|p| &p.prompt)
    }

    pub fn awaiting_initials(&self) -> bool {
        self.pending.is_some()
    }

    /// Ranks `score` against the stored table.
    ///
    /// If the score placed, the table is held back until initials are
    /// submitted; otherwise it is written immediately.
    pub fn finalize(&mut self, score: u32) -> Result<()> {
        self.table = self.store.load();
        match self.table.record(score) {
            Some(index) => {
                info!(score, rank = index + 1, "new high score");
                self.pending = Some(PendingEntry {
                    index,
                    prompt: InitialsPrompt::default(),
                });
                Ok(())
            }
            None => self.store.save(&self.table),
        }
    }

    pub fn type_initial(&mut self, c: char) {
        if let Some(pending) = &mut self.pending {
            pending.prompt.push(c);
        }
    }

    pub fn delete_initial(&mut self) {
        if let Some(pending) = &mut self.pending {
            pending.prompt.backspace();
        }
    }

    /// Signs the pending entry with whatever was typed and writes the table
    pub fn submit_initials(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        self.table.set_initials(pending.index, pending.prompt.text());
        self.store.save(&self.table)
    }
}
