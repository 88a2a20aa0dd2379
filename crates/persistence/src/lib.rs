#![deny(warnings)]

//! Persistence layer: JSON content catalogs and the score log.
//!
//! Content loading is fatal when it fails (no run may start on a missing or
//! malformed catalog). The score log is the opposite: a finished run must
//! never crash on a save failure, so `ScoreStore` reports errors for the
//! caller to log and move past.

use game_core::{validate_cards, validate_questions, QuizQuestion, ScenarioCard, ScoreRecord};
use std::cmp::Reverse;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Returns the default location of the score log.
pub fn default_score_path() -> &'static str {
    "./saves/scores.json"
}

/// Errors raised while loading a content catalog.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Invalid(#[from] game_core::ValidationError),
}

/// Errors raised by the score log.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Load and validate the scenario-card catalog.
pub fn load_cards<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioCard>, ContentError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .map_err(|e| ContentError::Io(format!("{}: {}", path.display(), e)))?;
    let cards: Vec<ScenarioCard> = serde_json::from_str(&data)
        .map_err(|e| ContentError::Parse(format!("{}: {}", path.display(), e)))?;
    validate_cards(&cards)?;
    info!(count = cards.len(), "loaded scenario cards");
    Ok(cards)
}

/// Load and validate the quiz-question catalog.
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<QuizQuestion>, ContentError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .map_err(|e| ContentError::Io(format!("{}: {}", path.display(), e)))?;
    let questions: Vec<QuizQuestion> = serde_json::from_str(&data)
        .map_err(|e| ContentError::Parse(format!("{}: {}", path.display(), e)))?;
    validate_questions(&questions)?;
    info!(count = questions.len(), "loaded quiz questions");
    Ok(questions)
}

/// Append-only score log backed by a single JSON file.
///
/// `append` is a scoped read-modify-write of the whole list; callers must not
/// interleave two appends, the store holds no lock of its own. A missing file
/// is an empty list, not an error.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a record to the persisted list.
    pub fn append(&self, record: &ScoreRecord) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.push(record.clone());
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }
        fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))?;
        info!(score = record.score, "score appended");
        Ok(())
    }

    /// All records, sorted by score descending; ties keep insertion order.
    pub fn list(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut records = self.load()?;
        records.sort_by_key(|r| Reverse(r.score));
        Ok(records)
    }

    fn load(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        serde_json::from_str(&data).map_err(|e| StoreError::Parse(e.to_string()))
    }
}
