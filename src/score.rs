//! Completed-run score persistence.
//!
//! Scores land in a JSON document in the user data directory. Writes are
//! fire-and-forget: a failure is logged and the game never hears about it.

use std::{
    io,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::utils::get_data_dir;

const SCORES_FILE: &str = "scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    /// Unix seconds at which the run finished.
    pub recorded_at: u64,
}

#[derive(Clone)]
pub struct ScoreBook {
    path: PathBuf,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self { path: get_data_dir().join(SCORES_FILE) }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Persists a completed run's score off the game loop. Never blocks and
    /// never fails the caller.
    pub fn record_completed_score(&self, score: u32) {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = append_score(&path, score) {
                log::warn!("failed to record score {score}: {e}");
            } else {
                log::info!("recorded completed score {score}");
            }
        });
    }

    /// Best scores on record, highest first.
    pub fn best_scores(&self, limit: usize) -> Vec<ScoreRecord> {
        let mut records = read_records(&self.path);
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(limit);
        records
    }
}

impl Default for ScoreBook {
    fn default() -> Self {
        Self::new()
    }
}

fn append_score(path: &PathBuf, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut records = read_records(path);
    let recorded_at = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    records.push(ScoreRecord { score, recorded_at });
    let json = serde_json::to_string_pretty(&records).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)?;
    Ok(())
}

fn read_records(path: &PathBuf) -> Vec<ScoreRecord> {
    match std::fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_book(name: &str) -> ScoreBook {
        let path = std::env::temp_dir().join(format!("squawk-test-{}-{}.json", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        ScoreBook::with_path(path)
    }

    #[test]
    fn missing_file_yields_no_scores() {
        let book = temp_book("missing");
        assert!(book.best_scores(5).is_empty());
    }

    #[test]
    fn scores_append_and_sort_descending() {
        let book = temp_book("sort");
        append_score(&book.path, 1).unwrap();
        append_score(&book.path, 3).unwrap();
        append_score(&book.path, 2).unwrap();

        let best = book.best_scores(2);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].score, 3);
        assert_eq!(best[1].score, 2);

        let _ = std::fs::remove_file(&book.path);
    }

    #[test]
    fn corrupt_file_is_treated_as_empty() {
        let book = temp_book("corrupt");
        std::fs::write(&book.path, "not json").unwrap();
        assert!(book.best_scores(5).is_empty());
        let _ = std::fs::remove_file(&book.path);
    }
}
