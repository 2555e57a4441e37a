use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings, read from an optional JSON file. Missing fields keep
/// their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// File holding the best score as decimal text.
    pub best_score_path: PathBuf,
    /// How long the game-over overlay stays up before a new game starts.
    pub game_over_pause_ms: u64,
    /// Upper bound on how long a frame waits for input.
    pub frame_interval_ms: u64,
    /// Log output. The terminal is owned by the UI, so logs go to a file.
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            best_score_path: PathBuf::from("best_score.txt"),
            game_over_pause_ms: 2000,
            frame_interval_ms: 16,
            log_path: PathBuf::from("2048.log"),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_millis(self.game_over_pause_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
