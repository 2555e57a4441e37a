//! Durable best score: a single file holding the value as decimal text.

use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored best score. A missing or unparsable record reads as 0.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match text.trim().parse::<u32>() {
                Ok(best) => {
                    debug!("loaded best score {} from {}", best, self.path.display());
                    best
                }
                Err(e) => {
                    warn!(
                        "ignoring unparsable best score in {}: {}",
                        self.path.display(),
                        e
                    );
                    0
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    /// Overwrites the record with `best`.
    pub fn save(&self, best: u32) -> Result<()> {
        fs::write(&self.path, best.to_string()).map_err(|source| Error::BestScoreWrite {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-process best score plus the store it is persisted to.
#[derive(Clone, Debug)]
pub struct BestScore {
    value: u32,
    store: BestScoreStore,
}

impl BestScore {
    pub fn load(store: BestScoreStore) -> Self {
        let value = store.load();
        Self { value, store }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Records `score` if it beats the current best and persists it.
    /// A failed write is logged and play continues. Returns whether the best
    /// score improved.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        info!("new best score {} (was {})", score, self.value);
        self.value = score;
        if let Err(e) = self.store.save(score) {
            warn!("{}", e);
        }
        true
    }
}
