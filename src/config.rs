use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::align::Scoring;
use crate::constants::*;
use crate::error::{Error, Result};

/// Runtime settings for the command-line host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Alignment scores
    pub scoring: Scoring,
    /// Longest sequence accepted for any analysis
    pub max_sequence_length: usize,
    /// SQLite database recording past analyses
    pub history: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            scoring: Scoring::default(),
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            history: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; absent keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_sequence_length == 0 {
            return Err(Error::Settings("max_sequence_length must be positive".to_owned()));
        }
        if self.scoring.match_score <= 0 {
            return Err(Error::Settings(format!(
                "match score must be positive, got {}", self.scoring.match_score)));
        }
        if self.scoring.gap_score >= 0 {
            return Err(Error::Settings(format!(
                "gap score must be negative, got {}", self.scoring.gap_score)));
        }
        Ok(())
    }
}
