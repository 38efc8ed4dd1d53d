//! Named difficulty tiers and the search budgets they map to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CornersError;
use crate::search::iterative_deepening::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub max_depth: u8,
    pub max_time_ms: u64,
}

impl DifficultyConfig {
    pub const fn new(max_depth: u8, max_time_ms: u64) -> Self {
        Self {
            max_depth,
            max_time_ms,
        }
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

impl From<DifficultyConfig> for SearchConfig {
    fn from(config: DifficultyConfig) -> Self {
        SearchConfig {
            max_depth: config.max_depth,
            max_time_ms: Some(config.max_time_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig::new(2, 500),
            Difficulty::Medium => DifficultyConfig::new(4, 1_500),
            Difficulty::Hard => DifficultyConfig::new(6, 3_000),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CornersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s.trim())
            .ok_or_else(|| CornersError::UnknownDifficulty(s.to_owned()))
    }
}
