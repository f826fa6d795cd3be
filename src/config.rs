//! Engine configuration
//!
//! Every field has a default, so a partial JSON file only overrides what it
//! names:
//!
//! ```json
//! {
//!   "search": { "pruning": false },
//!   "eval": { "trick": 120, "winner": 30 },
//!   "tiers": { "expert": 16 }
//! }
//! ```

use crate::eval::EvalWeights;
use crate::search::{SearchConfig, MAX_PLY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Search depths, in plies, for the minimax difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierDepths {
    pub intermediate: u32,
    pub advanced: u32,
    pub expert: u32,
}

impl Default for TierDepths {
    fn default() -> Self {
        TierDepths {
            intermediate: 4,
            advanced: 8,
            expert: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub search: SearchConfig,
    pub eval: EvalWeights,
    pub tiers: TierDepths,
}

impl PlayConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PlayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PLY).contains(&self.search.max_ply) {
            return Err(ConfigError::Invalid(format!(
                "search.max_ply {} outside 1-{MAX_PLY}",
                self.search.max_ply
            )));
        }
        self.eval.check().map_err(ConfigError::Invalid)?;
        for (name, depth) in [
            ("intermediate", self.tiers.intermediate),
            ("advanced", self.tiers.advanced),
            ("expert", self.tiers.expert),
        ] {
            if depth == 0 || depth > MAX_PLY {
                return Err(ConfigError::Invalid(format!(
                    "tiers.{name} depth {depth} outside 1-{MAX_PLY}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayConfig::default();
        assert!(config.search.pruning);
        assert!(config.search.move_ordering);
        assert_eq!(config.search.max_ply, 52);
        assert!(config.eval.trick > config.eval.winner);
        assert_eq!(config.tiers, TierDepths::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PlayConfig::from_json_str(
            r#"{ "search": { "pruning": false }, "tiers": { "expert": 16 } }"#,
        )
        .unwrap();
        assert!(!config.search.pruning);
        assert!(config.search.move_ordering);
        assert_eq!(config.tiers.expert, 16);
        assert_eq!(config.tiers.advanced, 8);
        assert_eq!(config.eval, EvalWeights::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        for json in [
            r#"{ "eval": { "trick": 10, "winner": 10 } }"#,
            r#"{ "eval": { "winner": -1 } }"#,
            r#"{ "search": { "max_ply": 0 } }"#,
            r#"{ "tiers": { "advanced": 60 } }"#,
        ] {
            assert!(
                matches!(PlayConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{json} should be rejected"
            );
        }
        assert!(matches!(
            PlayConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = PlayConfig::from_path("/nonexistent/bridge-play.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
