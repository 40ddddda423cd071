//! Game and engine configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Computer strength, fixed for a whole game
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal move
    Easy,
    /// Full-depth minimax
    #[default]
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Expert => write!(f, "expert"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(EngineError::ParseDifficulty(s.to_string())),
        }
    }
}

/// Who plays the second mark
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    /// Two humans share the board
    Human,
    #[default]
    Computer,
}

/// Search options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Answer the computer's first move from the opening book
    pub use_opening_book: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            use_opening_book: true,
        }
    }
}

/// Per-game session configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub opponent: Opponent,
    pub difficulty: Difficulty,
    /// Shown in the win message when the human wins
    pub player_name: Option<String>,
    /// Seed for the random mover (None = entropy)
    pub seed: Option<u64>,
    pub engine: EngineConfig,
}

impl SessionConfig {
    /// Human vs human
    pub fn two_player() -> Self {
        Self {
            opponent: Opponent::Human,
            ..Default::default()
        }
    }

    /// Human vs computer at the given difficulty
    pub fn vs_computer(difficulty: Difficulty) -> Self {
        Self {
            opponent: Opponent::Computer,
            difficulty,
            ..Default::default()
        }
    }

    /// Set the human player's name; blank names are ignored
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.player_name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.opponent, Opponent::Computer);
        assert_eq!(config.difficulty, Difficulty::Expert);
        assert!(config.engine.use_opening_book);
        assert_eq!(config.player_name, None);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("EXPERT".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert_eq!(
            "hard".parse::<Difficulty>(),
            Err(EngineError::ParseDifficulty("hard".to_string()))
        );
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }

    #[test]
    fn test_blank_player_name_ignored() {
        let config = SessionConfig::two_player().with_player_name("   ");
        assert_eq!(config.player_name, None);
        let config = SessionConfig::two_player().with_player_name(" Sam ");
        assert_eq!(config.player_name.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"difficulty": "easy"}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.opponent, Opponent::Computer);
        assert!(config.engine.use_opening_book);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let config = SessionConfig::vs_computer(Difficulty::Easy)
            .with_player_name("Ada")
            .with_seed(7);
        config.save(&path).unwrap();
        assert_eq!(SessionConfig::load(&path).unwrap(), config);
    }
}
