use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Int, UInt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid_size: Int,
    pub episodes: UInt,
    pub max_steps: UInt,
    pub learning_rate: f32,
    pub discount: f32,
    pub epsilon: f32,
    pub epsilon_decay: f32,
    pub epsilon_min: f32,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub brain_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 16,
            episodes: 100,
            max_steps: 30,
            learning_rate: 0.1,
            discount: 0.95,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            epsilon_min: 0.01,
            seed: None,
            brain_file: "q_table.json".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> io::Result<Config> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("episodes = 500\nseed = 42\n").unwrap();
        assert_eq!(config.episodes, 500);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.grid_size, 16);
        assert_eq!(config.learning_rate, 0.1);
    }

    #[test]
    fn test_read_from_file() {
        let config = Config::from_file(Path::new("./gridbot.toml")).expect("Failed to read the file");
        assert_eq!(config.grid_size, 16);
    }
}
