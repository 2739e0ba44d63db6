use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::util::SokobanError;

/// Settings of a game session. Every field may be omitted from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum time between two moves played automatically.
    pub autoplay_interval_ms: u64,

    /// The level to start with, counting from 1.
    pub start_level: usize,

    /// Use colours when printing the board.
    pub colour: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            autoplay_interval_ms: 150,
            start_level: 1,
            colour: true,
        }
    }
}

impl Config {
    /// Read settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, SokobanError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;
        info!("Loaded configuration from {}", path.display());
        config.validated()
    }

    pub fn from_json(s: &str) -> Result<Config, SokobanError> {
        let config: Config = serde_json::from_str(s)?;
        config.validated()
    }

    fn validated(self) -> Result<Config, SokobanError> {
        if self.start_level == 0 {
            return Err(SokobanError::Config(
                "start_level counts from 1".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.autoplay_interval(), Duration::from_millis(150));
        assert_eq!(config.start_level, 1);
        assert!(config.colour);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = Config::from_json(r#"{ "start_level": 3 }"#).unwrap();
        assert_eq!(config.start_level, 3);
        assert_eq!(config.autoplay_interval_ms, 150);
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn invalid_input() {
        assert!(matches!(
            Config::from_json("{ start_level: 3 }"),
            Err(SokobanError::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "start_level": 0 }"#),
            Err(SokobanError::Config(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/sokoban.json"),
            Err(SokobanError::Io(_))
        ));
    }
}
