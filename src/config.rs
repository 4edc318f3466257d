use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ratatui::style::Color;

use crate::error::{ConfigError, GameError};
use crate::game::{GameState, Player, MIN_DIMENSION};

/// Largest board side the terminal view lays out.
pub const MAX_DIMENSION: usize = 20;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub players: Vec<PlayerConfig>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: 7,
            height: 6,
        }
    }
}

/// A player as the front end knows it. Only `id` reaches the engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlayerConfig {
    pub id: Player,
    pub name: String,
    /// Any terminal color name (`"red"`, `"lightblue"`) or `"#rrggbb"`
    pub color: String,
}

impl PlayerConfig {
    /// Parsed display color; `validate` guarantees this succeeds.
    pub fn color(&self) -> Option<Color> {
        self.color.parse().ok()
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,
    /// Log file. Logging is off when unset, since the terminal belongs to the UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            players: vec![
                PlayerConfig {
                    id: Player::new(1),
                    name: "Player 1".to_string(),
                    color: "red".to_string(),
                },
                PlayerConfig {
                    id: Player::new(2),
                    name: "Player 2".to_string(),
                    color: "yellow".to_string(),
                },
            ],
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file without validating it, so callers can apply
    /// overrides first.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Read configuration from a TOML file, falling back to defaults if the
    /// file does not exist. The result is not validated.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::read(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("board.width", self.board.width), ("board.height", self.board.height)] {
            if value < MIN_DIMENSION {
                return Err(ConfigError::Validation(format!(
                    "{name} must be >= {MIN_DIMENSION}"
                )));
            }
            if value > MAX_DIMENSION {
                return Err(ConfigError::Validation(format!(
                    "{name} must be <= {MAX_DIMENSION}"
                )));
            }
        }

        if self.players.len() != 2 {
            return Err(ConfigError::Validation(format!(
                "exactly two players are required, got {}",
                self.players.len()
            )));
        }
        let ids: HashSet<Player> = self.players.iter().map(|p| p.id).collect();
        if ids.len() != self.players.len() {
            return Err(ConfigError::Validation(
                "players must have distinct ids".into(),
            ));
        }
        for player in &self.players {
            if player.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "player {} must have a name",
                    player.id.id()
                )));
            }
            if player.color().is_none() {
                return Err(ConfigError::Validation(format!(
                    "player {} has unknown color '{}'",
                    player.id.id(),
                    player.color
                )));
            }
        }

        if let Err(e) = tracing_subscriber::EnvFilter::try_new(&self.logging.filter) {
            return Err(ConfigError::Validation(format!(
                "logging.filter is invalid: {e}"
            )));
        }

        Ok(())
    }

    /// Player ids in turn order
    pub fn player_ids(&self) -> Vec<Player> {
        self.players.iter().map(|p| p.id).collect()
    }

    /// Start a game with the configured board and players.
    pub fn new_game(&self) -> Result<GameState, GameError> {
        GameState::new(self.board.width, self.board.height, &self.player_ids())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_default_config_starts_classic_game() {
        let game = AppConfig::default().new_game().unwrap();
        assert_eq!((game.width(), game.height()), (7, 6));
        assert_eq!(game.current_player(), Player::new(1));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
width = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.width, 9);
        // Other fields should be defaults
        assert_eq!(config.board.height, 6);
        assert_eq!(config.players.len(), 2);
        assert_eq!(config.logging.filter, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.board.width, default.board.width);
        assert_eq!(config.player_ids(), default.player_ids());
    }

    #[test]
    fn test_players_from_toml() {
        let toml_str = r##"
[[players]]
id = 7
name = "Ada"
color = "#00ff00"

[[players]]
id = 3
name = "Grace"
color = "lightblue"
"##;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();
        assert_eq!(config.player_ids(), vec![Player::new(7), Player::new(3)]);
        assert_eq!(config.players[0].color(), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(config.players[1].color(), Some(Color::LightBlue));
    }

    #[test]
    fn test_validation_rejects_small_board() {
        let mut config = AppConfig::default();
        config.board.height = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_huge_board() {
        let mut config = AppConfig::default();
        config.board.width = MAX_DIMENSION + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_player_count() {
        let mut config = AppConfig::default();
        config.players.pop();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        let extra = config.players[0].clone();
        config.players.push(PlayerConfig {
            id: Player::new(9),
            ..extra
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_ids() {
        let mut config = AppConfig::default();
        config.players[1].id = config.players[0].id;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_name() {
        let mut config = AppConfig::default();
        config.players[0].name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_color() {
        let mut config = AppConfig::default();
        config.players[1].color = "not-a-color".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_filter() {
        let mut config = AppConfig::default();
        config.logging.filter = "connect_four=loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.board.width, 7);
    }

    #[test]
    fn test_load_or_default_defers_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.toml");
        std::fs::write(&path, "[board]\nwidth = 30\n").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        let mut config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.board.width, 30);
        assert!(config.validate().is_err());

        // A command-line override can bring it back in range
        config.board.width = 7;
        config.validate().unwrap();
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[board]
height = 8

[logging]
filter = "connect_four=debug"
file = "game.log"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.board.height, 8);
        assert_eq!(config.logging.file, Some(PathBuf::from("game.log")));
        // Others are defaults
        assert_eq!(config.board.width, 7);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[board]\nwidth = 2\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[board\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config.player_ids(), AppConfig::default().player_ids());
    }
}
