//! Server configuration read from the environment.

use memory_core::{GameError, GameSettings, Palette};
use thiserror::Error;

/// Configuration errors reported at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("invalid PALETTE: {0}")]
    Palette(#[from] GameError),
}

/// Backend configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub game: GameSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            game: GameSettings::default(),
        }
    }
}

impl Config {
    /// Read `HOST`, `PORT`, `FLIP_BACK_DELAY_MS` and `PALETTE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port,
            })?;
        }
        if let Some(delay) = lookup("FLIP_BACK_DELAY_MS") {
            config.game.flip_back_delay_ms =
                delay.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "FLIP_BACK_DELAY_MS",
                    value: delay,
                })?;
        }
        if let Some(palette) = lookup("PALETTE") {
            config.game.palette = Palette::parse_list(&palette)?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
