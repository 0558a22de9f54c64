//! Tunables for the engine and the canvas host.
//!
//! Both structs implement `Default` with the classic values (10×20 arena,
//! one row per second, 10 points a line, 30px cells). With the `serde` feature
//! they deserialize from camelCase JSON where every field is optional.

use thiserror::Error;

/// Narrowest/shortest arena that still fits every shape in every orientation.
pub const MIN_ARENA_SIDE: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena {width}x{height} is too small (each side must be at least {})", MIN_ARENA_SIDE)]
    ArenaTooSmall { width: usize, height: usize },
    #[error("drop interval must be a positive number of milliseconds, got {0}")]
    InvalidDropInterval(f64),
    #[error("cell size must be a positive number of pixels, got {0}")]
    InvalidCellSize(f64),
    #[cfg(feature = "serde_json")]
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Time between forced descents.
    pub drop_interval_ms: f64,
    /// Points per cleared row.
    pub line_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            drop_interval_ms: 1000.0,
            line_bonus: 10,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_ARENA_SIDE || self.height < MIN_ARENA_SIDE {
            return Err(ConfigError::ArenaTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.drop_interval_ms.is_finite() && self.drop_interval_ms > 0.0) {
            return Err(ConfigError::InvalidDropInterval(self.drop_interval_ms));
        }
        Ok(())
    }
}

/// Page wiring for the canvas host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct HostConfig {
    pub game: GameConfig,
    /// Pixels per grid cell; the 2D context is scaled by this.
    pub cell_size: f64,
    pub canvas_id: String,
    pub score_id: String,
    pub start_button_id: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            cell_size: 30.0,
            canvas_id: "tetris".to_string(),
            score_id: "score".to_string(),
            start_button_id: "startBtn".to_string(),
        }
    }
}

impl HostConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    /// Parse and validate.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
