use std::fmt;

use serde::{Deserialize, Serialize};
use three_d::{Srgba, WindowSettings};

use crate::game::Grid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub cell_size: u32,
    /// Simulation steps per second.
    pub speed: u32,
    pub background_color: [u8; 3],
    pub border_color: [u8; 3],
    pub apple_color: [u8; 3],
    pub snake_color: [u8; 3],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Snake".to_string(),
            screen_width: 640,
            screen_height: 480,
            cell_size: 20,
            speed: 10,
            background_color: [0, 0, 0],
            border_color: [93, 216, 228],
            apple_color: [255, 0, 0],
            snake_color: [0, 255, 0],
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    ZeroDimension(&'static str),
    NotDivisible { field: &'static str, value: u32, cell_size: u32 },
    ZeroSpeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "could not read config: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid config JSON: {err}"),
            ConfigError::ZeroDimension(field) => write!(f, "{field} must be greater than zero"),
            ConfigError::NotDivisible {
                field,
                value,
                cell_size,
            } => write!(
                f,
                "{field} ({value}) is not a multiple of cell_size ({cell_size})"
            ),
            ConfigError::ZeroSpeed => write!(f, "speed must be at least one step per second"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroDimension("cell_size"));
        }
        for (field, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension(field));
            }
            if value % self.cell_size != 0 {
                return Err(ConfigError::NotDivisible {
                    field,
                    value,
                    cell_size: self.cell_size,
                });
            }
        }
        if self.speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        Ok(self)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(
            (self.screen_width / self.cell_size) as i32,
            (self.screen_height / self.cell_size) as i32,
        )
    }

    /// Seconds between simulation steps.
    pub fn step_interval(&self) -> f64 {
        1.0 / self.speed as f64
    }

    pub fn window_settings(&self) -> WindowSettings {
        let size = (self.screen_width, self.screen_height);
        WindowSettings {
            title: self.title.clone(),
            min_size: size,
            max_size: Some(size),
            ..Default::default()
        }
    }
}

pub fn color([r, g, b]: [u8; 3]) -> Srgba {
    Srgba::new_opaque(r, g, b)
}
