//! Runtime settings, read from an optional JSON file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::input::JOYSTICK_DEAD_ZONE;
use crate::lessons::LESSONS;
use crate::particles::DEFAULT_PARTICLE_COUNT;

/// Settings file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "lessons.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonsConfig {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Directory the lesson images are loaded from
    pub asset_dir: PathBuf,
    /// Zero based index of the lesson shown at startup
    pub start_lesson: usize,
    pub joystick_dead_zone: i32,
    /// Rounds each worker thread runs in the threading lessons
    pub worker_iterations: u32,
    pub particle_count: usize,
}

impl Default for LessonsConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            asset_dir: PathBuf::from("assets"),
            start_lesson: 0,
            joystick_dead_zone: i32::from(JOYSTICK_DEAD_ZONE),
            worker_iterations: 5,
            particle_count: DEFAULT_PARTICLE_COUNT,
        }
    }
}

impl LessonsConfig {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load`, but a file that does not exist yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            },
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.start_lesson >= LESSONS.len() {
            return Err(ConfigError::Invalid(format!(
                "start_lesson {} is outside 0..{}",
                self.start_lesson,
                LESSONS.len()
            )));
        }
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be at least 1".into()));
        }
        if !(0..=i32::from(i16::MAX)).contains(&self.joystick_dead_zone) {
            return Err(ConfigError::Invalid(format!(
                "joystick_dead_zone {} is outside 0..={}",
                self.joystick_dead_zone,
                i16::MAX
            )));
        }
        Ok(())
    }

    /// Dead zone as an axis value. Only meaningful after `validate`.
    pub fn dead_zone(&self) -> i16 {
        i16::try_from(self.joystick_dead_zone).unwrap_or(JOYSTICK_DEAD_ZONE)
    }
}
