use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::hour::Field;

pub const DEFAULT_PROGRAM_MAX: u8 = 5;
pub const DEFAULT_STRENGTH_MAX: u8 = 14;
pub const DEFAULT_PAIN_MAX: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number between 0 and 255, got '{value}'")]
    InvalidNumber { key: String, value: String },
}

/// Inclusive upper bounds for each recorded value. Lower bounds are always 0.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleConfig {
    pub program_max: u8,
    pub strength_max: u8,
    pub pain_max: u8,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            program_max: DEFAULT_PROGRAM_MAX,
            strength_max: DEFAULT_STRENGTH_MAX,
            pain_max: DEFAULT_PAIN_MAX,
        }
    }
}

impl ScaleConfig {
    pub fn max_for(&self, field: Field) -> u8 {
        match field {
            Field::Program => self.program_max,
            Field::Strength => self.strength_max,
            Field::Pain => self.pain_max,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads scale overrides through `get` so tests don't have to touch the
    /// process environment. Missing keys keep their defaults.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            program_max: read_u8(&mut get, "STIMLOG_PROGRAM_MAX", defaults.program_max)?,
            strength_max: read_u8(&mut get, "STIMLOG_STRENGTH_MAX", defaults.strength_max)?,
            pain_max: read_u8(&mut get, "STIMLOG_PAIN_MAX", defaults.pain_max)?,
        })
    }
}

fn read_u8<F>(get: &mut F, key: &str, default: u8) -> Result<u8, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: raw,
        }),
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// `None` means `~/.stimlog`.
    pub data_dir: Option<PathBuf>,
    pub scales: ScaleConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let data_dir = get("STIMLOG_DATA_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);
        let scales = ScaleConfig::from_env_with(get)?;
        Ok(Self { data_dir, scales })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let scales = ScaleConfig::default();
        assert_eq!(scales.max_for(Field::Program), 5);
        assert_eq!(scales.max_for(Field::Strength), 14);
        assert_eq!(scales.max_for(Field::Pain), 10);
    }

    #[test]
    fn test_from_env_overrides_some_keys() {
        let get = |k: &str| match k {
            "STIMLOG_PROGRAM_MAX" => Some("8".to_string()),
            "STIMLOG_DATA_DIR" => Some("/tmp/stim".to_string()),
            _ => None,
        };
        let cfg = AppConfig::from_env_with(get).unwrap();
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/tmp/stim")));
        assert_eq!(cfg.scales.program_max, 8);
        assert_eq!(cfg.scales.strength_max, DEFAULT_STRENGTH_MAX);
        assert_eq!(cfg.scales.pain_max, DEFAULT_PAIN_MAX);
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        let get = |k: &str| match k {
            "STIMLOG_PAIN_MAX" => Some("lots".to_string()),
            _ => None,
        };
        let err = ScaleConfig::from_env_with(get).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "STIMLOG_PAIN_MAX".to_string(),
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn test_blank_data_dir_is_ignored() {
        let get = |k: &str| match k {
            "STIMLOG_DATA_DIR" => Some("  ".to_string()),
            _ => None,
        };
        let cfg = AppConfig::from_env_with(get).unwrap();
        assert!(cfg.data_dir.is_none());
    }
}
