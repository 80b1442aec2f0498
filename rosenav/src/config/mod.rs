//! Display configuration.
//!
//! Which physical display this compositor instance drives (left or right
//! seat), its default range setting and the refresh cadence live in an INI
//! file at a platform config path. The side also decides which radio
//! receiver each overlay listens to; the receivers are cross-wired between
//! sides so both pilots can monitor independent sources.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

/// Range settings selectable on the display, in nautical miles.
pub const RANGE_SETTINGS_NM: [u32; 6] = [10, 20, 40, 80, 160, 320];

/// Default range setting.
pub const DEFAULT_RANGE_NM: u32 = 80;

/// Default display refresh cadence.
pub const DEFAULT_REFRESH_HZ: f64 = 10.0;

/// Errors from configuration loading, saving and key access.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem access failed.
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The INI file could not be parsed.
    #[error("config file invalid: {0}")]
    Parse(String),

    /// A key holds a value outside its accepted set.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Which physical navigation display this instance drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySide {
    /// Captain's side.
    Left,
    /// First officer's side.
    Right,
}

impl DisplaySide {
    /// VOR receiver index feeding this side (1-based).
    pub fn vor_receiver(&self) -> u8 {
        match self {
            DisplaySide::Left => 1,
            DisplaySide::Right => 2,
        }
    }

    /// ILS receiver index feeding this side (1-based).
    ///
    /// Cross-wired relative to the VOR receivers: the left display listens
    /// to ILS receiver 2 and the right to receiver 1.
    pub fn ils_receiver(&self) -> u8 {
        match self {
            DisplaySide::Left => 2,
            DisplaySide::Right => 1,
        }
    }
}

impl fmt::Display for DisplaySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplaySide::Left => write!(f, "left"),
            DisplaySide::Right => write!(f, "right"),
        }
    }
}

impl FromStr for DisplaySide {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(DisplaySide::Left),
            "right" | "r" => Ok(DisplaySide::Right),
            _ => Err(ConfigError::InvalidValue {
                key: "display.side",
                value: s.to_string(),
                reason: "expected 'left' or 'right'",
            }),
        }
    }
}

/// Display settings for one compositor instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    /// Which display this instance drives.
    pub side: DisplaySide,
    /// Selected range, one of [`RANGE_SETTINGS_NM`].
    pub range_nm: u32,
    /// Refresh cadence driving the compositor tick.
    pub refresh_hz: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            side: DisplaySide::Left,
            range_nm: DEFAULT_RANGE_NM,
            refresh_hz: DEFAULT_REFRESH_HZ,
        }
    }
}

/// Path of the configuration file under the platform config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rosenav")
        .join("config.ini")
}

/// INI-backed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// Display settings.
    pub display: DisplayConfig,
}

impl ConfigFile {
    /// Load from the default path. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini =
            Ini::load_from_file(path).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("display")) {
            if let Some(side) = section.get("side") {
                config.display.side = side.parse()?;
            }
            if let Some(range) = section.get("range_nm") {
                config.display.range_nm = parse_range(range)?;
            }
            if let Some(refresh) = section.get("refresh_hz") {
                config.display.refresh_hz = parse_refresh(refresh)?;
            }
        }

        Ok(config)
    }

    /// Save to the default path, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("display"))
            .set("side", self.display.side.to_string())
            .set("range_nm", self.display.range_nm.to_string())
            .set("refresh_hz", self.display.refresh_hz.to_string());
        ini.write_to_file(path)?;

        Ok(())
    }
}

fn parse_range(value: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: "display.range_nm",
        value: value.to_string(),
        reason: "expected one of 10, 20, 40, 80, 160, 320",
    };

    let range: u32 = value.parse().map_err(|_| invalid())?;
    if RANGE_SETTINGS_NM.contains(&range) {
        Ok(range)
    } else {
        Err(invalid())
    }
}

fn parse_refresh(value: &str) -> Result<f64, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: "display.refresh_hz",
        value: value.to_string(),
        reason: "expected a positive number",
    };

    let refresh: f64 = value.parse().map_err(|_| invalid())?;
    if refresh > 0.0 && refresh.is_finite() {
        Ok(refresh)
    } else {
        Err(invalid())
    }
}

/// Typed access to configuration keys in `section.key` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `display.side`
    DisplaySide,
    /// `display.range_nm`
    RangeNm,
    /// `display.refresh_hz`
    RefreshHz,
}

impl ConfigKey {
    /// All known keys, for listing.
    pub const ALL: [ConfigKey; 3] = [ConfigKey::DisplaySide, ConfigKey::RangeNm, ConfigKey::RefreshHz];

    /// Dotted key name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::DisplaySide => "display.side",
            ConfigKey::RangeNm => "display.range_nm",
            ConfigKey::RefreshHz => "display.refresh_hz",
        }
    }

    /// Read this key's current value as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::DisplaySide => config.display.side.to_string(),
            ConfigKey::RangeNm => config.display.range_nm.to_string(),
            ConfigKey::RefreshHz => config.display.refresh_hz.to_string(),
        }
    }

    /// Set this key from a string value, validating it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::DisplaySide => config.display.side = value.parse()?,
            ConfigKey::RangeNm => config.display.range_nm = parse_range(value)?,
            ConfigKey::RefreshHz => config.display.refresh_hz = parse_refresh(value)?,
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "display.side" => Ok(ConfigKey::DisplaySide),
            "display.range_nm" => Ok(ConfigKey::RangeNm),
            "display.refresh_hz" => Ok(ConfigKey::RefreshHz),
            _ => Err(ConfigError::InvalidValue {
                key: "key",
                value: s.to_string(),
                reason: "unknown configuration key",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_receiver_cross_wiring() {
        assert_eq!(DisplaySide::Left.vor_receiver(), 1);
        assert_eq!(DisplaySide::Right.vor_receiver(), 2);
        assert_eq!(DisplaySide::Left.ils_receiver(), 2);
        assert_eq!(DisplaySide::Right.ils_receiver(), 1);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("left".parse::<DisplaySide>().unwrap(), DisplaySide::Left);
        assert_eq!("R".parse::<DisplaySide>().unwrap(), DisplaySide::Right);
        assert!("center".parse::<DisplaySide>().is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.ini");

        let config = ConfigFile {
            display: DisplayConfig {
                side: DisplaySide::Right,
                range_nm: 160,
                refresh_hz: 20.0,
            },
        };
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_range_must_be_a_selectable_setting() {
        assert!(parse_range("80").is_ok());
        assert!(parse_range("75").is_err());
        assert!(parse_range("abc").is_err());
    }

    #[test]
    fn test_config_key_round_trip() {
        let mut config = ConfigFile::default();

        let key: ConfigKey = "display.side".parse().unwrap();
        key.set(&mut config, "right").unwrap();
        assert_eq!(key.get(&config), "right");

        let key: ConfigKey = "display.range_nm".parse().unwrap();
        key.set(&mut config, "320").unwrap();
        assert_eq!(config.display.range_nm, 320);

        assert!("display.brightness".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_invalid_values_reported_with_key() {
        let mut config = ConfigFile::default();
        let err = ConfigKey::RangeNm.set(&mut config, "999").unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "display.range_nm"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
