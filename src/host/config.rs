//! Plugin configuration
//!
//! Options form a closed set ([`ConfigOption`]); each carries its key,
//! default, description and whether changing it re-registers hooks. The
//! optional TOML file looks like:
//!
//! ```toml
//! [options]
//! input = "on"
//! send = true
//! print = "off"
//!
//! [dataset]
//! url = "https://www.w3.org/Math/characters/unicode.xml"
//! timeout_secs = 30
//! cache_file = "/home/me/.local/share/latex-unicode/latex_unicode.xml"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;

use super::InterceptionPoint;
use crate::dataset::{default_cache_path, StdDatasetSource, DEFAULT_DATASET_URL, DEFAULT_FETCH_TIMEOUT};
use crate::utils::error::{ConfigError, ConfigValidationError};

/// A user-settable option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigOption {
    /// Replace in the input line as it is displayed
    Input,
    /// Replace in the input line when it is sent
    Send,
    /// Replace in inbound messages as they are printed
    Print,
}

impl ConfigOption {
    pub const ALL: [ConfigOption; 3] = [ConfigOption::Input, ConfigOption::Send, ConfigOption::Print];

    pub fn key(self) -> &'static str {
        match self {
            ConfigOption::Input => "input",
            ConfigOption::Send => "send",
            ConfigOption::Print => "print",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|opt| opt.key() == key)
    }

    pub fn default_value(self) -> bool {
        true
    }

    pub fn description(self) -> &'static str {
        match self {
            ConfigOption::Input => "replace LaTeX in the input line while typing",
            ConfigOption::Send => "replace LaTeX in the input line when sending",
            ConfigOption::Print => "replace LaTeX in messages from others",
        }
    }

    /// Changing this option changes which hooks are registered
    pub fn requires_rehook(self) -> bool {
        match self {
            ConfigOption::Input | ConfigOption::Send | ConfigOption::Print => true,
        }
    }

    /// The interception point this option switches
    pub fn point(self) -> InterceptionPoint {
        match self {
            ConfigOption::Input => InterceptionPoint::InputDisplay,
            ConfigOption::Send => InterceptionPoint::Send,
            ConfigOption::Print => InterceptionPoint::Print,
        }
    }
}

impl std::fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Parse an on/off style value
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Current values of every option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    input: bool,
    send: bool,
    print: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: ConfigOption::Input.default_value(),
            send: ConfigOption::Send.default_value(),
            print: ConfigOption::Print.default_value(),
        }
    }
}

impl Settings {
    pub fn get(&self, option: ConfigOption) -> bool {
        match option {
            ConfigOption::Input => self.input,
            ConfigOption::Send => self.send,
            ConfigOption::Print => self.print,
        }
    }

    pub fn set(&mut self, option: ConfigOption, enabled: bool) {
        match option {
            ConfigOption::Input => self.input = enabled,
            ConfigOption::Send => self.send = enabled,
            ConfigOption::Print => self.print = enabled,
        }
    }

    /// Validate a key/value pair without applying it
    pub fn parse_assignment(key: &str, value: &str) -> Result<(ConfigOption, bool), ConfigValidationError> {
        let option = ConfigOption::from_key(key).ok_or_else(|| ConfigValidationError::unknown(key))?;
        let enabled = parse_switch(value).ok_or_else(|| ConfigValidationError::invalid(key, value))?;
        Ok((option, enabled))
    }

    /// Set an option from its string form; invalid input changes nothing
    pub fn set_str(&mut self, key: &str, value: &str) -> Result<ConfigOption, ConfigValidationError> {
        let (option, enabled) = Self::parse_assignment(key, value)?;
        self.set(option, enabled);
        Ok(option)
    }

    /// Interception points enabled by these settings, in option order
    pub fn enabled_points(&self) -> Vec<InterceptionPoint> {
        ConfigOption::ALL
            .into_iter()
            .filter(|opt| self.get(*opt))
            .map(ConfigOption::point)
            .collect()
    }
}

/// Where and how to fetch the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub url: String,
    pub timeout: Duration,
    /// `None` means the platform data directory
    pub cache_file: Option<PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
            cache_file: None,
        }
    }
}

impl DatasetConfig {
    /// Resolved cache path, falling back to the working directory when no
    /// platform data directory is available
    pub fn cache_path(&self) -> PathBuf {
        self.cache_file
            .clone()
            .or_else(default_cache_path)
            .unwrap_or_else(|| PathBuf::from(crate::dataset::CACHE_FILE_NAME))
    }

    pub fn source(&self) -> StdDatasetSource {
        StdDatasetSource::new(self.cache_path())
            .with_url(self.url.clone())
            .with_timeout(self.timeout)
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub settings: Settings,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSwitch {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDataset {
    url: Option<String>,
    timeout_secs: Option<u64>,
    cache_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    options: IndexMap<String, RawSwitch>,
    dataset: RawDataset,
}

impl Config {
    /// Parse configuration from TOML text. Options are validated in the
    /// order they are written; the first invalid one is reported.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        let mut config = Config::default();

        for (key, value) in &raw.options {
            match value {
                RawSwitch::Bool(enabled) => {
                    let option = ConfigOption::from_key(key)
                        .ok_or_else(|| ConfigValidationError::unknown(key.as_str()))?;
                    config.settings.set(option, *enabled);
                }
                RawSwitch::Text(text) => {
                    config.settings.set_str(key, text)?;
                }
            }
        }

        if let Some(url) = raw.dataset.url {
            config.dataset.url = url;
        }
        if let Some(seconds) = raw.dataset.timeout_secs {
            if seconds == 0 {
                return Err(ConfigValidationError::InvalidTimeout { seconds }.into());
            }
            config.dataset.timeout = Duration::from_secs(seconds);
        }
        config.dataset.cache_file = raw.dataset.cache_file;

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
