//! Error handling for latex-unicode
//!
//! Every failure the crate can report lives here, grouped by the boundary
//! that raises it. The replacement engine itself is total and has no error
//! type; everything below belongs to dataset loading, configuration, the
//! command surface or the byte-level text boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Remote dataset download failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("Fetching {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },
    /// The server answered with a non-success status
    #[error("Fetching {url} failed with HTTP status {status}")]
    Status { url: String, status: u16 },
    /// Connection, TLS or body transfer failure
    #[error("Fetching {url} failed: {message}")]
    Transport { url: String, message: String },
    /// The source has no remote counterpart (or the `fetch` feature is off)
    #[error("Dataset source does not support downloading")]
    Unsupported,
}

/// A dataset record carries a code point that is not a Unicode scalar value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Code point {code_point} (0x{code_point:X}) is not a Unicode scalar value")]
pub struct DecodeError {
    pub code_point: u32,
}

/// The dataset document could not be read or parsed
#[derive(Debug, Error)]
pub enum DatasetError {
    /// XML syntax error
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    /// A `<character>` element has no `dec` attribute
    #[error("<character> element #{index} has no dec attribute")]
    MissingIdentifier { index: usize },
    /// The `dec` attribute is neither a number nor a hyphenated range
    #[error("Malformed dec identifier {value:?}")]
    MalformedIdentifier { value: String },
    /// No cached copy exists yet
    #[error("No cached dataset at {}", path.display())]
    NotCached { path: PathBuf },
    /// Reading or writing the cached copy failed
    #[error("Dataset cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that aborts a reload or redownload
///
/// A load that fails with any of these never replaces the active table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Command invoked with an unknown subcommand or the wrong argument count
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid arguments: {message}")]
pub struct InvalidArgumentError {
    pub message: String,
}

/// An option was set to something outside its recognized values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Unknown option '{key}'")]
    UnknownOption { key: String },
    #[error("Invalid value {value:?} for option '{key}' (expected on/off)")]
    InvalidValue { key: String, value: String },
    #[error("Invalid dataset timeout {seconds}s (must be at least 1)")]
    InvalidTimeout { seconds: u64 },
}

/// The configuration file could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
}

/// Raw text handed across the byte boundary is not valid UTF-8
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Text is not valid UTF-8 (valid up to byte {valid_up_to})")]
pub struct EncodingError {
    pub valid_up_to: usize,
    #[source]
    pub source: std::str::Utf8Error,
}

impl From<std::str::Utf8Error> for EncodingError {
    fn from(source: std::str::Utf8Error) -> Self {
        EncodingError {
            valid_up_to: source.valid_up_to(),
            source,
        }
    }
}

// Convenience constructors
impl InvalidArgumentError {
    pub fn new(message: impl Into<String>) -> Self {
        InvalidArgumentError {
            message: message.into(),
        }
    }
}

impl ConfigValidationError {
    pub fn unknown(key: impl Into<String>) -> Self {
        ConfigValidationError::UnknownOption { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        ConfigValidationError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl DatasetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError {
            code_point: 0xD800,
        };
        let msg = err.to_string();
        assert!(msg.contains("55296"));
        assert!(msg.contains("0xD800"));
    }

    #[test]
    fn test_load_error_is_transparent() {
        let err = LoadError::from(DecodeError {
            code_point: 0x110000,
        });
        assert!(err.to_string().starts_with("Code point 1114112"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = ConfigValidationError::invalid("send", "maybe");
        let msg = err.to_string();
        assert!(msg.contains("send"));
        assert!(msg.contains("maybe"));
    }

    #[test]
    fn test_encoding_error_position() {
        let bytes = [b'a', b'b', 0xFF];
        let err = EncodingError::from(std::str::from_utf8(&bytes).unwrap_err());
        assert_eq!(err.valid_up_to, 2);
    }
}
