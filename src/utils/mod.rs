//! Utility modules
//!
//! Error types and result types shared by every layer.

pub mod error;

// Re-export commonly used items
pub use error::{
    ConfigError, ConfigValidationError, DatasetError, DecodeError, EncodingError, FetchError,
    InvalidArgumentError, LoadError, LoadResult,
};
