//! Error types for target configuration operations.

use std::path::PathBuf;

/// Errors that can occur while configuring or resolving a compilation target.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// No registered backend target matches the triple.
    #[error("unsupported target triple '{triple}'")]
    UnsupportedTriple {
        /// The triple that failed to resolve.
        triple: String,
    },

    /// A resolved target was required but `initialize` has not succeeded.
    #[error("target for '{triple}' has not been resolved")]
    Unresolved {
        /// The triple of the unresolved configuration.
        triple: String,
    },

    /// A textual option value could not be parsed.
    #[error("invalid {field}: '{value}'")]
    InvalidValue {
        /// Name of the option being parsed.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file not found.
    #[error("config file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
