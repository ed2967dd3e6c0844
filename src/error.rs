//! Error types for DH chain construction and parameter loading.

use std::path::PathBuf;

use crate::params::DhField;

/// Errors raised while validating DH parameters, loading tables or building chains.
#[derive(Debug, thiserror::Error)]
pub enum DhError {
    /// A DH field is NaN or infinite.
    #[error("invalid parameter: link {index} field `{field}` is not finite ({value})")]
    InvalidParameter { index: u32, field: DhField, value: f64 },

    /// Link indices are 1-based.
    #[error("invalid parameter: link index must be at least 1")]
    ZeroIndex,

    /// The same index appears twice in a row.
    #[error("invalid parameter: duplicate link index {index}")]
    DuplicateIndex { index: u32 },

    /// An index is smaller than the one before it.
    #[error("invalid parameter: link index {index} follows {previous}")]
    OutOfOrder { index: u32, previous: u32 },

    /// Forward kinematics was given the wrong number of joint values.
    #[error("expected {expected} joint values, got {actual}")]
    JointCountMismatch { expected: usize, actual: usize },

    /// A joint value passed to forward kinematics is NaN or infinite.
    #[error("joint value {position} is not finite ({value})")]
    InvalidJointValue { position: usize, value: f64 },

    /// A table row was addressed that does not exist.
    #[error("row {row} out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// Failed to read a parameter file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The parameter file content could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Unknown parameter file extension.
    #[error("unsupported parameter file: {0}")]
    UnsupportedFormat(String),
}

impl DhError {
    /// Index of the offending link, when the error is tied to one.
    pub fn link_index(&self) -> Option<u32> {
        match self {
            DhError::InvalidParameter { index, .. }
            | DhError::DuplicateIndex { index }
            | DhError::OutOfOrder { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for DhError {
    fn from(e: toml::de::Error) -> Self {
        DhError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for DhError {
    fn from(e: serde_json::Error) -> Self {
        DhError::Parse(e.to_string())
    }
}
