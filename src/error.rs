use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// Location of a node inside the document being decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodingPath(Vec<String>);

impl CodingPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn join(&self, key: &str) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.to_owned());
        Self(keys)
    }
}

impl Display for CodingPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for key in &self.0 {
            write!(f, ".{key}")?;
        }
        Ok(())
    }
}

/// Errors raised while turning a serialized node back into a temporal value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string is not ISO-8601 with fractional seconds and an explicit offset.
    #[error("invalid date format at {path}: {input:?}")]
    InvalidFormat { path: CodingPath, input: String },
    /// The node does not have the expected shape.
    #[error("type mismatch at {path}: expected {expected}")]
    ShapeMismatch {
        path: CodingPath,
        expected: &'static str,
    },
    /// The input text is not JSON at all.
    #[error("malformed JSON document at {path}: {message}")]
    MalformedDocument { path: CodingPath, message: String },
}

impl DecodeError {
    pub fn path(&self) -> &CodingPath {
        match self {
            Self::InvalidFormat { path, .. }
            | Self::ShapeMismatch { path, .. }
            | Self::MalformedDocument { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("unknown time zone: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coding_path_display() {
        assert_eq!(CodingPath::root().to_string(), "$");
        assert_eq!(CodingPath::root().join("value").to_string(), "$.value");
    }

    #[test]
    fn test_decode_error_carries_path() {
        let err = DecodeError::InvalidFormat {
            path: CodingPath::root().join("value"),
            input: "garbage".to_owned(),
        };

        assert_eq!(err.path(), &CodingPath::root().join("value"));
        assert_eq!(
            err.to_string(),
            "invalid date format at $.value: \"garbage\""
        );
    }
}
