//! Storage-side errors.

use thiserror::Error;

/// Failures of the record and profile stores and the files behind them.
///
/// The startup gate reports its own failures through
/// [`crate::auth::AuthError`] and only wraps these as text.
#[derive(Error, Debug, Clone)]
pub enum ProspectError {
    #[error("{entity_type} '{id}' does not exist")]
    NotFound { entity_type: &'static str, id: String },

    /// File system failure, with the `io::ErrorKind` folded into the message
    #[error("I/O failure: {message}")]
    Io { message: String },

    /// A store could not be read or written as a whole
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Malformed {format} document: {message}")]
    Serialization { format: &'static str, message: String },

    /// Input refused before it reached a store
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl ProspectError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ProspectError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} ({:?})", err, err.kind()),
        }
    }
}

impl From<toml::de::Error> for ProspectError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML",
            message: err.message().to_string(),
        }
    }
}

impl From<toml::ser::Error> for ProspectError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML",
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProspectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ProspectError::not_found("Company", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Company '42' does not exist");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let err: ProspectError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_toml_errors_are_serialization() {
        let err: ProspectError = toml::from_str::<toml::Value>("[broken").unwrap_err().into();
        assert!(matches!(err, ProspectError::Serialization { format: "TOML", .. }));
    }
}
