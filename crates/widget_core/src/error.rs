//! Widget error types

use thiserror::Error;
use widget_fs::FsError;

/// A selected file could not be read
#[derive(Error, Debug)]
#[error("Cannot read {name}: {source}")]
pub struct ReadError {
    pub name: String,
    pub source: FsError,
}

/// A stored blob does not have the expected data-URL shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing \"data:\" scheme")]
    MissingScheme,

    #[error("missing ',' between header and payload")]
    MissingSeparator,

    #[error("missing \";base64\" encoding marker")]
    MissingEncodingMarker,

    #[error("file name annotation is not valid UTF-8")]
    InvalidName,

    #[error("payload is not valid base64: {0}")]
    InvalidPayload(String),
}

/// Main widget error type
#[derive(Error, Debug)]
pub enum WidgetError {
    // ===== Recoverable (previous state kept, user may retry) =====
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("File picker is disabled")]
    PickerDisabled,

    // ===== Caller contract violations =====
    #[error("Malformed value: {0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WidgetError {
    /// Can the user recover by re-selecting files?
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WidgetError::Read(_) | WidgetError::PickerDisabled)
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            WidgetError::Read(e) => match &e.source {
                FsError::NotFound(_) => format!("{} no longer exists. Please select it again.", e.name),
                FsError::AccessDenied(_) => format!("Permission denied reading {}.", e.name),
                _ => format!("Could not read {}. Please select it again.", e.name),
            },
            WidgetError::PickerDisabled => "File selection is disabled.".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_is_recoverable() {
        let err = WidgetError::from(ReadError {
            name: "a.png".into(),
            source: FsError::NotFound("/tmp/a.png".into()),
        });
        assert!(err.is_recoverable());
        assert_eq!(err.user_message(), "a.png no longer exists. Please select it again.");
        assert!(err.to_string().starts_with("Cannot read a.png"));
    }

    #[test]
    fn test_decode_error_is_not_recoverable() {
        let err = WidgetError::from(DecodeError::MissingScheme);
        assert!(!err.is_recoverable());
        assert_eq!(err.user_message(), "Malformed value: missing \"data:\" scheme");
    }
}
