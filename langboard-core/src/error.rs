//! Error types for langboard core.

use std::{error::Error, fmt};

/// Error type for langboard operations.
#[derive(Debug)]
pub enum LangboardError {
    /// Host handshake or project resolution failed before any fetch started.
    Initialization(String),
    /// The remote analytics call failed (network, auth, non-2xx, decode).
    Fetch(String),
    /// Settings could not be serialized or deserialized.
    Settings(String),
}

impl fmt::Display for LangboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialization(message) => write!(f, "initialization error: {message}"),
            Self::Fetch(message) => write!(f, "fetch error: {message}"),
            Self::Settings(message) => write!(f, "settings error: {message}"),
        }
    }
}

impl Error for LangboardError {}

impl From<serde_json::Error> for LangboardError {
    fn from(value: serde_json::Error) -> Self {
        Self::Settings(value.to_string())
    }
}

/// Convenience result type for langboard core.
pub type Result<T> = std::result::Result<T, LangboardError>;

#[cfg(test)]
mod tests {
    use super::LangboardError;

    #[test]
    fn initialization_error_formats_message() {
        let error = LangboardError::Initialization("no project in context".to_string());
        assert_eq!(
            format!("{error}"),
            "initialization error: no project in context"
        );
    }

    #[test]
    fn fetch_error_formats_message() {
        let error = LangboardError::Fetch("status 503".to_string());
        assert_eq!(format!("{error}"), "fetch error: status 503");
    }

    #[test]
    fn from_serde_error_maps_to_settings_variant() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: LangboardError = parse_error.into();
        match error {
            LangboardError::Settings(message) => assert!(!message.is_empty()),
            _ => panic!("expected Settings variant"),
        }
    }
}
