//! Error types for configuration and session management.
//!
//! Contact resolution itself never fails; these only cover the outer surfaces.

use std::fmt;

/// Errors from loading or validating [`crate::Tuning`].
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read.
    Io(std::io::Error),
    /// The tuning JSON was malformed.
    Parse(serde_json::Error),
    /// A value is out of its allowed range.
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Errors from the level session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No layout exists for the requested level index.
    UnknownLevel(u32),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownLevel(index) => write!(f, "no layout for level {}", index),
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TuningError::Invalid {
            field: "bounce_limit",
            reason: "must be at least 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid tuning value `bounce_limit`: must be at least 1"
        );
        assert_eq!(SessionError::UnknownLevel(7).to_string(), "no layout for level 7");
    }

    #[test]
    fn test_parse_error_has_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = TuningError::from(parse);
        assert!(std::error::Error::source(&err).is_some());
    }
}
