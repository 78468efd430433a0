//! Collage error types.
//!
//! Defines the caller-visible errors that can abort a collage request.
//! Per-image load failures are a separate, swallowed concern; see
//! [`crate::fetcher::LoadError`].

use std::fmt;

/// Errors that can occur while producing a collage.
///
/// Categorizes failures into 4 main types so callers can map them to
/// an appropriate structured failure response.
#[derive(Debug, Clone)]
pub enum CollageError {
    /// Failed to fetch an image from its locator
    Fetch(String),

    /// Fetched bytes were not a decodable image
    Decode(String),

    /// Fewer images survived loading than the required minimum
    InsufficientInput { loaded: usize, required: usize },

    /// Failed to encode a finished page
    Encode { format: String, message: String },
}

impl fmt::Display for CollageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(msg) => write!(f, "Failed to fetch image: {}", msg),
            Self::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            Self::InsufficientInput { loaded, required } => {
                write!(
                    f,
                    "Only {} images loaded successfully, need at least {}",
                    loaded, required
                )
            }
            Self::Encode { format, message } => {
                write!(f, "Failed to encode page to {}: {}", format, message)
            }
        }
    }
}

impl std::error::Error for CollageError {}

impl CollageError {
    /// Helper constructors for common error patterns
    pub fn fetch(message: impl Into<String>) -> Self {
        CollageError::Fetch(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        CollageError::Decode(message.into())
    }

    pub fn insufficient_input(loaded: usize, required: usize) -> Self {
        CollageError::InsufficientInput { loaded, required }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        CollageError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CollageError::fetch("connection timeout");
        assert_eq!(err.to_string(), "Failed to fetch image: connection timeout");

        let err = CollageError::decode("invalid PNG");
        assert_eq!(err.to_string(), "Failed to decode image: invalid PNG");

        let err = CollageError::insufficient_input(1, 2);
        assert_eq!(
            err.to_string(),
            "Only 1 images loaded successfully, need at least 2"
        );

        let err = CollageError::encode_failed("jpeg", "encoder error");
        assert_eq!(err.to_string(), "Failed to encode page to jpeg: encoder error");
    }

    #[test]
    fn test_error_debug() {
        let err = CollageError::insufficient_input(0, 2);
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("InsufficientInput"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CollageError>();
    }
}
