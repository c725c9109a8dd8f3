//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty response from AI model")]
    EmptyResponse,

    #[error("Invalid encoded image: {0}")]
    InvalidEncodedImage(String),

    #[error("Invalid transition: {event} while {phase}")]
    InvalidTransition {
        phase: &'static str,
        event: &'static str,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_display_transition() {
        let error = Error::InvalidTransition { phase: "success", event: "image-selected" };
        assert_eq!(format!("{}", error), "Invalid transition: image-selected while success");
    }

    #[test]
    fn test_error_display_empty() {
        assert_eq!(format!("{}", Error::EmptyResponse), "Empty response from AI model");
    }
}
