use thiserror::Error;

/// Errors that abort a landmark detection run.
///
/// Library failures (model loading, inference) are folded into
/// `InvalidParameter` with the library's message attached, so callers see a
/// single error kind per run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacemarkError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl FacemarkError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Re-reports a library error as an invalid-parameter error.
    pub fn from_library(err: &dyn std::error::Error) -> Self {
        Self::InvalidParameter(err.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidParameter(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = FacemarkError::invalid("Empty image");
        assert_eq!(err.to_string(), "invalid parameter: Empty image");
        assert_eq!(err.message(), "Empty image");
    }

    #[test]
    fn test_from_library_keeps_library_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "model file missing");
        let err = FacemarkError::from_library(&io);
        assert_eq!(err, FacemarkError::InvalidParameter("model file missing".into()));
    }
}
