use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::RedditApi(e) => {
                error!("Reddit API error details: {:?}", e);
            }
            CoreError::Llm(e) => {
                error!("LLM error details: {:?}", e);
            }
            CoreError::Extraction(e) => {
                error!("Extraction error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(_) | CoreError::Network(_) => {
                "Failed to fetch Reddit user data".to_string()
            }
            CoreError::Llm(_) | CoreError::Extraction(_) => "AI analysis failed".to_string(),
            CoreError::InvalidInput { message } => message.clone(),
            CoreError::Config(_) => "Service is misconfigured".to_string(),
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::RedditApi(_) => "REDDIT_API".to_string(),
            CoreError::Llm(_) => "LLM".to_string(),
            CoreError::Extraction(_) => "EXTRACTION".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let err = CoreError::from(LlmError::ServerError { status_code: 503 });
        assert_eq!(err.user_friendly_message(), "AI analysis failed");

        let err = CoreError::from(RedditApiError::RequestTimeout);
        assert_eq!(err.user_friendly_message(), "Failed to fetch Reddit user data");

        let err = CoreError::InvalidInput {
            message: "Username is required".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Username is required");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CoreError::from(ExtractionError::NotAnObject).error_code(),
            "EXTRACTION"
        );
        assert_eq!(
            CoreError::from(LlmError::EmptyKeyPool).error_code(),
            "LLM"
        );
    }
}
