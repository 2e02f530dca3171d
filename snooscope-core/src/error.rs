use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Insight extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Request failed with status {status_code} for {resource}")]
    RequestFailed { status_code: u16, resource: String },

    #[error("Request timeout")]
    RequestTimeout,
}

#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("API key pool is empty")]
    EmptyKeyPool,

    #[error("Provider returned error status {status_code}")]
    ServerError { status_code: u16 },

    #[error("Invalid response format from {provider}")]
    InvalidResponseFormat { provider: String },
}

#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    #[error("No parseable JSON found in model reply")]
    NoJsonFound,

    #[error("Fenced block is not valid JSON: {details}")]
    InvalidJson { details: String },

    #[error("Model reply parsed to a non-object JSON value")]
    NotAnObject,
}

#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid configuration format: {details}")]
    InvalidFormat { details: String },
}
