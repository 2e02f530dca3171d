use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError};

/// A single submitted post, reduced to the fields the insight prompt uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub subreddit: String,
}

/// A single comment together with the title of the post it was left on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub subreddit: String,
    pub comment: String,
    #[serde(rename = "postTitle")]
    pub post_title: String,
}

/// Everything we aggregate about a user before asking the model for
/// insights. Either side may be empty when the corresponding listing
/// fetch returned a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

/// Normalized view of Reddit's `about.json` payload for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub title: String,
    pub display_name: String,
    pub comment_karma: i64,
    pub link_karma: i64,
    pub description: String,
    /// Account creation time, epoch seconds.
    pub created: i64,
    pub avatar: String,
    pub premium: bool,
    pub icon_img: String,
    pub name: String,
    pub banner_img: String,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_USER_AGENT: &str = "snooscope/0.1";

/// Process-level configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Pool of interchangeable Gemini API keys. One is picked at random
    /// per process lifetime, which spreads quota across horizontally
    /// scaled instances.
    pub api_key_pool: Vec<String>,
    pub user_agent: String,
    pub bind_addr: String,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// `GEMINI_API_KEY_LIST` holds a JSON-encoded string array; an unset
    /// variable is treated as an empty pool, but malformed JSON is a
    /// configuration error rather than a silent empty pool.
    pub fn from_env() -> Result<Self, CoreError> {
        let raw_keys =
            std::env::var("GEMINI_API_KEY_LIST").unwrap_or_else(|_| "[]".to_string());
        let api_key_pool: Vec<String> =
            serde_json::from_str(&raw_keys).map_err(|e| ConfigError::InvalidFormat {
                details: format!("GEMINI_API_KEY_LIST is not a JSON string array: {e}"),
            })?;

        let bind_addr =
            std::env::var("SNOOSCOPE_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            api_key_pool,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bind_addr,
        })
    }
}
