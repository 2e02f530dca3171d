pub mod extract;
pub mod prompt;
pub mod provider;

pub use extract::extract_insights;
pub use prompt::build_prompt;
pub use provider::{GeminiProvider, InsightProvider};
