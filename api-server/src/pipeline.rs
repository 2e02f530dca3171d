//! The aggregation-to-insight pipeline behind the HTTP handlers.
//!
//! One request flows: validate username -> fetch Reddit activity ->
//! build prompt -> call the model -> extract the insight mapping ->
//! merge with the username. There are no partial successes: either the
//! full merged object comes back or the error propagates to the handler.

use llm_interface::{build_prompt, extract_insights, InsightProvider};
use reddit_client::RedditClient;
use serde_json::{Map, Value};
use snooscope_core::{format_created, format_karma, CoreError};
use tracing::info;

fn validate_username(username: &str) -> Result<&str, CoreError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CoreError::InvalidInput {
            message: "Username is required".to_string(),
        });
    }
    Ok(username)
}

/// Runs the full insight pipeline for one username and returns the
/// response object: `{ "username": ..., ...insights }`.
pub async fn analyze_user(
    reddit: &RedditClient,
    provider: &dyn InsightProvider,
    username: &str,
) -> Result<Value, CoreError> {
    let username = validate_username(username)?;

    let activity = reddit.fetch_activity(username).await?;
    let prompt = build_prompt(&activity)?;
    let raw = provider.generate_insights(&prompt).await?;
    let insights = extract_insights(&raw)?;

    info!(
        "Extracted {} insight fields for u/{}",
        insights.len(),
        username
    );

    let mut merged = Map::new();
    merged.insert("username".to_string(), Value::String(username.to_string()));
    merged.extend(insights);
    Ok(Value::Object(merged))
}

/// Fetches a user's profile summary and decorates it with display-ready
/// karma and account-age strings.
pub async fn profile_view(
    reddit: &RedditClient,
    username: &str,
) -> Result<Value, CoreError> {
    let username = validate_username(username)?;

    let profile = reddit.fetch_profile(username).await?;
    let link_karma_display = format_karma(profile.link_karma);
    let comment_karma_display = format_karma(profile.comment_karma);
    let created_display = format_created(profile.created);

    let mut view = match serde_json::to_value(&profile)? {
        Value::Object(map) => map,
        _ => {
            return Err(CoreError::Internal {
                message: "profile summary did not serialize to an object".to_string(),
            })
        }
    };
    view.insert("link_karma_display".to_string(), link_karma_display.into());
    view.insert(
        "comment_karma_display".to_string(),
        comment_karma_display.into(),
    );
    view.insert("created_display".to_string(), created_display.into());
    Ok(Value::Object(view))
}
