use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use snooscope_core::{Comment, CoreError, Post, ProfileSummary, RedditApiError, UserActivity};
use std::time::Duration;
use tracing::{debug, info, warn};

const REDDIT_BASE_URL: &str = "https://www.reddit.com";

// Reddit ships avatar_default_0 .. avatar_default_7.
const DEFAULT_AVATAR_VARIANTS: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub dist: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub title: String,
    pub subreddit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditCommentData {
    pub subreddit: String,
    pub body: String,
    /// Title of the post the comment was left on.
    #[serde(default)]
    pub link_title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditAboutData {
    pub name: String,
    #[serde(default)]
    pub icon_img: String,
    #[serde(default)]
    pub snoovatar_img: String,
    pub comment_karma: i64,
    pub link_karma: i64,
    pub created_utc: f64,
    #[serde(default)]
    pub is_gold: bool,
    #[serde(default)]
    pub subreddit: RedditAboutSubreddit,
}

/// The user-profile "subreddit" object nested inside `about.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedditAboutSubreddit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub display_name_prefixed: String,
    #[serde(default)]
    pub public_description: String,
    #[serde(default)]
    pub banner_img: String,
}

/// Client for Reddit's unauthenticated public JSON endpoints.
///
/// Listing fetches degrade to empty on non-success statuses (a deleted or
/// nonexistent user is not an error at this layer); only a network-level
/// failure aborts an aggregation.
#[derive(Debug, Clone)]
pub struct RedditClient {
    http_client: Client,
    base_url: String,
}

impl RedditClient {
    pub fn new(user_agent: &str) -> Self {
        Self::with_timeout(user_agent, Duration::from_secs(30))
    }

    pub fn with_timeout(user_agent: &str, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: REDDIT_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different base URL. Used by tests to target
    /// a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// GETs a listing endpoint. A non-success status yields `Ok(None)` so
    /// the caller can degrade that field to empty; network errors and
    /// unparseable bodies propagate.
    async fn get_listing<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<RedditListing<T>>, CoreError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching Reddit listing: {}", path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(map_send_error)?;
        if !response.status().is_success() {
            warn!(
                "Reddit returned status {} for {}, treating as empty",
                response.status(),
                path
            );
            return Ok(None);
        }

        let listing = response.json::<RedditListing<T>>().await.map_err(|e| {
            warn!("Failed to parse Reddit listing for {}: {}", path, e);
            RedditApiError::InvalidResponse {
                details: format!("Failed to parse listing for {path}"),
            }
        })?;

        Ok(Some(listing))
    }

    /// Aggregates a user's submitted posts and comments. The two listing
    /// fetches run concurrently and are independent: an HTTP error status
    /// on one leaves that side empty while the other still counts.
    pub async fn fetch_activity(&self, username: &str) -> Result<UserActivity, CoreError> {
        let posts_path = format!("/user/{username}/submitted.json");
        let comments_path = format!("/user/{username}/comments.json");

        let (posts_result, comments_result) = tokio::join!(
            self.get_listing::<RedditPostData>(&posts_path),
            self.get_listing::<RedditCommentData>(&comments_path),
        );

        let posts = posts_result?
            .map(|listing| {
                listing
                    .data
                    .children
                    .into_iter()
                    .map(|child| Post {
                        title: child.data.title,
                        subreddit: child.data.subreddit,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let comments = comments_result?
            .map(|listing| {
                listing
                    .data
                    .children
                    .into_iter()
                    .map(|child| Comment {
                        subreddit: child.data.subreddit,
                        comment: child.data.body,
                        post_title: child.data.link_title,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let activity = UserActivity { posts, comments };
        info!(
            "Aggregated {} posts and {} comments for u/{}",
            activity.posts.len(),
            activity.comments.len(),
            username
        );
        Ok(activity)
    }

    /// Fetches and normalizes a user's `about.json`. Unlike the listing
    /// fetches, any non-success status fails the call.
    pub async fn fetch_profile(&self, username: &str) -> Result<ProfileSummary, CoreError> {
        let path = format!("/user/{username}/about.json");
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(RedditApiError::RequestFailed {
                status_code: response.status().as_u16(),
                resource: path,
            }
            .into());
        }

        let about: RedditListingChild<RedditAboutData> =
            response.json().await.map_err(|e| {
                warn!("Failed to parse about.json for u/{}: {}", username, e);
                RedditApiError::InvalidResponse {
                    details: format!("Failed to parse profile for u/{username}"),
                }
            })?;
        let about = about.data;

        let avatar = if about.snoovatar_img.is_empty() {
            default_avatar_url()
        } else {
            about.snoovatar_img.clone()
        };

        debug!("Retrieved profile for u/{}", username);
        Ok(ProfileSummary {
            title: about.subreddit.title,
            display_name: about.subreddit.display_name_prefixed,
            comment_karma: about.comment_karma,
            link_karma: about.link_karma,
            description: about.subreddit.public_description,
            created: about.created_utc as i64,
            avatar,
            premium: about.is_gold,
            icon_img: about.icon_img,
            name: about.name,
            banner_img: about.subreddit.banner_img,
        })
    }
}

/// Timed-out requests get their own error kind; everything else stays a
/// plain network error.
fn map_send_error(e: reqwest::Error) -> CoreError {
    if e.is_timeout() {
        RedditApiError::RequestTimeout.into()
    } else {
        e.into()
    }
}

/// One of Reddit's stock default avatars, picked at random. Presentation
/// nicety only.
fn default_avatar_url() -> String {
    let index = fastrand::usize(..DEFAULT_AVATAR_VARIANTS);
    format!("https://www.redditstatic.com/avatars/defaults/v2/avatar_default_{index}.png")
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_default_avatar_url_in_range() {
        for _ in 0..32 {
            let url = default_avatar_url();
            assert!(url.starts_with("https://www.redditstatic.com/avatars/defaults/v2/"));
            let index: usize = url
                .trim_start_matches(
                    "https://www.redditstatic.com/avatars/defaults/v2/avatar_default_",
                )
                .trim_end_matches(".png")
                .parse()
                .unwrap();
            assert!(index < DEFAULT_AVATAR_VARIANTS);
        }
    }

    #[test]
    fn test_comment_listing_deserializes_without_link_title() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "children": [
                    { "kind": "t1", "data": { "subreddit": "rust", "body": "hello" } }
                ],
                "after": null,
                "before": null,
                "dist": 1
            }
        }"#;

        let listing: RedditListing<RedditCommentData> = serde_json::from_str(json).unwrap();
        assert_eq!(listing.data.children.len(), 1);
        assert_eq!(listing.data.children[0].data.link_title, "");
    }
}
