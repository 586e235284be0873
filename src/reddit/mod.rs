/// Reddit Client Module
///
/// This module handles all interactions with the Reddit API. It wraps a
/// reqwest client, performs the OAuth2 client-credentials handshake, and
/// exposes the paged listing reads used by the extract stage.
use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::RedditCredentials;
use crate::models::SortMode;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";

/// Largest listing page the Reddit API will serve per request.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug)]
pub struct RedditClient {
    http: reqwest::Client,
    access_token: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Listing envelope returned by the subreddit endpoints.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    /// Cursor for the next page; `None` when the listing is exhausted.
    pub after: Option<String>,
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
pub struct ListingChild {
    pub data: RawSubmission,
}

/// Submission fields as served by the listing endpoint.
///
/// `selftext` is absent for some link posts, so it defaults to empty.
#[derive(Debug, Deserialize)]
pub struct RawSubmission {
    pub id: String,
    pub subreddit: String,
    pub title: String,
    pub score: i64,
    pub url: String,
    pub num_comments: i64,
    pub created_utc: f64,
    #[serde(default)]
    pub selftext: String,
}

impl RedditClient {
    /// Authenticate against Reddit and return a ready client.
    ///
    /// Runs the OAuth2 client-credentials grant; a failed handshake is a
    /// startup error and doubles as the connection test.
    pub async fn connect(credentials: &RedditCredentials) -> Result<Self> {
        let http = reqwest::Client::new();

        let response = http
            .post(TOKEN_URL)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header(reqwest::header::USER_AGENT, &credentials.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("Failed to reach the Reddit token endpoint")?
            .error_for_status()
            .context("Reddit rejected the client credentials")?;

        let token: TokenResponse = response.json().await.context("Failed to parse the Reddit token response")?;

        tracing::info!("Authenticated against the Reddit API");
        Ok(Self { http, access_token: token.access_token, user_agent: credentials.user_agent.clone() })
    }

    /// Fetch one listing page for a community.
    ///
    /// `limit` is capped at [`MAX_PAGE_SIZE`] by the API itself; `after` is
    /// the pagination cursor from the previous page.
    pub async fn listing(&self, community: &str, sort: SortMode, limit: u32, after: Option<&str>) -> Result<Listing> {
        tracing::debug!("Fetching /r/{}/{} (limit {})", community, sort, limit);

        let url = format!("{}/r/{}/{}", API_BASE, community, sort);

        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string()), ("raw_json", "1".to_string())];
        if sort == SortMode::Top {
            // `top` always uses the all-time window.
            query.push(("t", "all".to_string()));
        }
        if let Some(cursor) = after {
            query.push(("after", cursor.to_string()));
        }

        let listing = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&query)
            .send()
            .await
            .context(format!("Failed to fetch listing for /r/{}", community))?
            .error_for_status()
            .context(format!("Reddit returned an error for /r/{}", community))?
            .json::<Listing>()
            .await
            .context("Failed to parse listing response")?;

        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_envelope() {
        let raw = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_abc123",
                "children": [
                    {
                        "kind": "t3",
                        "data": {
                            "id": "abc123",
                            "subreddit": "rust",
                            "title": "A post title",
                            "score": 42,
                            "url": "https://example.com/post",
                            "num_comments": 7,
                            "created_utc": 1700000000.0,
                            "selftext": "body text"
                        }
                    }
                ]
            }
        }"#;

        let listing: Listing = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.data.after.as_deref(), Some("t3_abc123"));
        assert_eq!(listing.data.children.len(), 1);

        let post = &listing.data.children[0].data;
        assert_eq!(post.id, "abc123");
        assert_eq!(post.score, 42);
        assert_eq!(post.num_comments, 7);
    }

    #[test]
    fn test_missing_selftext_defaults_to_empty() {
        let raw = r#"{
            "id": "xyz",
            "subreddit": "pics",
            "title": "A link post",
            "score": 1,
            "url": "https://example.com/image.png",
            "num_comments": 0,
            "created_utc": 1700000000.0
        }"#;

        let post: RawSubmission = serde_json::from_str(raw).unwrap();
        assert!(post.selftext.is_empty());
    }
}
