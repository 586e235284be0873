/// Extract Module
///
/// Handles fetching submissions from the Reddit API and converting them into
/// post records for the rest of the pipeline.
use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::error::EtlError;
use crate::models::{PostRecord, SortMode};
use crate::reddit::{RawSubmission, RedditClient, MAX_PAGE_SIZE};

/// Convert a raw listing submission into a post record.
///
/// `created_utc` arrives as epoch seconds; sub-second precision is dropped.
fn to_post_record(raw: RawSubmission) -> PostRecord {
    let created = DateTime::from_timestamp(raw.created_utc as i64, 0).unwrap_or_else(Utc::now);

    PostRecord {
        id: raw.id,
        community: raw.subreddit,
        title: raw.title,
        score: raw.score,
        url: raw.url,
        comments: raw.num_comments,
        created,
        text: raw.selftext,
    }
}

/// Extract up to `limit` posts from a community.
///
/// Pages through the listing with Reddit's `after` cursor, never requesting
/// more than `limit` records in total. Fewer than `limit` results is valid
/// (small communities, exhausted listings). Order is exactly as returned by
/// the API for the requested sort; no re-sorting happens here.
pub async fn extract(
    client: Option<&RedditClient>,
    community: &str,
    sort: SortMode,
    limit: u32,
) -> Result<Vec<PostRecord>> {
    tracing::info!("Extracting posts from /r/{} sorted by {}", community, sort);

    let client = client.ok_or(EtlError::MissingClient)?;

    let mut posts: Vec<PostRecord> = Vec::new();
    let mut after: Option<String> = None;

    while (posts.len() as u32) < limit {
        let page_size = std::cmp::min(limit - posts.len() as u32, MAX_PAGE_SIZE);
        let listing = client.listing(community, sort, page_size, after.as_deref()).await?;

        if listing.data.children.is_empty() {
            break;
        }

        for child in listing.data.children {
            posts.push(to_post_record(child.data));
            if posts.len() as u32 == limit {
                break;
            }
        }

        after = listing.data.after;
        if after.is_none() {
            break;
        }
    }

    tracing::info!("Extracted {} posts from /r/{}", posts.len(), community);
    Ok(posts)
}
