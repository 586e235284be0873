/// Data Models Module
///
/// This module defines the core data structures shared across the ETL stages:
/// the extracted post record and the listing sort modes the Reddit API
/// understands.
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One extracted Reddit submission.
///
/// Built by the extract stage, passed read-only through transform and load,
/// and discarded at the end of the run. `id` is Reddit's base-36 submission
/// id and the primary key in storage. `text` is empty for link-only posts.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostRecord {
    pub id: String,
    pub community: String,
    pub title: String,
    pub score: i64,
    pub url: String,
    pub comments: i64,
    pub created: DateTime<Utc>,
    pub text: String,
}

/// Listing order for a subreddit pull.
///
/// `Top` always queries the all-time window; the window is a fixed policy
/// choice, not caller-tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    Hot,
    New,
    Top,
}

impl SortMode {
    /// Path segment used by the listing endpoint.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
