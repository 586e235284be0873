/// Configuration Module
///
/// Process-wide configuration, assembled once at startup and passed down
/// explicitly to the factories and pipeline. No module-level defaults.
use anyhow::{Context, Result};
use std::env;

/// Default database file, created on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://reddit.db?mode=rwc";

/// Credentials for the Reddit OAuth client-credentials flow.
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditCredentials {
    /// Read credentials from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: env::var("REDDIT_CLIENT_ID")
                .context("REDDIT_CLIENT_ID not found in environment. Please check your .env file")?,
            client_secret: env::var("REDDIT_CLIENT_SECRET")
                .context("REDDIT_CLIENT_SECRET not found in environment. Please check your .env file")?,
            user_agent: env::var("REDDIT_USER_AGENT")
                .context("REDDIT_USER_AGENT not found in environment. Please check your .env file")?,
        })
    }
}

/// Runtime configuration for one process.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub reddit: RedditCredentials,
}

impl Config {
    /// Build configuration from the environment.
    ///
    /// The database URL resolves as: CLI override, then `DATABASE_URL`, then
    /// [`DEFAULT_DATABASE_URL`]. Reddit credentials are required.
    pub fn from_env(database_url_override: Option<String>) -> Result<Self> {
        let database_url = database_url_override
            .or_else(|| env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Ok(Self { database_url, reddit: RedditCredentials::from_env()? })
    }
}
