/// ETL Pipeline Module
///
/// Stage modules for the Extract, Transform, Load pipeline:
/// - Extract: Fetch posts from the Reddit API
/// - Transform: Apply the selected filter to the batch
/// - Load: Upsert the filtered posts into the SQLite database
pub mod extract;
pub mod load;
pub mod transform;

use anyhow::Result;

use crate::config::Config;
use crate::error::EtlError;
use crate::pipeline::Pipeline;
use crate::reddit::RedditClient;

/// Resolve a source name into an authenticated client and a pipeline.
///
/// `reddit` is the only supported source; the match below is the extension
/// point for additional platforms. Unknown names fail carrying the name.
pub async fn source_factory(source: &str, config: &Config) -> Result<(RedditClient, Pipeline)> {
    match source {
        "reddit" => {
            let client = RedditClient::connect(&config.reddit).await?;
            Ok((client, Pipeline::new()))
        }
        other => Err(EtlError::UnsupportedSource(other.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedditCredentials;

    #[tokio::test]
    async fn test_unknown_source_is_rejected() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            reddit: RedditCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                user_agent: "agent".to_string(),
            },
        };

        let err = source_factory("twitter", &config).await.unwrap_err();
        assert!(
            matches!(err.downcast_ref::<EtlError>(), Some(EtlError::UnsupportedSource(name)) if name == "twitter")
        );
    }
}
