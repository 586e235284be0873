/// Pipeline Module
///
/// Orchestrates the complete ETL pipeline: Extract → Transform → Load.
/// A run is strictly sequential and aborts on the first failing stage; the
/// caller (an external scheduler) owns any retry policy across runs.
use anyhow::{Context, Result};

use crate::db::UnitOfWork;
use crate::etl::{extract, load, transform::Transformation};
use crate::models::SortMode;
use crate::reddit::RedditClient;

/// Default number of posts requested per run.
pub const DEFAULT_LIMIT: u32 = 50;

enum Stage {
    Extract,
    Transform,
    Load,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Extract => write!(f, "Extract"),
            Stage::Transform => write!(f, "Transform"),
            Stage::Load => write!(f, "Load"),
        }
    }
}

/// Main ETL Pipeline
#[derive(Debug)]
pub struct Pipeline;

impl Pipeline {
    /// Create a new pipeline instance
    pub fn new() -> Self {
        Self
    }

    /// Run one extract → transform → load pass.
    ///
    /// Success carries no payload; any stage failure aborts the run wrapped
    /// with a context line naming the stage. Rows upserted before a load
    /// failure remain persisted (see [`UnitOfWork`]).
    pub async fn run(
        &self,
        uow: &mut UnitOfWork,
        client: Option<&RedditClient>,
        transformation: Transformation,
        community: &str,
        sort: SortMode,
        limit: u32,
    ) -> Result<()> {
        tracing::info!("Running Reddit ETL pipeline for /r/{} ({} posts, sort {})", community, limit, sort);

        let raw_posts = extract::extract(client, community, sort, limit)
            .await
            .with_context(|| format!("{} stage failed", Stage::Extract))?;

        let filtered_posts =
            transformation.apply(raw_posts).with_context(|| format!("{} stage failed", Stage::Transform))?;

        let rows_written =
            load::upsert_posts(uow, &filtered_posts).await.with_context(|| format!("{} stage failed", Stage::Load))?;

        tracing::info!("Pipeline run complete, {} rows written", rows_written);
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
