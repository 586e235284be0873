/// CLI Module
///
/// Command-line interface configuration using clap.
use clap::Parser;

use crate::models::SortMode;
use crate::pipeline::DEFAULT_LIMIT;

/// Reddit Post Fetcher - ETL Pipeline
///
/// Extract, filter, and load Reddit posts into a local SQLite database
#[derive(Parser, Debug)]
#[command(name = "reddit-post-fetcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Site to extract data from (currently only `reddit`)
    #[arg(long, value_name = "SOURCE", default_value = "reddit")]
    pub source: String,

    /// SubReddit to pull from
    #[arg(short = 'c', long, value_name = "NAME", default_value = "all")]
    pub community: String,

    /// Sort method for posts
    #[arg(long, value_enum, value_name = "SORT", default_value_t = SortMode::Hot)]
    pub sort: SortMode,

    /// Filter to apply to extracted posts (zero, random, discussion, popular)
    #[arg(long, value_name = "FILTER", default_value = "zero")]
    pub filter: String,

    /// Number of posts to request
    #[arg(short = 'n', long, value_name = "COUNT", default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Database connection URL (overrides DATABASE_URL env var)
    #[arg(short = 'd', long, value_name = "URL")]
    pub database_url: Option<String>,

    /// Drop and recreate the posts table, then exit
    #[arg(long)]
    pub reset_db: bool,
}

impl Cli {
    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.limit == 0 {
            anyhow::bail!("Limit must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let cli = Cli::parse_from(["reddit-post-fetcher"]);

        assert_eq!(cli.source, "reddit");
        assert_eq!(cli.community, "all");
        assert_eq!(cli.sort, SortMode::Hot);
        assert_eq!(cli.filter, "zero");
        assert_eq!(cli.limit, DEFAULT_LIMIT);
        assert!(!cli.reset_db);
    }

    #[test]
    fn test_validation_rejects_zero_limit() {
        let cli = Cli::parse_from(["reddit-post-fetcher", "--limit", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_sort_values_parse() {
        let cli = Cli::parse_from(["reddit-post-fetcher", "--sort", "top"]);
        assert_eq!(cli.sort, SortMode::Top);
    }
}
