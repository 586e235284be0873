/// Reddit Post Fetcher
///
/// An ETL pipeline for extracting, filtering, and loading Reddit post data.
mod cli;
mod config;
mod db;
mod error;
mod etl;
mod models;
mod pipeline;
mod reddit;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Config;
use db::Database;
use etl::{source_factory, transform::Transformation};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Cli::parse();
    args.validate()?;

    tracing::info!("Starting ETL.");
    println!("🚀 Starting Reddit Post Fetcher...");

    let config = Config::from_env(args.database_url.clone()).context("Failed to load configuration")?;

    println!("💾 Connecting to SQLite database...");
    let database = Database::new(&config.database_url).await.context("Failed to connect to SQLite database")?;
    database.test_connection().await.context("Database connection test failed")?;
    println!("✅ Database connected successfully!");

    if args.reset_db {
        tracing::info!("Resetting database schema.");
        database.drop_schema().await?;
        database.create_schema().await?;
        println!("✅ Database schema reset!");
        return Ok(());
    }

    database.create_schema().await.context("Failed to create database schema")?;

    // Resolve the filter before any network work so an unknown name fails
    // without touching the remote source or storage.
    let transformation = Transformation::from_name(&args.filter)?;

    tracing::info!("Retrieving ETL pipeline from factory.");
    let (client, pipeline) =
        source_factory(&args.source, &config).await.context("Failed to initialize the source")?;
    println!("✅ Reddit client authenticated!");

    tracing::info!("Running pipeline.");
    let mut uow = database.acquire_writer().await?;
    pipeline
        .run(&mut uow, Some(&client), transformation, &args.community, args.sort, args.limit)
        .await
        .context("Pipeline execution failed")?;

    tracing::info!("Pipeline completed.");
    println!("\n✨ Pipeline execution complete!");

    Ok(())
}
