use anyhow::{Context, Result};
use database::{db::create_connection, services::fts_course::FtsCourseService};
use log::info;
use models::season_code::validate_season_code;
use std::env;

/// Searches the evaluation comments of a season and prints the matching courses as JSON
///
/// Usage: `fts-courses <SEASON_CODE> [KEYWORD]`
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let season_code = validate_season_code(args.next().as_deref())?;
    let keyword = args.next().unwrap_or_default();

    let db = create_connection()
        .await
        .context("Failed to connect to the database")?;

    let courses = FtsCourseService::get_fts_courses(&db, &season_code, &keyword).await?;
    info!(
        "Found {} courses in season {season_code} for {keyword:?}",
        courses.len()
    );

    println!("{}", serde_json::to_string_pretty(&courses)?);
    Ok(())
}
