//! One-shot fetch command.

use console::style;

use crate::config::Settings;
use crate::services::{FetchOutcome, FileDownloadService};

/// Run the fetch-and-download flow once and report the outcome.
pub async fn cmd_fetch(settings: &Settings, page: Option<&str>) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    let service = FileDownloadService::from_settings(settings, &ctx)?;
    let outcome = service.fetch_and_download(page).await;

    match outcome {
        FetchOutcome::Downloaded(_) => println!("{} {}", style("✓").green(), outcome),
        FetchOutcome::AlreadyDownloaded(_) | FetchOutcome::NoCandidates => {
            println!("{} {}", style("-").dim(), outcome)
        }
        _ => println!("{} {}", style("✗").red(), outcome),
    }

    Ok(())
}
