//! Initialize command.

use console::style;

use crate::config::Settings;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    if settings.portal.login_url.is_empty() || settings.portal.resource_url.is_empty() {
        println!(
            "{} No portal configured; add a [portal] section to portalgrab.toml",
            style("!").yellow()
        );
    }

    println!(
        "{} Initialized portalgrab in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    println!("  Downloads go to {}", settings.download_dir.display());

    Ok(())
}
