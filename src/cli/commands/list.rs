//! Download history listing.

use console::style;

use crate::config::Settings;

/// Print every downloaded file record.
pub async fn cmd_list(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;
    let files = ctx.downloaded_files().get_all().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if files.is_empty() {
        println!("{} No files downloaded yet", style("!").yellow());
        return Ok(());
    }

    for file in &files {
        println!(
            "{} {}",
            style(file.downloaded_at.format("%Y-%m-%d %H:%M:%S")).dim(),
            style(file.local_path.display()).bold()
        );
        println!("  {}", file.source_url);
    }
    println!("\n{} file(s)", files.len());

    Ok(())
}
