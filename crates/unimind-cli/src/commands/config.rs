use anyhow::{Context, Result};
use colored::Colorize;
use unimind_infrastructure::UnimindPaths;

pub async fn show(paths: &UnimindPaths) -> Result<()> {
    let config_file = paths.config_file()?;
    let secret_file = paths
        .ensure_secret_file()
        .await
        .context("Failed to prepare secret.json")?;

    println!("{} {}", "config:".bright_black(), config_file.display());
    println!("{} {}", "secret:".bright_black(), secret_file.display());
    println!(
        "{}",
        "Put your Gemini key in secret.json or export GEMINI_API_KEY.".bright_black()
    );
    Ok(())
}
