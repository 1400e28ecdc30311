use anyhow::{Result, bail};
use colored::Colorize;
use unimind_application::StudyAssistant;

use crate::render;

pub async fn run(assistant: &StudyAssistant, query: &str) -> Result<()> {
    println!("{}", "Searching...".bright_black());
    match assistant.smart_search(query).await {
        Some(result) => {
            println!("{}", format!("Q: {}", result.query).bright_magenta().bold());
            render::print_markdown(&result.answer);
            Ok(())
        }
        None => bail!("Search query is empty"),
    }
}
