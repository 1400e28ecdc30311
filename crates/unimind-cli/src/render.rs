//! Terminal rendering of conversation state.

use colored::Colorize;
use unimind_core::chat::{FeatureShortcut, Message, Sender};
use unimind_core::upload::{PendingUpload, format_bytes};

pub fn print_message(message: &Message) {
    match message.sender {
        Sender::User => {
            for line in message.text.lines() {
                println!("{}", format!("> {line}").green());
            }
        }
        Sender::Assistant => {
            println!("{}", "[UniMind AI]".bright_magenta());
            print_markdown(&message.text);
            if let Some(suggestions) = &message.suggestions {
                print_suggestions(suggestions);
            }
        }
    }
    println!();
}

pub fn print_markdown(text: &str) {
    for line in text.lines() {
        println!("{}", line.bright_blue());
    }
}

fn print_suggestions(suggestions: &[String]) {
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("  {}", format!("/s {} → {}", i + 1, suggestion).yellow());
    }
}

pub fn print_shortcuts(shortcuts: &[FeatureShortcut]) {
    let ids: Vec<&str> = shortcuts.iter().map(|s| s.id.as_str()).collect();
    println!("{}", format!("Shortcuts: /f {}", ids.join(" | ")).bright_black());
}

pub fn print_uploads(uploads: &[PendingUpload]) {
    if uploads.is_empty() {
        println!("{}", "No files pending.".bright_black());
        return;
    }
    for (i, upload) in uploads.iter().enumerate() {
        let status = if upload.is_complete() {
            "ready".green().to_string()
        } else {
            format!("{}%", upload.progress).yellow().to_string()
        };
        println!(
            "  {}. {} ({}, {}) [{}] {}",
            i + 1,
            upload.file.name,
            upload.file.mime_type,
            format_bytes(upload.file.size),
            status,
            upload.id.to_string().bright_black()
        );
    }
}

pub fn info(text: &str) {
    println!("{}", text.bright_black());
}

pub fn warn(text: &str) {
    println!("{}", text.yellow());
}

pub fn error(text: &str) {
    eprintln!("{}", text.red());
}
