//! Interactive chat REPL.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use unimind_application::StudyAssistant;
use unimind_core::UnimindError;
use unimind_core::chat::{
    IgnoreReason, Message, Sender, ShortcutOutcome, SubmitOutcome, count_by_sender,
};
use unimind_core::navigation::Page;
use unimind_core::upload::{AnalysisOutcome, SkipReason, UploadId};

use super::analyze::commit_when_uploaded;
use crate::render;

const COMMANDS: [&str; 11] = [
    "/s", "/f", "/upload", "/files", "/remove", "/analyze", "/search", "/page", "/help", "/quit",
    "/exit",
];

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Say(String),
    Suggestion(usize),
    Shortcut(Option<String>),
    Upload(Vec<PathBuf>),
    Files,
    Remove(String),
    Analyze,
    Search(String),
    Page(Option<String>),
    Help,
    Quit,
    /// Known command with bad arguments; holds the usage line.
    Usage(&'static str),
    Unknown(String),
}

/// Parses one input line. Blank lines yield `None`.
fn parse(line: &str) -> Option<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if matches!(line, "quit" | "exit") {
        return Some(ReplCommand::Quit);
    }
    if !line.starts_with('/') {
        return Some(ReplCommand::Say(line.to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let parsed = match command {
        "/s" => match rest.parse::<usize>() {
            Ok(n) if n > 0 => ReplCommand::Suggestion(n),
            _ => ReplCommand::Usage("/s <n>"),
        },
        "/f" => ReplCommand::Shortcut(arg),
        "/upload" if rest.is_empty() => ReplCommand::Usage("/upload <path>..."),
        "/upload" => ReplCommand::Upload(rest.split_whitespace().map(PathBuf::from).collect()),
        "/files" => ReplCommand::Files,
        "/remove" => match arg {
            Some(arg) => ReplCommand::Remove(arg),
            None => ReplCommand::Usage("/remove <n|id>"),
        },
        "/analyze" => ReplCommand::Analyze,
        "/search" => match arg {
            Some(query) => ReplCommand::Search(query),
            None => ReplCommand::Usage("/search <question>"),
        },
        "/page" => ReplCommand::Page(arg),
        "/help" => ReplCommand::Help,
        "/quit" | "/exit" => ReplCommand::Quit,
        other => ReplCommand::Unknown(other.to_string()),
    };
    Some(parsed)
}

/// rustyline helper providing slash-command completion, highlighting, and hints.
#[derive(Clone, Default)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

pub async fn run(assistant: &StudyAssistant) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== UniMind AI ===".bright_magenta().bold());
    match assistant.restore_session().await {
        Ok(Some(profile)) => println!("{}", format!("Welcome back, {}!", profile.first_name()).bright_green()),
        Ok(None) => render::info("Not signed in."),
        Err(e) => render::error(&format!("Could not restore session: {e}")),
    }
    render::info("Type a question, or /help for commands.");
    println!();

    for message in assistant.conversation().messages().await {
        render::print_message(&message);
    }
    show_shortcuts(assistant).await;

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                render::warn("CTRL-C detected. Type /quit to exit.");
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(err) => {
                render::error(&format!("Error: {err:?}"));
                break;
            }
        };

        let Some(command) = parse(&line) else {
            continue;
        };
        let _ = rl.add_history_entry(line.as_str());

        if command == ReplCommand::Quit {
            break;
        }
        handle(assistant, command).await;
    }

    let messages = assistant.conversation().messages().await;
    println!(
        "{}",
        format!(
            "Goodbye! {} question(s), {} answer(s) this session.",
            count_by_sender(&messages, Sender::User),
            count_by_sender(&messages, Sender::Assistant)
        )
        .bright_green()
    );
    Ok(())
}

async fn handle(assistant: &StudyAssistant, command: ReplCommand) {
    let conversation = assistant.conversation();
    match command {
        ReplCommand::Say(text) => {
            render::info("Thinking...");
            let outcome = conversation.submit_user_text(&text).await;
            show_outcome(assistant, outcome).await;
        }
        ReplCommand::Suggestion(n) => {
            let messages = conversation.messages().await;
            match suggestion_at(&messages, n) {
                Some(text) => {
                    println!("{}", format!("> {text}").green());
                    let outcome = conversation.submit_suggestion(&text).await;
                    show_outcome(assistant, outcome).await;
                }
                None => render::warn(&format!("No suggestion #{n}.")),
            }
        }
        ReplCommand::Shortcut(None) => {
            for shortcut in conversation.shortcuts() {
                render::info(&format!("  {:<18} {}", shortcut.id, shortcut.label));
            }
        }
        ReplCommand::Shortcut(Some(id)) => {
            if !conversation.shortcuts_available().await {
                render::warn("Shortcuts are available after an assistant reply.");
                return;
            }
            match conversation.submit_feature_shortcut(&id).await {
                Ok(ShortcutOutcome::Navigated(page)) => show_page(page),
                Ok(ShortcutOutcome::Prompted(outcome)) => show_outcome(assistant, outcome).await,
                Err(e) => render::error(&e.to_string()),
            }
        }
        ReplCommand::Upload(paths) => match assistant.upload_paths(&paths).await {
            Ok(ids) => {
                render::info(&format!("Added {} file(s).", ids.len()));
                render::print_uploads(&assistant.uploads().uploads().await);
            }
            Err(e) => render::error(&e.to_string()),
        },
        ReplCommand::Files => render::print_uploads(&assistant.uploads().uploads().await),
        ReplCommand::Remove(arg) => {
            let uploads = assistant.uploads().uploads().await;
            let id = match arg.parse::<usize>() {
                Ok(n) => uploads.get(n.wrapping_sub(1)).map(|u| u.id.clone()),
                Err(_) => Some(UploadId::from(arg.as_str())),
            };
            let removed = match id {
                Some(id) => assistant.uploads().remove_file(&id).await,
                None => false,
            };
            if removed {
                render::info("Removed.");
            } else {
                render::warn(&format!("No pending file {arg}."));
            }
        }
        ReplCommand::Analyze => analyze(assistant).await,
        ReplCommand::Search(query) => {
            render::info("Searching...");
            if let Some(result) = assistant.smart_search(&query).await {
                println!("{}", format!("Q: {}", result.query).bright_magenta().bold());
                render::print_markdown(&result.answer);
                println!();
            }
        }
        ReplCommand::Page(None) => {
            render::info(&format!("Current page: {}", assistant.current_page()));
            let labels: Vec<&str> = Page::ALL.iter().map(Page::menu_label).collect();
            render::info(&format!("Pages: {}", labels.join(", ")));
        }
        ReplCommand::Page(Some(label)) => show_page(assistant.navigate_to_menu(&label)),
        ReplCommand::Help => print_help(),
        ReplCommand::Usage(usage) => render::warn(&format!("Usage: {usage}")),
        ReplCommand::Unknown(command) => render::warn(&format!("Unknown command {command}. Try /help.")),
        ReplCommand::Quit => {}
    }
}

async fn analyze(assistant: &StudyAssistant) {
    render::info("Analyzing...");
    match commit_when_uploaded(assistant).await {
        Ok(AnalysisOutcome::Completed { .. }) => {
            let messages = assistant.conversation().messages().await;
            let start = messages.len().saturating_sub(2);
            for message in &messages[start..] {
                render::print_message(message);
            }
            show_page(assistant.current_page());
        }
        Ok(AnalysisOutcome::Skipped(SkipReason::NothingPending)) => {
            render::warn("No files to analyze. Use /upload first.");
        }
        Ok(AnalysisOutcome::Skipped(reason)) => {
            render::warn(&format!("Analysis skipped: {reason:?}"));
        }
        Err(e @ UnimindError::NoSupportedFiles) => render::error(&e.to_string()),
        Err(e) => render::error(&format!("Analysis failed: {e}")),
    }
}

async fn show_outcome(assistant: &StudyAssistant, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Replied { reply, .. } => {
            render::print_message(&reply);
            show_shortcuts(assistant).await;
        }
        SubmitOutcome::Ignored(IgnoreReason::Busy) => {
            render::warn("Still waiting for the previous reply.");
        }
        SubmitOutcome::Ignored(IgnoreReason::EmptyInput) => {}
    }
}

async fn show_shortcuts(assistant: &StudyAssistant) {
    let conversation = assistant.conversation();
    if conversation.shortcuts_available().await {
        render::print_shortcuts(conversation.shortcuts());
    }
}

fn show_page(page: Page) {
    render::info(&format!("Now on: {page}"));
    if page == Page::UploadNotes {
        render::info("Add files with /upload <path>..., then /analyze.");
    }
}

/// Text of the n-th (1-based) chip on the latest message that has chips.
fn suggestion_at(messages: &[Message], n: usize) -> Option<String> {
    messages
        .iter()
        .rev()
        .find_map(|m| m.suggestions.as_ref())
        .and_then(|chips| chips.get(n.checked_sub(1)?))
        .cloned()
}

fn print_help() {
    let rows = [
        ("<text>", "Ask UniMind AI"),
        ("/s <n>", "Send suggestion n"),
        ("/f [id]", "Use a feature shortcut (no id lists them)"),
        ("/upload <path>...", "Add .txt or image files"),
        ("/files", "List pending files"),
        ("/remove <n|id>", "Drop a pending file"),
        ("/analyze", "Analyze pending files"),
        ("/search <question>", "Quick answer outside the chat"),
        ("/page [label]", "Show or change the current page"),
        ("/quit", "Exit"),
    ];
    for (command, description) in rows {
        println!("  {} {}", format!("{command:<20}").bright_cyan(), description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_said() {
        assert_eq!(parse("  what is a pointer? "), Some(ReplCommand::Say("what is a pointer?".into())));
        assert_eq!(parse("   "), None);
        assert_eq!(parse("exit"), Some(ReplCommand::Quit));
    }

    #[test]
    fn test_suggestion_needs_positive_index() {
        assert_eq!(parse("/s 2"), Some(ReplCommand::Suggestion(2)));
        assert_eq!(parse("/s 0"), Some(ReplCommand::Usage("/s <n>")));
        assert_eq!(parse("/s x"), Some(ReplCommand::Usage("/s <n>")));
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            parse("/upload a.txt  b.png"),
            Some(ReplCommand::Upload(vec!["a.txt".into(), "b.png".into()]))
        );
        assert_eq!(parse("/upload"), Some(ReplCommand::Usage("/upload <path>...")));
        assert_eq!(parse("/f viva-mode"), Some(ReplCommand::Shortcut(Some("viva-mode".into()))));
        assert_eq!(parse("/f"), Some(ReplCommand::Shortcut(None)));
        assert_eq!(parse("/search big O notation"), Some(ReplCommand::Search("big O notation".into())));
        assert_eq!(parse("/page Viva Mode"), Some(ReplCommand::Page(Some("Viva Mode".into()))));
        assert_eq!(parse("/remove 1"), Some(ReplCommand::Remove("1".into())));
        assert_eq!(parse("/bogus"), Some(ReplCommand::Unknown("/bogus".into())));
    }

    #[test]
    fn test_suggestion_at_uses_latest_chips() {
        let messages = vec![
            Message::assistant("msg-1", "a").with_suggestions(["old"]),
            Message::user("msg-2", "b"),
            Message::assistant("msg-3", "c").with_suggestions(["first", "second"]),
            Message::user("msg-4", "d"),
        ];
        assert_eq!(suggestion_at(&messages, 2), Some("second".to_string()));
        assert_eq!(suggestion_at(&messages, 3), None);
        assert_eq!(suggestion_at(&messages, 0), None);
    }
}
