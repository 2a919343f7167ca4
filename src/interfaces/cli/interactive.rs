use std::io::Write;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::domain::description::FunctionalDescription;
use crate::domain::error::{AppError, Result};
use crate::domain::session::{GenerationSession, HistoryEntry};
use crate::infrastructure::csv::read_preview;
use crate::infrastructure::storage::write_csv_artifact;

use super::args::InteractiveArgs;
use super::commands::{report_outcome, resolve_output_dir, Console};
use super::render::render_preview;
use super::state::AppState;

const HELP: &str = "\
Type a functional description (finish with an empty line) to refine it, or use a command:
  :refine <text>     refine a description
  :generate [text]   generate test cases from the last refined description, or from <text> as-is
  :history           list CSVs generated in this session
  :show [N]          preview entry N (default: latest)
  :save [N]          write entry N (default: latest) to the output directory
  :clear             forget the current description
  :help              show this help
  :quit              leave the session";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Plain line that belongs to a description being typed
    Text(String),
    Refine(String),
    Generate(Option<String>),
    History,
    Show(Option<usize>),
    Save(Option<usize>),
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub(crate) fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Text(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let text_arg = (!arg.is_empty()).then(|| arg.to_string());

    match name.to_lowercase().as_str() {
        "refine" | "r" => match text_arg {
            Some(text) => Command::Refine(text),
            None => Command::Unknown(":refine needs a description".to_string()),
        },
        "generate" | "g" => Command::Generate(text_arg),
        "history" | "h" => Command::History,
        "show" => parse_index(arg).map_or_else(Command::Unknown, Command::Show),
        "save" | "s" => parse_index(arg).map_or_else(Command::Unknown, Command::Save),
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(format!("Unknown command :{}", other)),
    }
}

fn parse_index(arg: &str) -> std::result::Result<Option<usize>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.parse::<usize>()
        .map(Some)
        .map_err(|_| format!("Not a history number: {}", arg))
}

pub async fn run_interactive(state: &AppState, args: InteractiveArgs) -> Result<()> {
    let output_dir = resolve_output_dir(args.output_dir, &state.config);
    let mut session = GenerationSession::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Vec<String> = Vec::new();

    println!("{}", HELP);
    loop {
        print!("{}", if pending.is_empty() { "casegen> " } else { "... " });
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Command::Text(text) => {
                pending.push(text);
                continue;
            }
            Command::Empty if !pending.is_empty() => {
                Command::Refine(std::mem::take(&mut pending).join("\n"))
            }
            command => command,
        };

        if command == Command::Clear {
            pending.clear();
        }
        match command {
            Command::Quit => break,
            command => {
                if let Err(err) = handle(state, &mut session, &output_dir, command).await {
                    warn!(error = %err, "Command failed");
                    println!("Error: {}", err);
                }
            }
        }
    }
    Ok(())
}

async fn handle(
    state: &AppState,
    session: &mut GenerationSession,
    output_dir: &Path,
    command: Command,
) -> Result<()> {
    let console = Console::new(false);
    match command {
        Command::Refine(text) => {
            let description = FunctionalDescription::parse(&text)?;
            let refined = state
                .generator
                .refine(&state.stages.refine, &description)
                .await?;
            session.record_refined(description.as_str(), &refined);
            println!("{}\n\nUse :generate to create the test cases.", refined);
        }
        Command::Generate(text) => {
            let source = match text {
                Some(text) => text,
                None => session.last_refined.clone().ok_or_else(|| {
                    AppError::ValidationError(
                        "Nothing refined yet: type a description first".to_string(),
                    )
                })?,
            };
            let outcome = state
                .generator
                .generate(&state.stages.generate, &source)
                .await?;
            report_outcome(&console, &outcome);

            session.record_csv(outcome.history_entry());
            println!(
                "Stored as entry {}. Use :save to write it.",
                session.history().len()
            );
        }
        Command::History => {
            if session.history().is_empty() {
                println!("No CSV generated yet.");
            }
            for (idx, entry) in session.history().iter().enumerate() {
                println!(
                    "{:>3}  {}  {} row(s), {} incomplete",
                    idx + 1,
                    entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                    entry.row_count,
                    entry.incomplete_count
                );
            }
        }
        Command::Show(number) => {
            let entry = pick_entry(session, number)?;
            let (preview, warnings) = read_preview(&entry.csv)?;
            println!("{}", render_preview(&preview));
            for warning in warnings {
                println!("Preview warning: {}", warning);
            }
        }
        Command::Save(number) => {
            let entry = pick_entry(session, number)?;
            let path = write_csv_artifact(output_dir, entry, state.config.write_bom)?;
            println!("Saved {}", path.display());
        }
        Command::Clear => {
            session.last_description = None;
            session.last_refined = None;
            println!("Description cleared; history kept.");
        }
        Command::Help => println!("{}", HELP),
        Command::Unknown(message) => println!("{}\nType :help for the command list.", message),
        Command::Text(_) | Command::Empty | Command::Quit => {}
    }
    Ok(())
}

fn pick_entry(
    session: &GenerationSession,
    number: Option<usize>,
) -> Result<&HistoryEntry> {
    let entry = match number {
        Some(number) => session.entry(number),
        None => session.last_csv(),
    };
    entry.ok_or_else(|| {
        AppError::ValidationError(match number {
            Some(number) => format!("No history entry {}", number),
            None => "No CSV generated yet".to_string(),
        })
    })
}
