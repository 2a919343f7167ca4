use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::application::use_cases::csv_sanitizer::CsvSanitizer;
use crate::application::use_cases::generate_cases::GenerationOutcome;
use crate::domain::description::FunctionalDescription;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMProvider;
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::storage::{artifact_bytes, read_text_file, write_csv_artifact, write_file};

use super::args::{AuthAction, AuthArgs, GenerateArgs, SanitizeArgs};
use super::render::{render_preview, render_summary};
use super::state::AppState;

/// Where human-readable reports go; stderr when stdout carries the CSV
#[derive(Clone, Copy)]
pub(crate) struct Console {
    csv_on_stdout: bool,
}

impl Console {
    pub(crate) fn new(csv_on_stdout: bool) -> Self {
        Self { csv_on_stdout }
    }

    pub(crate) fn say(&self, text: &str) {
        if self.csv_on_stdout {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}

pub async fn run_generate(state: &AppState, args: GenerateArgs) -> Result<()> {
    let raw = read_description(&args)?;
    let description = FunctionalDescription::parse(&raw)?;
    let console = Console::new(args.stdout);

    let outcome = state
        .generator
        .execute(&state.stages, &description, args.skip_refine)
        .await?;

    report_outcome(&console, &outcome);

    if args.stdout {
        print_csv(&outcome.sanitized.csv_text)?;
        return Ok(());
    }

    let output_dir = resolve_output_dir(args.output_dir, &state.config);
    let with_bom = state.config.write_bom && !args.no_bom;
    let path = write_csv_artifact(&output_dir, &outcome.history_entry(), with_bom)?;
    console.say(&format!("Saved {}", path.display()));
    Ok(())
}

/// Offline pass over a stored raw response
pub fn run_sanitize(config: &AppConfig, args: SanitizeArgs) -> Result<()> {
    let raw = read_text_file(&args.input)?;
    let sanitized = CsvSanitizer::new(config.sanitize.clone()).sanitize(&raw)?;
    let console = Console::new(args.output.is_none());

    console.say(&render_summary(&sanitized));

    match args.output {
        Some(path) => {
            let with_bom = config.write_bom && !args.no_bom;
            write_file(&path, &artifact_bytes(&sanitized.csv_text, with_bom))?;
            info!(path = %path.display(), rows = sanitized.table.len(), "Sanitized CSV written");
            console.say(&format!("Saved {}", path.display()));
        }
        None => print_csv(&sanitized.csv_text)?,
    }
    Ok(())
}

pub fn run_auth(config: &AppConfig, args: AuthArgs) -> Result<()> {
    let service = ConfigService::new();
    let provider: LLMProvider = config.provider;
    match args.action {
        AuthAction::Set { key } => {
            service.save_api_key(provider, &key)?;
            println!("API key stored for {}", provider);
        }
        AuthAction::Delete => {
            service.delete_api_key(provider)?;
            println!("API key removed for {}", provider);
        }
    }
    Ok(())
}

pub(crate) fn report_outcome(console: &Console, outcome: &GenerationOutcome) {
    if let Some(refined) = &outcome.refined {
        console.say("== Refined description ==");
        console.say(refined);
        console.say("");
    }
    if let Some(preview) = &outcome.sanitized.preview {
        console.say("== Preview ==");
        console.say(&render_preview(preview));
    }
    console.say(&render_summary(&outcome.sanitized));
}

pub(crate) fn resolve_output_dir(override_dir: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    override_dir.unwrap_or_else(|| config.output_dir.clone())
}

fn read_description(args: &GenerateArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.input {
        return read_description_file(path);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    if buffer.trim().is_empty() {
        return Err(AppError::ValidationError(
            "No description given: use --text, --input or pipe it on stdin".to_string(),
        ));
    }
    Ok(buffer)
}

fn read_description_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(AppError::ValidationError(format!(
            "Description file not found: {}",
            path.display()
        )));
    }
    read_text_file(path)
}

fn print_csv(csv_text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(csv_text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
