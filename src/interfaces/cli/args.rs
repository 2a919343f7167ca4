use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::llm_config::LLMProvider;

#[derive(Parser, Debug)]
#[command(
    name = "casegen",
    version,
    about = "Turn functional descriptions into importable QA test-case CSV"
)]
pub struct Cli {
    /// Config file (default: ./casegen.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Override the configured provider
    #[arg(long, global = true, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Override the configured model
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refine a description and generate the test-case CSV
    Generate(GenerateArgs),
    /// Sanitize a saved raw model response without calling the model
    Sanitize(SanitizeArgs),
    /// Line-oriented session with history
    Interactive(InteractiveArgs),
    /// Manage API keys in the OS keyring
    Auth(AuthArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Read the functional description from a file
    #[arg(long, short, conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Functional description given inline
    #[arg(long, short)]
    pub text: Option<String>,

    /// Send the description straight to generation
    #[arg(long, default_value_t = false)]
    pub skip_refine: bool,

    /// Directory for the CSV artifact (overrides config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Print the CSV to stdout instead of writing a file
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Write the artifact without a byte-order mark
    #[arg(long, default_value_t = false)]
    pub no_bom: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SanitizeArgs {
    /// File holding the raw model response
    #[arg(long, short)]
    pub input: PathBuf,

    /// Destination file; stdout when omitted
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_bom: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InteractiveArgs {
    /// Directory for saved artifacts (overrides config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthAction {
    /// Store the API key for the selected provider
    Set { key: String },
    /// Remove the stored API key for the selected provider
    Delete,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProviderArg {
    Openrouter,
    Openai,
    Gemini,
}

impl From<ProviderArg> for LLMProvider {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Openrouter => LLMProvider::OpenRouter,
            ProviderArg::Openai => LLMProvider::OpenAI,
            ProviderArg::Gemini => LLMProvider::Gemini,
        }
    }
}
