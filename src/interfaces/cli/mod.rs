mod args;
mod commands;
mod interactive;
mod render;
mod state;

pub use args::{Cli, Commands};
pub use render::{render_preview, render_summary};
pub use state::AppState;

use crate::domain::error::Result;
use crate::infrastructure::bootstrap::{self, Overrides};

pub async fn dispatch(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        provider: cli.provider.map(Into::into),
        model: cli.model,
    };
    let config = bootstrap::load_config(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Commands::Sanitize(args) => commands::run_sanitize(&config, args),
        Commands::Auth(args) => commands::run_auth(&config, args),
        Commands::Generate(args) => {
            let state = bootstrap::setup(config)?;
            commands::run_generate(&state, args).await
        }
        Commands::Interactive(args) => {
            let state = bootstrap::setup(config)?;
            interactive::run_interactive(&state, args).await
        }
    }
}
