use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::interfaces::cli::{self, Cli};

/// Entry point shared by the binary: logging first, then the command
pub async fn run(cli: Cli) -> i32 {
    dotenvy::dotenv().ok();
    init_tracing(&cli.log_level);

    match cli::dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("Error: {}", err);
            1
        }
    }
}

/// RUST_LOG wins over `--log-level`; logs go to stderr so stdout stays CSV
fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
