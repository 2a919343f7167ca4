use clap::Parser;

use casegen_lib::interfaces::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = casegen_lib::app::run(cli).await;
    std::process::exit(code);
}
