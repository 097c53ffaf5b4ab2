mod cli;
mod core;
mod interfaces;
mod logging;

use crate::core::terminal;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_main().await {
        tracing::error!("{}", e);
        terminal::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
