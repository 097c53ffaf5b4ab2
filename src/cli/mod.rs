use anyhow::Result;
use console::style;

use crate::core::config::AppConfig;
use crate::core::connectors::ConnectorRegistry;
use crate::core::terminal;
use crate::interfaces::web::WebServer;
use crate::logging;

fn print_help() {
    terminal::print_banner();
    println!("  {}", style("Options").bold());
    println!("    --host <addr>   Address to bind (default: MINDGATE_HOST or 127.0.0.1)");
    println!("    --port <port>   Port to bind (default: MINDGATE_PORT or 8000)");
    println!("    --help, -h      Show this help message");
    println!();
    println!("  {}", style("Environment").bold());
    println!("    MINDSDB_API_KEY   API key for the hosted gateway (required)");
    println!("    MINDSDB_API_URL   Gateway base URL (default: https://llm.mdb.ai)");
    println!("    SECRET_KEY        Session signing key (random per process if unset)");
    println!(
        "\n {} {} [--host <addr>] [--port <port>]\n",
        style("Usage:").bold(),
        style("mindgate").green()
    );
}

pub(crate) fn parse_server_flags(
    args: &[String],
    start: usize,
    mut host: String,
    mut port: u16,
) -> (String, u16) {
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or(port);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--host" => {
                if i + 1 < args.len() {
                    host = args[i + 1].clone();
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    (host, port)
}

fn wants_help(args: &[String]) -> bool {
    args.iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "help" | "--help" | "-h"))
}

pub async fn run_main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if wants_help(&args) {
        print_help();
        return Ok(());
    }

    dotenvy::dotenv().ok();
    logging::init();

    let mut config = AppConfig::from_env()?;
    (config.host, config.port) = parse_server_flags(&args, 1, config.host, config.port);
    tracing::debug!("Loaded configuration: {:?}", config);

    let connectors = ConnectorRegistry::load()?;
    let server = WebServer::new(&config, connectors);

    terminal::print_banner();
    terminal::print_link("Chat", &format!("http://{}", server.address()));
    terminal::print_status("Gateway", &config.api_url);
    terminal::print_status(
        "Press Ctrl+C to stop the server.",
        &format!("{}", style("Ctrl+C").bold().yellow()),
    );
    println!();

    server.serve().await
}
