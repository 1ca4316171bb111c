//! Stencil Server CLI
//!
//! Starts the HTTP server for schema-constrained text extraction.

use std::env;
use std::process;
use stencil_server::{config::ServerConfig, start_server, ServerError};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: stencil-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Stencil Server - Structured Extraction over HTTP");
    println!();
    println!("USAGE:");
    println!("    stencil-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    stencil-server --config config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - default_model: Model used when a request names none");
    println!("    - api_base_url: Optional OpenAI-compatible base URL override");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENAI_API_KEY     Provider credential, read at first extraction");
    println!();
}
