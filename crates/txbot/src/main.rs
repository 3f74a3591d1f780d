// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Txbot - WhatsApp auto-responder for the Tx Publicidad sales funnel.
//!
//! This is the binary entry point for the bot.

mod config_cmd;
mod serve;

use clap::{Parser, Subcommand};

/// Txbot - WhatsApp auto-responder for Tx Publicidad.
#[derive(Parser, Debug)]
#[command(name = "txbot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the auto-responder.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match txbot_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            txbot_config::render_errors(errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("txbot serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            config_cmd::print_config(&config);
        }
        None => {
            println!("txbot: use --help for available commands");
        }
    }
}
