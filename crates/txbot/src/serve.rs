// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `txbot serve` command implementation.
//!
//! Wires the full bot together: JSON file stores, the optional OpenAI
//! fallback, the shell event feed, the WhatsApp bridge channel, and the
//! agent loop. Runs until SIGINT/SIGTERM.

use std::sync::Arc;

use tracing::{error, info};

use txbot_agent::{AgentLoop, shutdown};
use txbot_config::TxbotConfig;
use txbot_core::TxbotError;
use txbot_core::traits::{ChannelAdapter, CustomerStore, ResponderAdapter};
use txbot_engine::PolicyEngine;
use txbot_openai::FallbackResponder;
use txbot_shell::{ShellNotifier, ShellServer};
use txbot_whatsapp::BridgeChannel;

/// Runs the `txbot serve` command.
pub async fn run_serve(config: TxbotConfig) -> Result<(), TxbotError> {
    init_tracing(&config.agent.log_level);

    info!(agent_name = config.agent.name.as_str(), "starting txbot serve");

    // File-backed stores.
    let (customers, payments) = txbot_store::open_stores(&config.storage);
    let customers: Arc<dyn CustomerStore> = Arc::new(customers);
    let payments = Arc::new(payments);

    // Generative fallback, only when a key is configured.
    let responder = FallbackResponder::from_config(&config.openai)?
        .map(|responder| Arc::new(responder) as Arc<dyn ResponderAdapter>);
    if responder.is_none() {
        info!("openai fallback disabled (no api key configured)");
    }

    // Shell event feed.
    let notifier = ShellNotifier::new();
    let shell_server = ShellServer::bind(&config.shell, notifier.clone()).await?;
    tokio::spawn(async move {
        if let Err(e) = shell_server.serve().await {
            error!(error = %e, "shell event feed stopped");
        }
    });

    // WhatsApp bridge.
    let mut channel = BridgeChannel::new(config.channel.clone());
    channel.connect().await?;
    let channel: Arc<dyn ChannelAdapter + Send + Sync> = Arc::new(channel);

    let engine = PolicyEngine::new(customers, responder, &config).await?;

    let cancel = shutdown::install_signal_handler();
    let mut agent = AgentLoop::new(channel, engine, payments, Arc::new(notifier));
    agent.run(cancel).await?;

    info!("txbot serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("txbot={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
