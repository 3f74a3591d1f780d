// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket server feeding UI events to the desktop shell.
//!
//! Serves a single route, `GET /ws`, that upgrades to a WebSocket and
//! streams every event the [`ShellNotifier`] broadcasts from that point
//! on. The feed is one-way; anything a client sends is ignored.

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use txbot_config::model::ShellConfig;
use txbot_core::TxbotError;

use crate::notifier::ShellNotifier;

/// A bound but not yet running shell server.
pub struct ShellServer {
    listener: tokio::net::TcpListener,
    router: Router,
}

impl ShellServer {
    /// Binds the configured listen address.
    pub async fn bind(config: &ShellConfig, notifier: ShellNotifier) -> Result<Self, TxbotError> {
        let listener = tokio::net::TcpListener::bind(&config.listen_addr)
            .await
            .map_err(|e| TxbotError::Channel {
                message: format!("failed to bind shell feed to {}: {e}", config.listen_addr),
                source: Some(Box::new(e)),
            })?;

        let router = Router::new()
            .route("/ws", get(ws_handler))
            .with_state(notifier);

        Ok(Self { listener, router })
    }

    /// The actual bound address (useful with port 0).
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, TxbotError> {
        self.listener.local_addr().map_err(|e| TxbotError::Channel {
            message: format!("shell feed has no local address: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Serves connections until the process shuts down.
    pub async fn serve(self) -> Result<(), TxbotError> {
        if let Ok(addr) = self.listener.local_addr() {
            info!(%addr, "shell event feed listening");
        }
        axum::serve(self.listener, self.router)
            .await
            .map_err(|e| TxbotError::Channel {
                message: format!("shell feed server error: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(notifier): State<ShellNotifier>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, notifier))
}

/// Forwards broadcast events to one shell client until it disconnects.
async fn handle_socket(socket: WebSocket, notifier: ShellNotifier) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = notifier.subscribe();
    debug!("shell client connected");

    // Drain (and discard) client frames so closes are noticed.
    let reader = tokio::spawn(async move {
        while let Some(Ok(frame)) = receiver.next().await {
            if matches!(frame, Message::Close(_)) {
                break;
            }
        }
    });

    loop {
        match events.recv().await {
            Ok(json) => {
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "shell client lagging, events dropped");
            }
            Err(RecvError::Closed) => break,
        }
    }

    reader.abort();
    debug!("shell client disconnected");
}
