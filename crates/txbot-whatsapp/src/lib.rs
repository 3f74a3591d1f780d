// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp channel adapter for Txbot.
//!
//! The WhatsApp session itself (pairing, message delivery) lives in a local
//! bridge process; this crate speaks JSON frames to it over a WebSocket and
//! implements [`ChannelAdapter`] on top: a reader task feeds an internal
//! queue that `receive()` drains, and sends go straight out on the write
//! half of the socket.

pub mod frames;
pub mod qr;

use async_trait::async_trait;
use futures::stream::{SplitSink, StreamExt};
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use txbot_config::model::ChannelConfig;
use txbot_core::traits::{Adapter, ChannelAdapter};
use txbot_core::{AdapterType, ChannelEvent, ContactId, HealthStatus, TxbotError};

use crate::frames::{InboundFrame, OutboundFrame};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Channel adapter connected to the WhatsApp bridge.
pub struct BridgeChannel {
    config: ChannelConfig,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<ChannelEvent>>,
    inbound_tx: mpsc::Sender<ChannelEvent>,
    writer: tokio::sync::Mutex<Option<WsSink>>,
    reader_handle: Option<tokio::task::JoinHandle<()>>,
}

impl BridgeChannel {
    /// Creates a new bridge channel. No connection is made until
    /// [`connect`](ChannelAdapter::connect).
    pub fn new(config: ChannelConfig) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(100);
        Self {
            config,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            writer: tokio::sync::Mutex::new(None),
            reader_handle: None,
        }
    }

    async fn send_frame(&self, frame: &OutboundFrame) -> Result<(), TxbotError> {
        let json = serde_json::to_string(frame).map_err(|e| TxbotError::Channel {
            message: format!("failed to serialize bridge frame: {e}"),
            source: Some(Box::new(e)),
        })?;

        let mut writer = self.writer.lock().await;
        let sink = writer.as_mut().ok_or_else(|| TxbotError::Channel {
            message: "bridge not connected".into(),
            source: None,
        })?;
        sink.send(Message::Text(json.into()))
            .await
            .map_err(|e| TxbotError::Channel {
                message: format!("bridge send failed: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

/// Reader loop: parses bridge frames and feeds the inbound queue.
///
/// Malformed frames are logged and skipped; the loop ends when the socket
/// closes, which in turn closes the queue and makes `receive()` fail.
async fn read_bridge(
    mut reader: futures::stream::SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
    tx: mpsc::Sender<ChannelEvent>,
) {
    while let Some(result) = reader.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                warn!("bridge socket error: {e}");
                break;
            }
        };
        let event = match message {
            Message::Text(text) => match serde_json::from_str::<InboundFrame>(text.as_str()) {
                Ok(InboundFrame::Qr { code }) => match qr::pairing_data_url(&code) {
                    Ok(data_url) => ChannelEvent::PairingQr(data_url),
                    Err(e) => {
                        warn!("dropping unrenderable pairing QR: {e}");
                        continue;
                    }
                },
                Ok(InboundFrame::Ready) => ChannelEvent::Ready,
                Ok(frame @ InboundFrame::Message { .. }) => {
                    // into_message is infallible for the Message variant.
                    match frame.into_message() {
                        Some(inbound) => ChannelEvent::Message(inbound),
                        None => continue,
                    }
                }
                Err(e) => {
                    warn!("invalid bridge frame: {e}");
                    continue;
                }
            },
            Message::Close(_) => break,
            _ => continue,
        };
        if tx.send(event).await.is_err() {
            break;
        }
    }
    debug!("bridge reader loop ended");
}

#[async_trait]
impl Adapter for BridgeChannel {
    fn name(&self) -> &str {
        "whatsapp-bridge"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, TxbotError> {
        if self.writer.lock().await.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy("bridge not connected".into()))
        }
    }

    async fn shutdown(&self) -> Result<(), TxbotError> {
        debug!("bridge channel shutting down");
        if let Some(mut sink) = self.writer.lock().await.take() {
            // Best effort; the bridge may already be gone.
            let _ = sink.close().await;
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for BridgeChannel {
    async fn connect(&mut self) -> Result<(), TxbotError> {
        if self.reader_handle.is_some() {
            return Ok(()); // Already connected
        }

        info!(url = %self.config.bridge_url, "connecting to WhatsApp bridge");
        let (stream, _response) =
            connect_async(self.config.bridge_url.as_str())
                .await
                .map_err(|e| TxbotError::Channel {
                    message: format!("bridge connection failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

        let (sink, reader) = stream.split();
        *self.writer.lock().await = Some(sink);
        self.reader_handle = Some(tokio::spawn(read_bridge(reader, self.inbound_tx.clone())));
        Ok(())
    }

    async fn send_text(&self, to: &ContactId, text: &str) -> Result<(), TxbotError> {
        self.send_frame(&OutboundFrame::SendText {
            to: to.0.clone(),
            text: text.to_string(),
        })
        .await
    }

    async fn send_media(
        &self,
        to: &ContactId,
        path: &std::path::Path,
        caption: &str,
    ) -> Result<(), TxbotError> {
        self.send_frame(&OutboundFrame::SendMedia {
            to: to.0.clone(),
            path: path.to_string_lossy().into_owned(),
            caption: caption.to_string(),
        })
        .await
    }

    async fn receive(&self) -> Result<ChannelEvent, TxbotError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| TxbotError::Channel {
            message: "bridge connection closed".into(),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::SinkExt;
    use tokio::net::TcpListener;

    /// One-shot bridge stand-in: accepts a single WebSocket connection,
    /// pushes the given frames, then relays everything it receives back
    /// over the returned channel.
    async fn fake_bridge(frames: Vec<String>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (seen_tx, seen_rx) = mpsc::channel(16);

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let (mut sink, mut reader) = ws.split();
            for frame in frames {
                sink.send(Message::Text(frame.into())).await.unwrap();
            }
            while let Some(Ok(Message::Text(text))) = reader.next().await {
                if seen_tx.send(text.to_string()).await.is_err() {
                    break;
                }
            }
        });

        (format!("ws://{addr}"), seen_rx)
    }

    fn channel_for(url: String) -> BridgeChannel {
        BridgeChannel::new(ChannelConfig {
            bridge_url: url,
            ignored_contacts: Vec::new(),
        })
    }

    #[tokio::test]
    async fn receives_message_qr_and_ready_events() {
        let (url, _seen) = fake_bridge(vec![
            r#"{"type": "message", "contact_id": "51987654321@c.us", "text": "hola",
                "timestamp": "2026-01-10T12:00:00Z"}"#
                .into(),
            r#"{"type": "this is not a frame"#.into(),
            r#"{"type": "qr", "code": "2@abc"}"#.into(),
            r#"{"type": "ready"}"#.into(),
        ])
        .await;

        let mut channel = channel_for(url);
        channel.connect().await.unwrap();

        match channel.receive().await.unwrap() {
            ChannelEvent::Message(msg) => assert_eq!(msg.text, "hola"),
            other => panic!("expected message, got {other:?}"),
        }
        // The malformed frame is skipped, not surfaced.
        match channel.receive().await.unwrap() {
            ChannelEvent::PairingQr(data_url) => {
                assert!(data_url.starts_with("data:image/svg+xml;base64,"));
            }
            other => panic!("expected qr, got {other:?}"),
        }
        assert!(matches!(channel.receive().await.unwrap(), ChannelEvent::Ready));
    }

    #[tokio::test]
    async fn sends_are_framed_as_json() {
        let (url, mut seen) = fake_bridge(Vec::new()).await;
        let mut channel = channel_for(url);
        channel.connect().await.unwrap();

        let to = ContactId("51987654321@c.us".into());
        channel.send_text(&to, "hola 👋").await.unwrap();
        channel
            .send_media(&to, std::path::Path::new("assets/yape.png"), "scan")
            .await
            .unwrap();

        let first: serde_json::Value = serde_json::from_str(&seen.recv().await.unwrap()).unwrap();
        assert_eq!(first["type"], "send_text");
        assert_eq!(first["text"], "hola 👋");

        let second: serde_json::Value = serde_json::from_str(&seen.recv().await.unwrap()).unwrap();
        assert_eq!(second["type"], "send_media");
        assert_eq!(second["caption"], "scan");
    }

    #[tokio::test]
    async fn send_without_connect_is_a_channel_error() {
        let channel = channel_for("ws://127.0.0.1:9".into());
        let result = channel
            .send_text(&ContactId("x@c.us".into()), "hola")
            .await;
        assert!(matches!(result, Err(TxbotError::Channel { .. })));
    }

    #[tokio::test]
    async fn connect_failure_is_a_channel_error() {
        // Nothing listens on the discard port.
        let mut channel = channel_for("ws://127.0.0.1:9".into());
        assert!(matches!(
            channel.connect().await,
            Err(TxbotError::Channel { .. })
        ));
    }
}
