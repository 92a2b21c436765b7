use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::{sync::mpsc, time};

use super::WebSocketManager;
use super::handler_trait::WsHandler;
use super::runtime::WsContext;

pub struct WsServerOptions {
    pub ws_ping_sec: u64,
    pub enable_app_ping: bool,
}

impl Default for WsServerOptions {
    fn default() -> Self {
        Self {
            ws_ping_sec: 30,
            enable_app_ping: true,
        }
    }
}

/// Drive one socket subscribed to `topic` until the client goes away.
///
/// Broadcasts on the topic are forwarded to the client, client text frames are
/// parsed into `H::In` and dispatched, and `{"type":"ping"}` is answered with a
/// `pong` event when `enable_app_ping` is set.
pub async fn serve_topic<H: WsHandler>(
    socket: WebSocket,
    manager: WebSocketManager,
    topic: String,
    handler: Arc<H>,
    opts: WsServerOptions,
) {
    let mut rx = manager.subscribe(&topic).await;

    let (mut sink, mut socket_rx) = socket.split();

    // Outbound queue and writer task
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(64);
    let writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let ctx = WsContext::new(topic.clone(), manager.clone(), out_tx.clone());

    // S→C: forward broadcasts on this topic
    let forward_task = {
        let out_tx = out_tx.clone();
        let topic = topic.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(msg) => {
                        if out_tx.send(Message::Text(msg.into())).await.is_err() {
                            tracing::info!("Client disconnected while sending to '{topic}'");
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("Client on '{topic}' lagged; dropped {n} frames");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    };

    // WS-level periodic ping
    let ping_task = {
        let out_tx = out_tx.clone();
        let every = opts.ws_ping_sec;
        tokio::spawn(async move {
            loop {
                time::sleep(std::time::Duration::from_secs(every)).await;
                if out_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        })
    };
    drop(out_tx);

    handler.on_open(&ctx).await;

    // C→S: parse & dispatch
    while let Some(Ok(msg)) = socket_rx.next().await {
        match msg {
            Message::Text(text) => {
                let raw = text.as_str();
                if opts.enable_app_ping && is_app_ping(raw) {
                    let _ = ctx.reply_event("pong", &serde_json::json!({})).await;
                    continue;
                }
                match serde_json::from_str::<H::In>(raw) {
                    Ok(parsed) => handler.on_message(&ctx, parsed).await,
                    Err(e) => tracing::warn!("WS invalid message on '{}': {e}; raw={raw}", ctx.topic),
                }
            }
            Message::Ping(payload) => {
                let _ = ctx.reply_pong(payload).await;
            }
            Message::Pong(_) => {}
            Message::Binary(_) => {
                tracing::warn!("Ignoring binary on topic '{}'", ctx.topic);
            }
            Message::Close(_) => break,
        }
    }

    handler.on_close(&ctx).await;

    // Leaving the room: stop forwarding and drop our receiver.
    forward_task.abort();
    ping_task.abort();
    let _ = forward_task.await;
    let _ = ping_task.await;
    manager.unsubscribe_cleanup(&topic).await;
    drop(ctx);
    let _ = writer_task.await;

    tracing::info!("WS session ended for topic '{topic}'");
}

fn is_app_ping(raw: &str) -> bool {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        if let Some(Value::String(t)) = map.get("type") {
            return t == "ping";
        }
    }
    false
}
