// util/ws/axum_adapter.rs
use super::WebSocketManager;
use super::handler_trait::WsHandler;
use super::serve::{WsServerOptions, serve_topic};
use axum::{
    extract::{WebSocketUpgrade, ws::WebSocket},
    response::IntoResponse,
};
use std::sync::Arc;

/// Upgrade the connection and serve it on the topic produced by `topic_fn`.
pub fn ws_route<H, FTopic>(
    ws: WebSocketUpgrade,
    manager: WebSocketManager,
    topic_fn: FTopic,
    handler: Arc<H>,
    opts: WsServerOptions,
) -> impl IntoResponse
where
    H: WsHandler,
    FTopic: FnOnce() -> String + Send + 'static,
{
    ws.on_upgrade(move |socket: WebSocket| {
        let topic = topic_fn();
        async move {
            serve_topic(socket, manager, topic, handler, opts).await;
        }
    })
}
