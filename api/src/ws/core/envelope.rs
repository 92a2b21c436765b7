use crate::ws::core::event::Event;
use util::ws::{WebSocketManager, emit as emit_enveloped};

/// Wrap `ev` in the standard envelope and broadcast it on its own topic.
pub async fn emit<E>(ws: &WebSocketManager, ev: &E)
where
    E: Event,
{
    emit_enveloped(ws, &ev.topic_path(), E::NAME, ev).await;
}
