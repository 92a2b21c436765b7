use serde::Serialize;

/// A server-to-client event: its wire name plus the room it is broadcast to.
pub trait Event: Serialize {
    const NAME: &'static str;
    /// Topic the event is published on, e.g. `tickets:42`.
    fn topic_path(&self) -> String;
}
