use db::models::chat_message::{self, MessageType};
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use util::ws::handler_trait::WsHandler;
use util::ws::runtime::WsContext;

use super::common::TicketIncoming;
use super::emit;
use super::error::ChatError;
use super::image::{decode_image, save_image};
use super::payload::{ChatFailure, ChatHistory, ChatMessage};

/// Chat room for one ticket. Persists every accepted frame before broadcasting it.
pub struct TicketWsHandler {
    pub db: DatabaseConnection,
    pub uploads_root: PathBuf,
    pub ticket_id: i64,
    pub max_image_bytes: usize,
}

impl TicketWsHandler {
    async fn history(&self) -> Result<Option<ChatHistory>, ChatError> {
        let history = chat_message::Model::history_for_ticket(&self.db, self.ticket_id).await?;
        Ok(history.map(|(_, messages)| ChatHistory {
            ticket_id: self.ticket_id,
            messages: messages.into_iter().map(ChatMessage::from).collect(),
        }))
    }

    async fn store_text(
        &self,
        sender: &str,
        message: &str,
        message_type: MessageType,
    ) -> Result<ChatMessage, ChatError> {
        let saved =
            chat_message::Model::append(&self.db, self.ticket_id, sender, message, message_type)
                .await?;
        Ok(saved.into())
    }

    async fn store_image(&self, sender: &str, image: &str) -> Result<ChatMessage, ChatError> {
        let decoded = decode_image(image, self.max_image_bytes)?;
        let file_name = save_image(&self.uploads_root, &decoded).await?;
        tracing::debug!(ticket_id = self.ticket_id, %file_name, "Stored chat image");

        let saved = chat_message::Model::append(
            &self.db,
            self.ticket_id,
            sender,
            &file_name,
            MessageType::Image,
        )
        .await?;
        Ok(saved.into())
    }

    async fn report(&self, ctx: &WsContext, action: &str, err: ChatError) {
        tracing::error!(ticket_id = self.ticket_id, "Error {action}: {err}");
        let _ = ctx
            .reply_event(
                "error",
                &ChatFailure {
                    message: err.to_string(),
                },
            )
            .await;
    }
}

impl WsHandler for TicketWsHandler {
    type In = TicketIncoming;

    async fn on_open(&self, ctx: &WsContext) {
        tracing::info!("A client joined '{}'", ctx.topic);
    }

    async fn on_message(&self, ctx: &WsContext, msg: Self::In) {
        match msg {
            TicketIncoming::ChatInit { user_id, admin_id } => {
                tracing::debug!(ticket_id = self.ticket_id, ?user_id, ?admin_id, "chatInit");
                match self.history().await {
                    Ok(history) => {
                        let _ = ctx.reply_event("chatHistory", &history).await;
                    }
                    Err(e) => self.report(ctx, "initializing chat", e).await,
                }
            }
            TicketIncoming::ChatMessage {
                sender,
                message,
                message_type,
            } => {
                if message.trim().is_empty() {
                    tracing::debug!(ticket_id = self.ticket_id, "Ignoring empty chat message");
                    return;
                }
                match self.store_text(&sender, &message, message_type).await {
                    Ok(saved) => emit::message_sent(&ctx.ws, self.ticket_id, saved).await,
                    Err(e) => self.report(ctx, "sending chat message", e).await,
                }
            }
            TicketIncoming::ChatImage { sender, image } => {
                match self.store_image(&sender, &image).await {
                    Ok(saved) => emit::image_sent(&ctx.ws, self.ticket_id, saved).await,
                    Err(e) => self.report(ctx, "sending image message", e).await,
                }
            }
        }
    }

    async fn on_close(&self, ctx: &WsContext) {
        tracing::info!("A client left '{}'", ctx.topic);
    }
}
