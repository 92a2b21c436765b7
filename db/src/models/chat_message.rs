use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryFilter, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::chat;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "chat_messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub chat_id: i64,

    pub sender: String,
    /// Text body, or the stored file name for images.
    pub message: String,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "message_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MessageType {
    #[default]
    #[sea_orm(string_value = "text")]
    Text,

    #[sea_orm(string_value = "image")]
    Image,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chat::Entity",
        from = "Column::ChatId",
        to = "super::chat::Column::Id"
    )]
    Chat,
}

impl Related<super::chat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Appends a message to the ticket's chat, creating the chat if absent.
    pub async fn append(
        db: &DbConn,
        ticket_id: i64,
        sender: &str,
        message: &str,
        message_type: MessageType,
    ) -> Result<Model, DbErr> {
        let txn = db.begin().await?;
        let chat = chat::Model::find_or_create(&txn, ticket_id).await?;

        let active = ActiveModel {
            chat_id: Set(chat.id),
            sender: Set(sender.to_owned()),
            message: Set(message.to_owned()),
            message_type: Set(message_type),
            timestamp: Set(Utc::now()),
            ..Default::default()
        };

        let saved = active.insert(&txn).await?;
        txn.commit().await?;
        Ok(saved)
    }

    /// The ticket's chat and its messages in insertion order, or `None` if
    /// nobody has written to it yet.
    pub async fn history_for_ticket(
        db: &DbConn,
        ticket_id: i64,
    ) -> Result<Option<(chat::Model, Vec<Model>)>, DbErr> {
        let Some(chat) = chat::Model::find_by_ticket(db, ticket_id).await? else {
            return Ok(None);
        };

        let messages = Entity::find()
            .filter(Column::ChatId.eq(chat.id))
            .order_by_asc(Column::Timestamp)
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(Some((chat, messages)))
    }
}
