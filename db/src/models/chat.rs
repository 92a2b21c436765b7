use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, QueryFilter};

/// The single chat thread attached to a ticket.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "chats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub ticket_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tickets::Entity",
        from = "Column::TicketId",
        to = "super::tickets::Column::Id"
    )]
    Ticket,

    #[sea_orm(has_many = "super::chat_message::Entity")]
    Messages,
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::chat_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_by_ticket(db: &impl ConnectionTrait, ticket_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::TicketId.eq(ticket_id))
            .one(db)
            .await
    }

    /// Returns the ticket's chat, creating it first if it does not exist yet.
    ///
    /// The insert is `ON CONFLICT (ticket_id) DO NOTHING`, so two racing
    /// callers end up with the same row.
    pub async fn find_or_create(db: &impl ConnectionTrait, ticket_id: i64) -> Result<Model, DbErr> {
        let active = ActiveModel {
            ticket_id: Set(ticket_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = Entity::insert(active)
            .on_conflict(
                OnConflict::column(Column::TicketId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await;

        match inserted {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }

        Self::find_by_ticket(db, ticket_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Chat for ticket {ticket_id}")))
    }
}
