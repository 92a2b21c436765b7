use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{admin, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Email the ticket was filed under.
    pub email: String,
    pub user_id: i64,
    pub assigned_admin_id: Option<i64>,

    pub title: String,
    pub department: String,
    pub description: String,
    pub priority: String,

    pub status: TicketStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle of a ticket. Parsing is case-insensitive, so legacy
/// `"Pending"` and `"pending"` are the same state.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "solved")]
    Solved,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::admin::Entity",
        from = "Column::AssignedAdminId",
        to = "super::admin::Column::Id"
    )]
    AssignedAdmin,

    #[sea_orm(has_one = "super::chat::Entity")]
    Chat,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedAdmin.def()
    }
}

impl Related<super::chat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields a user supplies when filing a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket<'a> {
    pub email: &'a str,
    pub title: &'a str,
    pub department: &'a str,
    pub description: &'a str,
    pub priority: &'a str,
}

impl Model {
    /// Inserts a new `pending` ticket owned by `user_id` and assigned to `admin_id`.
    pub async fn create(
        db: &DbConn,
        user_id: i64,
        admin_id: i64,
        new: NewTicket<'_>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();

        let active_model = ActiveModel {
            email: Set(new.email.to_owned()),
            user_id: Set(user_id),
            assigned_admin_id: Set(Some(admin_id)),
            title: Set(new.title.to_owned()),
            department: Set(new.department.to_owned()),
            description: Set(new.description.to_owned()),
            priority: Set(new.priority.to_owned()),
            status: Set(TicketStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, ticket_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(ticket_id).one(db).await
    }

    pub async fn find_by_user(db: &DbConn, user_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_assigned_admin(db: &DbConn, admin_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignedAdminId.eq(admin_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_department(db: &DbConn, department: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Department.eq(department))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Number of `pending` tickets currently assigned to `admin_id`.
    pub async fn count_pending_for_admin(db: &DbConn, admin_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::AssignedAdminId.eq(admin_id))
            .filter(Column::Status.eq(TicketStatus::Pending))
            .count(db)
            .await
    }

    pub async fn set_status(
        db: &DbConn,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<Model, DbErr> {
        let model = match Entity::find_by_id(ticket_id).one(db).await? {
            Some(m) => m,
            None => return Err(DbErr::RecordNotFound("Ticket not found".to_string())),
        };

        let mut active_model: ActiveModel = model.into();

        active_model.status = Set(status);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    /// The user who filed this ticket and the admin it is assigned to.
    ///
    /// `None` when either side no longer exists (or the ticket is unassigned).
    pub async fn find_participants(
        &self,
        db: &DbConn,
    ) -> Result<Option<(user::Model, admin::Model)>, DbErr> {
        let Some(admin_id) = self.assigned_admin_id else {
            return Ok(None);
        };

        let user = user::Entity::find_by_id(self.user_id).one(db).await?;
        let admin = admin::Entity::find_by_id(admin_id).one(db).await?;

        Ok(user.zip(admin))
    }
}
