use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::routes::common::{AdminResponse, TicketResponse, UserResponse};

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new("^[a-zA-Z0-9]+$").unwrap();
}

/// Placeholder value the account and ticket forms send when nothing was picked.
pub const SELECT_PLACEHOLDER: &str = "Select";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    pub who: String,

    #[validate(regex(
        path = &*USERNAME_REGEX,
        message = "Username contains only Alpha numeric Characters."
    ))]
    pub username: String,

    pub email: String,
    pub password: String,

    /// Required for admins, ignored for users.
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub who: String,
    pub email: String,
    pub password: String,
}

/// The created account, shaped by role.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RegisteredAccount {
    User(UserResponse),
    Admin(AdminResponse),
}

impl Default for RegisteredAccount {
    fn default() -> Self {
        RegisteredAccount::User(UserResponse::default())
    }
}

#[derive(Debug, Serialize, Default)]
pub struct UserLoginResponse {
    pub user: UserResponse,
    pub tickets: Vec<TicketResponse>,
}

#[derive(Debug, Serialize, Default)]
pub struct AdminLoginResponse {
    pub admin: AdminResponse,
    pub assigned_tickets: Vec<TicketResponse>,
    pub department_tickets: Vec<TicketResponse>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginResponse {
    User(UserLoginResponse),
    Admin(AdminLoginResponse),
}

impl Default for LoginResponse {
    fn default() -> Self {
        LoginResponse::User(UserLoginResponse::default())
    }
}
