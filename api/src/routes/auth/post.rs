use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::{admin, tickets, user};
use util::state::AppState;
use validator::Validate;

use super::common::{
    AdminLoginResponse, LoginRequest, LoginResponse, RegisterRequest, RegisteredAccount,
    SELECT_PLACEHOLDER, UserLoginResponse,
};
use crate::response::ApiResponse;
use crate::routes::common::{Role, format_validation_errors, ticket_list};

const BAD_ROLE: &str = "Please Select The Proper Role";
const USER_NAME_TAKEN: &str = "Username already taken. Please choose a different username.";
const ADMIN_NAME_TAKEN: &str =
    "Admin username already taken. Please choose a different username.";
const EMAIL_TAKEN: &str = "Email already taken. Please choose a different Email.";

/// POST /auth/register
///
/// Register a new user or admin.
///
/// ### Request Body
/// ```json
/// {
///   "who": "admin",
///   "username": "alice",
///   "email": "alice@helpdesk.io",
///   "password": "secret",
///   "department": "IT"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created` with the account (no password)
/// - `400 Bad Request` bad role, non-alphanumeric username, or admin without a department
/// - `409 Conflict` username or email already taken within the same role
/// - `500 Internal Server Error`
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let Some(role) = Role::parse(&req.who) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<RegisteredAccount>::error(BAD_ROLE)),
        );
    };

    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<RegisteredAccount>::error(error_message)),
        );
    }

    let taken = match role {
        Role::User => check_user_taken(db, &req).await,
        Role::Admin => check_admin_taken(db, &req).await,
    };
    match taken {
        Ok(Some(message)) => {
            return (
                StatusCode::CONFLICT,
                Json(ApiResponse::<RegisteredAccount>::error(message)),
            );
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check for existing account: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<RegisteredAccount>::error("Database error")),
            );
        }
    }

    let created = match role {
        Role::User => user::Model::create(db, &req.username, &req.email, &req.password)
            .await
            .map(|u| RegisteredAccount::User(u.into())),
        Role::Admin => {
            let department = match req.department.as_deref().map(str::trim) {
                Some(d) if !d.is_empty() && d != SELECT_PLACEHOLDER => d,
                _ => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::<RegisteredAccount>::error(
                            "Please select a department",
                        )),
                    );
                }
            };
            admin::Model::create(db, &req.username, &req.email, &req.password, department)
                .await
                .map(|a| RegisteredAccount::Admin(a.into()))
        }
    };

    match created {
        Ok(account) => {
            tracing::info!(who = %req.who, username = %req.username, "Account registered");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(account, "Account registered successfully")),
            )
        }
        Err(e) if db::is_unique_violation(&e) => {
            // Lost a race with a concurrent registration of the same name or email.
            tracing::warn!(username = %req.username, "Duplicate account rejected on insert: {e}");
            let taken = match role {
                Role::User => check_user_taken(db, &req).await,
                Role::Admin => check_admin_taken(db, &req).await,
            };
            let message = match (taken, role) {
                (Ok(Some(message)), _) => message,
                (_, Role::User) => USER_NAME_TAKEN,
                (_, Role::Admin) => ADMIN_NAME_TAKEN,
            };
            (
                StatusCode::CONFLICT,
                Json(ApiResponse::<RegisteredAccount>::error(message)),
            )
        }
        Err(e) => {
            tracing::error!("Failed to register account: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<RegisteredAccount>::error("Database error")),
            )
        }
    }
}

async fn check_user_taken(
    db: &sea_orm::DatabaseConnection,
    req: &RegisterRequest,
) -> Result<Option<&'static str>, sea_orm::DbErr> {
    if user::Model::find_by_username(db, &req.username).await?.is_some() {
        return Ok(Some(USER_NAME_TAKEN));
    }
    if user::Model::find_by_email(db, &req.email).await?.is_some() {
        return Ok(Some(EMAIL_TAKEN));
    }
    Ok(None)
}

async fn check_admin_taken(
    db: &sea_orm::DatabaseConnection,
    req: &RegisterRequest,
) -> Result<Option<&'static str>, sea_orm::DbErr> {
    if admin::Model::find_by_username(db, &req.username).await?.is_some() {
        return Ok(Some(ADMIN_NAME_TAKEN));
    }
    if admin::Model::find_by_email(db, &req.email).await?.is_some() {
        return Ok(Some(EMAIL_TAKEN));
    }
    Ok(None)
}

/// POST /auth/login
///
/// Check credentials and return the landing data for the role.
///
/// ### Request Body
/// ```json
/// { "who": "user", "email": "bob@helpdesk.io", "password": "secret" }
/// ```
///
/// ### Responses
///
/// - `200 OK` user: `{ user, tickets }` (tickets filed under the email)
/// - `200 OK` admin: `{ admin, assigned_tickets, department_tickets }`
/// - `400 Bad Request` bad role
/// - `401 Unauthorized` unknown email or wrong password
/// - `500 Internal Server Error`
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let Some(role) = Role::parse(&req.who) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(BAD_ROLE)),
        );
    };

    let result = match role {
        Role::User => login_user(db, &req).await,
        Role::Admin => login_admin(db, &req).await,
    };

    match result {
        Ok(Some(data)) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Login successful")),
        ),
        Ok(None) => {
            let message = match role {
                Role::User => "Please Enter the Valid Details of User",
                Role::Admin => "Please Enter the Valid Details of Admin",
            };
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<LoginResponse>::error(message)),
            )
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LoginResponse>::error("Database error")),
            )
        }
    }
}

async fn login_user(
    db: &sea_orm::DatabaseConnection,
    req: &LoginRequest,
) -> Result<Option<LoginResponse>, sea_orm::DbErr> {
    let Some(user) = user::Model::verify_credentials(db, &req.email, &req.password).await? else {
        return Ok(None);
    };
    let tickets = tickets::Model::find_by_email(db, &req.email).await?;

    Ok(Some(LoginResponse::User(UserLoginResponse {
        user: user.into(),
        tickets: ticket_list(tickets),
    })))
}

async fn login_admin(
    db: &sea_orm::DatabaseConnection,
    req: &LoginRequest,
) -> Result<Option<LoginResponse>, sea_orm::DbErr> {
    let Some(admin) = admin::Model::verify_credentials(db, &req.email, &req.password).await?
    else {
        return Ok(None);
    };
    let department_tickets = tickets::Model::find_by_department(db, &admin.department).await?;
    let assigned_tickets = tickets::Model::find_by_assigned_admin(db, admin.id).await?;

    Ok(Some(LoginResponse::Admin(AdminLoginResponse {
        admin: admin.into(),
        assigned_tickets: ticket_list(assigned_tickets),
        department_tickets: ticket_list(department_tickets),
    })))
}
