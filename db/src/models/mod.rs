pub mod admin;
pub mod chat;
pub mod chat_message;
pub mod tickets;
pub mod user;

pub use admin::Entity as Admin;
pub use chat::Entity as Chat;
pub use chat_message::Entity as ChatMessage;
pub use tickets::Entity as Ticket;
pub use user::Entity as User;
