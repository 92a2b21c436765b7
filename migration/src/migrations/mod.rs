pub mod m202510010001_create_users;
pub mod m202510010002_create_admins;
pub mod m202510010003_create_tickets;
pub mod m202510010004_create_chats;
pub mod m202510010005_create_chat_messages;
