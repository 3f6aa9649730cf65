pub mod chat;
pub mod status;
