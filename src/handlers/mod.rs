pub mod chat;
pub mod drain;
pub mod fulfillment;
pub mod health;
