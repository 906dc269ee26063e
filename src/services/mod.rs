pub mod engine;
pub mod fulfillment;
pub mod mail;
pub mod notifier;
pub mod queue;
pub mod validation;
