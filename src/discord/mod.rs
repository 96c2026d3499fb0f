pub mod message;
pub mod notifier;
