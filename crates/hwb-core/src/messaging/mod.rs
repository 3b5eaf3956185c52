//! Outbound messaging: the messenger port and the notifier built on top of it.

pub mod notifier;
pub mod port;
