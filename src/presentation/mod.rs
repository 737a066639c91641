// Presentation layer - HTTP handlers and request context
pub mod app_state;
pub mod handlers;
pub mod session;
