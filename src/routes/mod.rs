//! Request handlers behind [`crate::handle_request`]. Each returns an HTML
//! fragment (or JSON/plain text where noted) for HTMX to swap in.

pub mod character;
pub mod hooks;
pub mod progress;
pub mod prompt;
pub mod quest;
pub mod util;
