//! API endpoint modules organized by category.
//!
//! Each module adds typed methods for a group of related Bot API methods
//! to [`ApiClient`](crate::client::ApiClient).

pub mod bot;
pub mod messages;
pub mod media;
pub mod webhook;
