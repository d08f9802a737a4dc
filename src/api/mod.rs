//! # API Module
//!
//! HTTP endpoints for the temporary local server that runs during the
//! authorization flow.
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's
//!   authorization server, completing the PKCE flow by exchanging the
//!   authorization code for a persisted credential.
//! - [`health`] - Health check endpoint returning application status and
//!   version information.
//!
//! Both handlers are async functions wired into an [Axum](https://docs.rs/axum)
//! router by [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
