//! # Spotify Integration Module
//!
//! This module is the integration layer between spomocli and the Spotify
//! Web API. It handles the OAuth 2.0 PKCE authentication flow, the token
//! endpoint exchanges, and the authenticated REST calls the sync engine
//! needs: the user profile, the liked-tracks library, and playlist reads
//! and writes.
//!
//! ## Submodules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, authorization-code and refresh-grant
//!   exchanges against the token endpoint
//! - [`pager`] - generic paginated GET that follows `next` links and
//!   accumulates every page into one ordered sequence
//! - [`user`] - the `/me` profile endpoint
//! - [`tracks`] - the `/me/tracks` liked-tracks library
//! - [`playlist`] - playlist listing, creation and full-content replacement
//!
//! ## API Coverage
//!
//! - `GET /me` - user profile (owner id for playlist creation)
//! - `GET /me/tracks` - liked tracks, paginated
//! - `GET /me/playlists` - the user's playlists, paginated
//! - `POST /users/{user_id}/playlists` - create a monthly playlist
//! - `PUT /playlists/{playlist_id}/tracks` - replace a playlist's tracks
//! - `POST /api/token` - token exchange and refresh operations
//!
//! ## Error Handling
//!
//! Token-endpoint failures surface as [`crate::management::AuthError`] and
//! are never retried here; retry policy belongs to the caller. Read
//! failures abort their whole fetch with [`FetchError`] (no partial
//! results), write failures surface as [`WriteError`] and are handled per
//! playlist by the reconciliation engine.

pub mod auth;
pub mod pager;
pub mod playlist;
pub mod tracks;
pub mod user;

pub use pager::FetchError;
pub use playlist::WriteError;
