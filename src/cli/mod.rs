//! # CLI Module
//!
//! The command-line interface layer for spomocli. It implements the
//! user-facing commands and coordinates between the sync engine, the
//! credential store, and the Spotify API modules.
//!
//! ## Commands
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//! - [`sync`] - Runs one reconciliation of liked tracks into monthly
//!   playlists and renders the per-playlist outcome table
//! - [`tracks`] - Displays the liked-tracks history grouped by month, with
//!   an optional single-month filter
//! - [`playlists`] - Lists the existing playlists whose names match the
//!   monthly pattern
//!
//! ## Error Handling Philosophy
//!
//! Commands present errors instead of propagating them: a missing or
//! unrecoverable credential directs the user to `spomocli auth`, a failed
//! fetch aborts the command, and per-playlist write failures during a sync
//! are listed in the summary without aborting the remaining playlists.
//!
//! ## Progress and User Experience
//!
//! Long-running operations show an `indicatif` spinner and finish with a
//! colored status line; tabular data is rendered with `tabled`.

mod auth;
mod playlists;
mod sync;
mod tracks;

pub use auth::auth;
pub use playlists::playlists;
pub use sync::sync;
pub use tracks::tracks;
