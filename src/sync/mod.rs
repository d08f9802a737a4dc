//! # Sync Module
//!
//! The reconciliation core: everything between "a list of liked tracks and
//! a list of playlists" and "the monthly playlists are up to date" lives
//! here, free of HTTP concerns so each step stays unit-testable without a
//! live network.
//!
//! ## Pipeline
//!
//! ```text
//! liked tracks ──> bucket::bucket_by_month ──> Vec<MonthBucket>
//! playlists ─────> matcher::index_monthly_playlists ──> name -> Playlist
//!                        │
//!                        v
//!        reconcile::plan (pure create-vs-replace decision)
//!                        │
//!                        v
//!        reconcile::execute (issues the writes, per-bucket outcomes)
//! ```
//!
//! [`engine::run`] drives the pipeline end to end: credential check,
//! cached profile and liked-tracks fetches, exhaustive playlist fetch,
//! then plan and execute. A failed write against one month's playlist is
//! recorded in that bucket's result and never aborts the remaining
//! buckets; auth and fetch failures abort the whole run.

pub mod bucket;
pub mod engine;
pub mod matcher;
pub mod reconcile;

pub use bucket::bucket_by_month;
pub use engine::SyncError;
pub use engine::run;
pub use matcher::index_monthly_playlists;
