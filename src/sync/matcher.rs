use std::collections::HashMap;

use regex::Regex;

use crate::types::Playlist;

/// Whether a playlist name looks like a monthly bucket key.
///
/// A name matches iff it is one or more word characters, a single space,
/// then exactly four digits - `"March 2024"` matches, `"Road Trip"` and
/// `"March 24"` do not. Lookup against bucket keys is exact string
/// equality, never fuzzy.
pub fn is_monthly_name(name: &str) -> bool {
    Regex::new(r"^\w+\s\d{4}$").unwrap().is_match(name)
}

/// Indexes the user's playlists by monthly name.
///
/// Playlists whose name doesn't match the monthly pattern are ignored
/// entirely - never deleted, never touched. If two playlists share an
/// identical matching name (should not normally occur), the later one in
/// fetch order wins; the duplicate is not corrected.
pub fn index_monthly_playlists(playlists: &[Playlist]) -> HashMap<String, Playlist> {
    let mut index = HashMap::new();
    for playlist in playlists {
        if is_monthly_name(&playlist.name) {
            index.insert(playlist.name.clone(), playlist.clone());
        }
    }
    index
}
