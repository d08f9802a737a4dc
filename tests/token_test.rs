use serde_json::json;
use spomocli::management::CacheEntry;
use spomocli::spotify::auth::token_from_response;
use spomocli::spotify::pager::fetch_complete;
use spomocli::types::Token;

fn create_token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-library-read".to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_token_expiry_boundary() {
    // expires_in 3600 with the four-minute slack: usable until 3360s in
    let token = create_token(1_000, 3_600);

    assert!(!token.is_expired_at(1_000));
    assert!(!token.is_expired_at(1_000 + 3_359));
    assert!(token.is_expired_at(1_000 + 3_360));
    assert!(token.is_expired_at(1_000 + 3_600));
    assert!(token.is_expired_at(1_000 + 10_000));
}

#[test]
fn test_token_from_response_reads_full_response() {
    let json = json!({
        "access_token": "new-access",
        "refresh_token": "new-refresh",
        "scope": "user-library-read",
        "expires_in": 3600,
    });

    let token = token_from_response(&json, None).unwrap();

    assert_eq!(token.access_token, "new-access");
    assert_eq!(token.refresh_token, "new-refresh");
    assert_eq!(token.scope, "user-library-read");
    assert_eq!(token.expires_in, 3600);
    assert!(token.obtained_at > 0);
}

#[test]
fn test_token_from_response_keeps_previous_refresh_token() {
    // Refresh-grant responses may omit the refresh token; the previous one
    // stays part of the credential instead of being blanked.
    let json = json!({
        "access_token": "new-access",
        "expires_in": 3600,
    });

    let token = token_from_response(&json, Some("old-refresh")).unwrap();

    assert_eq!(token.access_token, "new-access");
    assert_eq!(token.refresh_token, "old-refresh");
}

#[test]
fn test_token_from_response_rejects_missing_access_token() {
    let json = json!({
        "error": "invalid_grant",
        "error_description": "Refresh token revoked",
    });

    assert!(token_from_response(&json, Some("old-refresh")).is_none());
}

#[test]
fn test_token_from_response_without_any_refresh_token() {
    // An authorization-code exchange has no previous token to fall back to
    let json = json!({
        "access_token": "new-access",
        "expires_in": 3600,
    });

    assert!(token_from_response(&json, None).is_none());
}

#[test]
fn test_fetch_complete_stops_without_next_link() {
    assert!(fetch_complete(0, false, None));
    assert!(fetch_complete(10, false, Some(200)));
}

#[test]
fn test_fetch_complete_honors_max_items_boundary() {
    // Fetching stops once the accumulated count reaches the cap
    assert!(!fetch_complete(199, true, Some(200)));
    assert!(fetch_complete(200, true, Some(200)));
    assert!(fetch_complete(230, true, Some(200)));
}

#[test]
fn test_fetch_complete_is_exhaustive_without_a_cap() {
    assert!(!fetch_complete(1_000, true, None));
}

#[test]
fn test_cache_entry_expiry() {
    let entry = CacheEntry {
        expires_at: Some(2_000),
        value: "cached".to_string(),
    };

    assert!(!entry.is_expired_at(1_999));
    assert!(entry.is_expired_at(2_000));
    assert!(entry.is_expired_at(3_000));

    let forever = CacheEntry {
        expires_at: None,
        value: "cached".to_string(),
    };
    assert!(!forever.is_expired_at(u64::MAX));
}
