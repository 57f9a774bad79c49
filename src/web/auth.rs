// Auth middleware — stateless HMAC-SHA256 session cookie validation.
//
// Session token format: {username_b64}.{timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The HMAC covers "{username_b64}.{timestamp_secs}.{nonce_hex}" signed with
// TEXTSCOPE_SESSION_SECRET. Tokens are valid for SESSION_TTL_SECS (24 hours).
// The username rides inside the token (base64, url-safe) so the server
// stays stateless — no session table.
//
// Login flow:
//   POST /api/login { username, password } → bcrypt check against users row
//     success: set textscope_session cookie with new HMAC token
//     failure: 401
//
// Auth check (this middleware):
//   extract cookie → parse → verify HMAC → verify age → recover username

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use super::{AppState, AuthUser};

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "textscope_session";

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: u64 = 86_400;

/// Build a new session token for `username` signed with `secret`.
///
/// Returns the raw cookie value (the token string, not the full Set-Cookie header).
pub fn create_token(secret: &str, username: &str) -> String {
    let user_b64 = URL_SAFE_NO_PAD.encode(username.as_bytes());

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let payload = format!("{user_b64}.{timestamp}.{nonce}");
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token. Returns the embedded username when the HMAC is
/// valid and the token is not older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> Option<String> {
    // Format: {username_b64}.{timestamp}.{nonce}.{hmac}
    let parts: Vec<&str> = token.splitn(4, '.').collect();
    if parts.len() != 4 {
        return None;
    }
    let user_b64 = parts[0];
    let timestamp_str = parts[1];
    let nonce = parts[2];
    let provided_sig = parts[3];

    // Verify HMAC
    let payload = format!("{user_b64}.{timestamp_str}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    // Verify age
    let timestamp = timestamp_str.parse::<u64>().ok()?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    if now.saturating_sub(timestamp) >= SESSION_TTL_SECS {
        return None;
    }

    let user_bytes = URL_SAFE_NO_PAD.decode(user_b64).ok()?;
    String::from_utf8(user_bytes).ok()
}

/// Axum middleware: reject requests without a valid session cookie with 401.
/// On success the username is inserted into request extensions as AuthUser.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let secret = &state.config.session_secret;

    let Some(username) = session_username(&request, secret) else {
        return super::api_error(
            axum::http::StatusCode::UNAUTHORIZED,
            "Authentication required",
        );
    };

    request.extensions_mut().insert(AuthUser(username));
    next.run(request).await
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(token: &str) -> String {
    format!("{COOKIE_NAME}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}")
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

// --- Private helpers ---

fn hmac_sign(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| HmacSha256::new_from_slice(b"fallback").unwrap());
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Extract and validate the session cookie, returning the username.
fn session_username(request: &Request, secret: &str) -> Option<String> {
    let cookie_header = request.headers().get(header::COOKIE)?.to_str().ok()?;

    // Parse individual cookie pairs
    for pair in cookie_header.split(';') {
        let pair = pair.trim();
        if let Some((name, value)) = pair.split_once('=') {
            if name.trim() == COOKIE_NAME {
                return verify_token(secret, value.trim());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let secret = "test_secret_32_bytes_long_enough!";
        let token = create_token(secret, "alice_99");
        assert_eq!(verify_token(secret, &token).as_deref(), Some("alice_99"));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("correct_secret", "alice_99");
        assert!(verify_token("wrong_secret", &token).is_none());
    }

    #[test]
    fn test_username_tamper_rejected() {
        let secret = "my_secret";
        let token = create_token(secret, "alice_99");
        // Swap in a different username, keep the signature
        let parts: Vec<&str> = token.splitn(4, '.').collect();
        let other = URL_SAFE_NO_PAD.encode(b"mallory1");
        let forged = format!("{}.{}.{}.{}", other, parts[1], parts[2], parts[3]);
        assert!(verify_token(secret, &forged).is_none());
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(verify_token("secret", "not-a-token").is_none());
        assert!(verify_token("secret", "").is_none());
        assert!(verify_token("secret", "only.three.parts").is_none());
    }

    #[test]
    fn test_expired_timestamp_rejected() {
        let secret = "my_secret";
        // Hand-build a token dated before the TTL window
        let user_b64 = URL_SAFE_NO_PAD.encode(b"alice_99");
        let old = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            - SESSION_TTL_SECS
            - 10;
        let payload = format!("{user_b64}.{old}.deadbeef");
        let sig = hmac_sign(secret, &payload);
        let token = format!("{payload}.{sig}");
        assert!(verify_token(secret, &token).is_none());
    }
}
