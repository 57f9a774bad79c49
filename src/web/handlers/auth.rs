// Auth handlers — POST /api/register, /api/login and /api/logout.
//
// Register: validates the credential rules, bcrypt-hashes the password,
// creates the row, records a signup_button click and signs the caller in.
// Login: bcrypt check against the stored hash; unknown username and wrong
// password produce the same 401.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::auth::{
    authenticate_user, hash_password, validate_password, validate_username,
};
use crate::db::models::ClickEvent;
use crate::web::auth::{clear_cookie_header, create_token, set_cookie_header};
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
    confirm_password: String,
}

/// POST /api/login — authenticate against the users table.
///
/// On success: returns 200 with a signed session cookie and records a
/// login_button click. On failure: 401 (or 400 for rule violations),
/// and no click is recorded.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let username = match validate_username(&body.username) {
        Ok(u) => u,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, e.message()),
    };
    if let Err(e) = validate_password(&body.password, None) {
        return api_error(StatusCode::BAD_REQUEST, e.message());
    }

    match authenticate_user(state.db.as_ref(), &username, &body.password).await {
        Ok(Some(user)) => {
            if let Err(e) = state
                .db
                .save_button_click(&user.username, ClickEvent::Login.as_str())
                .await
            {
                tracing::warn!(error = %e, "Failed to record login click");
            }
            signed_in_response(&state, &user.username)
        }
        Ok(None) => api_error(StatusCode::UNAUTHORIZED, "Authentication failed"),
        Err(e) => {
            tracing::error!(error = %e, "DB error during login");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// POST /api/register — create an account and sign the caller in.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Response {
    let username = match validate_username(&body.username) {
        Ok(u) => u,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, e.message()),
    };
    if let Err(e) = validate_password(&body.password, Some(&body.confirm_password)) {
        return api_error(StatusCode::BAD_REQUEST, e.message());
    }

    let hashed = match hash_password(&body.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!(error = %e, "Password hashing failed");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error");
        }
    };

    match state.db.create_user(&username, &hashed).await {
        Ok(true) => {
            if let Err(e) = state
                .db
                .save_button_click(&username, ClickEvent::Signup.as_str())
                .await
            {
                tracing::warn!(error = %e, "Failed to record signup click");
            }
            signed_in_response(&state, &username)
        }
        Ok(false) => api_error(StatusCode::CONFLICT, "Username already exists"),
        Err(e) => {
            tracing::error!(error = %e, "DB error during registration");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// POST /api/logout — clear the session cookie.
pub async fn logout() -> Response {
    let cookie = clear_cookie_header();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
        .into_response()
}

fn signed_in_response(state: &AppState, username: &str) -> Response {
    let token = create_token(&state.config.session_secret, username);
    let cookie = set_cookie_header(&token);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "username": username })),
    )
        .into_response()
}
