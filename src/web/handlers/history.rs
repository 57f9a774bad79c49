// GET /api/history — the authenticated user's saved texts.
//
// Newest first, capped at the history window (the DB layer prunes older
// rows on read).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use crate::web::{api_error, AppState, AuthUser};

pub async fn get_history(
    State(state): State<AppState>,
    Extension(AuthUser(username)): Extension<AuthUser>,
) -> Response {
    match state.db.get_user_texts(&username).await {
        Ok(texts) => Json(serde_json::json!({ "texts": texts })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, user = %username, "DB error fetching history");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
