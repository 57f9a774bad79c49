// GET /api/status — row counts and per-button click totals.
//
// One response serves both the dashboard footer and the `textscope status`
// CLI check: registered users, stored texts, and how often each analysis
// button has been used.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let users = state.db.count_users().await.unwrap_or_default();
    let texts = state.db.count_texts().await.unwrap_or_default();
    let clicks = state.db.click_counts().await.unwrap_or_default();

    let clicks: serde_json::Map<String, serde_json::Value> = clicks
        .into_iter()
        .map(|(name, count)| (name, serde_json::Value::from(count)))
        .collect();

    Json(serde_json::json!({
        "users": users,
        "texts": texts,
        "clicks": clicks,
    }))
}
