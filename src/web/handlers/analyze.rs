// Analysis handlers — one endpoint per UI button.
//
// Every endpoint follows the same shape: reject blank input, save the
// submitted text (consecutive duplicates are suppressed by the DB layer),
// run the analysis, record the button click, return JSON. A failed click
// write is logged but never fails the analysis the user asked for.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::analysis::{TextAnalyzer, BIGRAM_FREQ_FILTER, BIGRAM_TOP_N};
use crate::db::models::ClickEvent;
use crate::web::{api_error, AppState, AuthUser};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    text: String,
}

#[derive(Deserialize)]
pub struct SimilarityRequest {
    text: String,
    comparison_text: String,
}

/// POST /api/analyze/sentiment
pub async fn sentiment(
    State(state): State<AppState>,
    Extension(AuthUser(username)): Extension<AuthUser>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let Some(text) = non_blank(&body.text) else {
        return api_error(StatusCode::BAD_REQUEST, "Text must not be empty");
    };

    if let Err(e) = record_submission(&state, &username, text, ClickEvent::Sentiment).await {
        return e;
    }

    let analyzer = TextAnalyzer::new(text, state.config.language);
    let result = analyzer.sentiment();

    Json(serde_json::json!({
        "label": result.label.as_str(),
        "polarity": result.polarity,
        "hits": result.hits,
    }))
    .into_response()
}

/// POST /api/analyze/bigrams
pub async fn bigrams(
    State(state): State<AppState>,
    Extension(AuthUser(username)): Extension<AuthUser>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let Some(text) = non_blank(&body.text) else {
        return api_error(StatusCode::BAD_REQUEST, "Text must not be empty");
    };

    if let Err(e) = record_submission(&state, &username, text, ClickEvent::Bigrams).await {
        return e;
    }

    let analyzer = TextAnalyzer::new(text, state.config.language);
    let bigrams = analyzer.top_bigrams(BIGRAM_FREQ_FILTER, BIGRAM_TOP_N);

    let bigrams: Vec<serde_json::Value> = bigrams
        .iter()
        .map(|b| serde_json::json!({ "first": b.first, "second": b.second }))
        .collect();

    Json(serde_json::json!({ "bigrams": bigrams })).into_response()
}

/// POST /api/analyze/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(AuthUser(username)): Extension<AuthUser>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let Some(text) = non_blank(&body.text) else {
        return api_error(StatusCode::BAD_REQUEST, "Text must not be empty");
    };

    if let Err(e) = record_submission(&state, &username, text, ClickEvent::BasicStats).await {
        return e;
    }

    let analyzer = TextAnalyzer::new(text, state.config.language);
    let stats = analyzer.basic_stats();

    Json(serde_json::json!({
        "char_count": stats.char_count,
        "word_count": stats.word_count,
        "sentence_count": stats.sentence_count,
        "avg_word_length": stats.avg_word_length,
        "pos_counts": stats.pos_counts,
    }))
    .into_response()
}

/// POST /api/analyze/similarity — compares the submitted text with a
/// second one. Only the primary text lands in the history.
pub async fn similarity(
    State(state): State<AppState>,
    Extension(AuthUser(username)): Extension<AuthUser>,
    Json(body): Json<SimilarityRequest>,
) -> Response {
    let Some(text) = non_blank(&body.text) else {
        return api_error(StatusCode::BAD_REQUEST, "Text must not be empty");
    };
    let Some(comparison) = non_blank(&body.comparison_text) else {
        return api_error(StatusCode::BAD_REQUEST, "Comparison text must not be empty");
    };

    if let Err(e) = record_submission(&state, &username, text, ClickEvent::Similarity).await {
        return e;
    }

    let analyzer = TextAnalyzer::new(text, state.config.language);
    let similarity = analyzer.similarity(comparison);

    Json(serde_json::json!({ "similarity": similarity })).into_response()
}

// --- Helpers ---

fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Persist the submitted text and the button click. A text-save failure is
/// a 500 (the user's data was lost); a click-save failure is only logged.
async fn record_submission(
    state: &AppState,
    username: &str,
    text: &str,
    event: ClickEvent,
) -> Result<(), Response> {
    if let Err(e) = state.db.save_user_text(username, text).await {
        tracing::error!(error = %e, "Failed to save submitted text");
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database error",
        ));
    }

    if let Err(e) = state.db.save_button_click(username, event.as_str()).await {
        tracing::warn!(error = %e, event = %event, "Failed to record button click");
    }

    Ok(())
}
