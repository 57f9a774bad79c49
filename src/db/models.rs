// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// bcrypt hash — never the plain password
    pub hashed_password: String,
    pub created_at: String,
}

/// The interaction events the UI records. Variants map to the stable
/// `button_name` strings stored in `button_clicks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickEvent {
    Login,
    Signup,
    Sentiment,
    Bigrams,
    BasicStats,
    Similarity,
}

impl ClickEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickEvent::Login => "login_button",
            ClickEvent::Signup => "signup_button",
            ClickEvent::Sentiment => "sentiment_an",
            ClickEvent::Bigrams => "txt_tags",
            ClickEvent::BasicStats => "txt_basic_an",
            ClickEvent::Similarity => "txt_similar",
        }
    }
}

impl std::fmt::Display for ClickEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
