// Database trait — backend-agnostic async interface for all DB operations.
//
// Implementors: SqliteDatabase (wraps rusqlite), PgDatabase (wraps sqlx).
// All methods are async so both sync (rusqlite via Mutex) and native async
// (sqlx) backends fit behind a single interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::User;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Users ---

    /// Create a user with an already-hashed password.
    /// Returns false when the username is taken.
    async fn create_user(&self, username: &str, hashed_password: &str) -> Result<bool>;

    /// Look up a user by exact username (callers lowercase first).
    async fn get_user(&self, username: &str) -> Result<Option<User>>;

    // --- User texts ---

    /// Save a submitted text, suppressing consecutive duplicates.
    /// Returns None when the text matched the user's most recent entry.
    async fn save_user_text(&self, username: &str, text: &str) -> Result<Option<i64>>;

    /// Get the user's saved texts, newest first, capped at the history
    /// window. Prunes older rows as a side effect.
    async fn get_user_texts(&self, username: &str) -> Result<Vec<String>>;

    // --- Button clicks ---

    /// Record a UI interaction event and return its ID.
    async fn save_button_click(&self, username: &str, button_name: &str) -> Result<i64>;

    // --- Aggregates ---

    async fn count_users(&self) -> Result<i64>;

    async fn count_texts(&self) -> Result<i64>;

    /// Click totals per button name, most-clicked first.
    async fn click_counts(&self) -> Result<Vec<(String, i64)>>;
}
