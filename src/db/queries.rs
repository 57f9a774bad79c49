// Database queries — CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::Result;
use rusqlite::{params, Connection};

use super::models::User;

/// How many texts per user the history keeps. Older rows are pruned
/// whenever the history is read.
pub const HISTORY_LIMIT: usize = 5;

// --- Users ---

/// Create a user with an already-hashed password.
///
/// Returns false (and writes nothing) when the username is taken.
pub fn create_user(conn: &Connection, username: &str, hashed_password: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM users WHERE username = ?1",
        params![username],
        |row| row.get(0),
    )?;
    if exists {
        return Ok(false);
    }

    conn.execute(
        "INSERT INTO users (username, hashed_password) VALUES (?1, ?2)",
        params![username, hashed_password],
    )?;
    Ok(true)
}

/// Look up a user by exact username (callers lowercase first).
pub fn get_user(conn: &Connection, username: &str) -> Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, hashed_password, created_at FROM users WHERE username = ?1",
    )?;
    let result = stmt
        .query_row(params![username], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                hashed_password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;
    Ok(result)
}

// --- User texts ---

/// Save a submitted text, suppressing consecutive duplicates.
///
/// Returns the new row id, or None when the text is byte-identical to the
/// user's most recent saved text (re-running analyses on the same input
/// must not flood the history).
pub fn save_user_text(conn: &Connection, username: &str, text: &str) -> Result<Option<i64>> {
    let last: Option<String> = conn
        .query_row(
            "SELECT text FROM user_texts WHERE user_id = ?1 ORDER BY id DESC LIMIT 1",
            params![username],
            |row| row.get(0),
        )
        .optional()?;

    if last.as_deref() == Some(text) {
        return Ok(None);
    }

    conn.execute(
        "INSERT INTO user_texts (user_id, text) VALUES (?1, ?2)",
        params![username, text],
    )?;
    Ok(Some(conn.last_insert_rowid()))
}

/// Get the user's saved texts, newest first, capped at HISTORY_LIMIT.
///
/// Side effect: rows older than the newest HISTORY_LIMIT are deleted, so
/// the table never grows past the history window per user.
pub fn get_user_texts(conn: &Connection, username: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT text FROM user_texts WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![username, HISTORY_LIMIT as i64], |row| row.get(0))?;

    let mut texts = Vec::new();
    for row in rows {
        texts.push(row?);
    }

    // Prune everything older than the window we just read.
    conn.execute(
        "DELETE FROM user_texts
         WHERE user_id = ?1
           AND id NOT IN (
               SELECT id FROM user_texts WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2
           )",
        params![username, HISTORY_LIMIT as i64],
    )?;

    Ok(texts)
}

// --- Button clicks ---

/// Record a UI interaction event.
pub fn save_button_click(conn: &Connection, username: &str, button_name: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO button_clicks (user_id, button_name) VALUES (?1, ?2)",
        params![username, button_name],
    )?;
    Ok(conn.last_insert_rowid())
}

// --- Aggregates (status endpoint and CLI) ---

pub fn count_users(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

pub fn count_texts(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM user_texts", [], |row| row.get(0))?)
}

/// Click totals per button name, most-clicked first.
pub fn click_counts(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT button_name, COUNT(*) FROM button_clicks
         GROUP BY button_name
         ORDER BY COUNT(*) DESC, button_name",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

// rusqlite's optional() helper — converts "no rows" into None
use rusqlite::OptionalExtension;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_create_user_and_lookup() {
        let conn = test_db();
        assert!(create_user(&conn, "testuser", "$2b$12$hash").unwrap());

        let user = get_user(&conn, "testuser").unwrap().unwrap();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.hashed_password, "$2b$12$hash");

        assert!(get_user(&conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn test_create_duplicate_user_rejected() {
        let conn = test_db();
        assert!(create_user(&conn, "testuser", "h1").unwrap());
        // Second user with the same name must not be created
        assert!(!create_user(&conn, "testuser", "h2").unwrap());

        // The original hash is untouched
        let user = get_user(&conn, "testuser").unwrap().unwrap();
        assert_eq!(user.hashed_password, "h1");
    }

    #[test]
    fn test_save_user_text_dedups_consecutive() {
        let conn = test_db();
        create_user(&conn, "testuser", "h").unwrap();

        let first = save_user_text(&conn, "testuser", "Hello World").unwrap();
        assert!(first.is_some());

        // Same text again — suppressed
        let dup = save_user_text(&conn, "testuser", "Hello World").unwrap();
        assert!(dup.is_none());

        // Different text — saved
        let other = save_user_text(&conn, "testuser", "Something else").unwrap();
        assert!(other.is_some());

        // The original text again — no longer the most recent, so it saves
        let again = save_user_text(&conn, "testuser", "Hello World").unwrap();
        assert!(again.is_some());
    }

    #[test]
    fn test_history_newest_first_and_pruned() {
        let conn = test_db();
        create_user(&conn, "testuser", "h").unwrap();

        for i in 0..8 {
            save_user_text(&conn, "testuser", &format!("text {i}")).unwrap();
        }

        let texts = get_user_texts(&conn, "testuser").unwrap();
        assert_eq!(texts.len(), HISTORY_LIMIT);
        assert_eq!(texts[0], "text 7");
        assert_eq!(texts[4], "text 3");

        // The read pruned rows beyond the window
        assert_eq!(count_texts(&conn).unwrap(), HISTORY_LIMIT as i64);
    }

    #[test]
    fn test_history_is_per_user() {
        let conn = test_db();
        create_user(&conn, "alice", "h").unwrap();
        create_user(&conn, "bobby", "h").unwrap();

        save_user_text(&conn, "alice", "alice text").unwrap();
        save_user_text(&conn, "bobby", "bobby text").unwrap();

        assert_eq!(get_user_texts(&conn, "alice").unwrap(), vec!["alice text"]);
        assert_eq!(get_user_texts(&conn, "bobby").unwrap(), vec!["bobby text"]);
    }

    #[test]
    fn test_button_click_and_counts() {
        let conn = test_db();
        create_user(&conn, "testuser", "h").unwrap();

        let id = save_button_click(&conn, "testuser", "sentiment_an").unwrap();
        assert!(id > 0);
        save_button_click(&conn, "testuser", "sentiment_an").unwrap();
        save_button_click(&conn, "testuser", "txt_tags").unwrap();

        let counts = click_counts(&conn).unwrap();
        assert_eq!(counts[0], ("sentiment_an".to_string(), 2));
        assert_eq!(counts[1], ("txt_tags".to_string(), 1));
    }

    #[test]
    fn test_empty_history() {
        let conn = test_db();
        create_user(&conn, "testuser", "h").unwrap();
        assert!(get_user_texts(&conn, "testuser").unwrap().is_empty());
    }
}
