// Database schema — table creation and migrations.
//
// A `schema_version` table tracks which schema versions have been applied,
// so future migrations can run exactly once per database.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Registered accounts. Usernames are stored lowercase.
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            hashed_password TEXT NOT NULL,     -- bcrypt
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Texts submitted for analysis. user_id references the username
        -- rather than the numeric id so rows stay readable in ad-hoc queries.
        CREATE TABLE IF NOT EXISTS user_texts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL REFERENCES users(username),
            text TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- UI interaction events (login_button, sentiment_an, ...)
        CREATE TABLE IF NOT EXISTS button_clicks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL REFERENCES users(username),
            button_name TEXT NOT NULL,
            click_timestamp TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for history lookups and pruning (newest rows per user)
        CREATE INDEX IF NOT EXISTS idx_texts_user
            ON user_texts(user_id, id DESC);

        -- Index for per-user click queries
        CREATE INDEX IF NOT EXISTS idx_clicks_user
            ON button_clicks(user_id);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Running create_tables twice should not error
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, users, user_texts, button_clicks = 4 tables
        // (sqlite_sequence from AUTOINCREMENT is excluded by the sqlite_% filter)
        assert_eq!(count, 4i64);
    }

    #[test]
    fn test_username_unique_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        conn.execute(
            "INSERT INTO users (username, hashed_password) VALUES ('alice', 'h1')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO users (username, hashed_password) VALUES ('alice', 'h2')",
            [],
        );
        assert!(dup.is_err());
    }
}
