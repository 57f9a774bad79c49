// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Send.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points — Rust enforces this because
// MutexGuard is !Send.
//
// The free functions in queries.rs remain unchanged so existing tests
// continue to work against Connection directly.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::User;
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn create_user(&self, username: &str, hashed_password: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::create_user(&conn, username, hashed_password)
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().await;
        super::queries::get_user(&conn, username)
    }

    async fn save_user_text(&self, username: &str, text: &str) -> Result<Option<i64>> {
        let conn = self.conn.lock().await;
        super::queries::save_user_text(&conn, username, text)
    }

    async fn get_user_texts(&self, username: &str) -> Result<Vec<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_user_texts(&conn, username)
    }

    async fn save_button_click(&self, username: &str, button_name: &str) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::save_button_click(&conn, username, button_name)
    }

    async fn count_users(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_users(&conn)
    }

    async fn count_texts(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::count_texts(&conn)
    }

    async fn click_counts(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().await;
        super::queries::click_counts(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn test_trait_user_roundtrip() {
        let db = test_db();
        assert!(db.create_user("testuser", "$2b$12$hash").await.unwrap());
        assert!(!db.create_user("testuser", "other").await.unwrap());

        let user = db.get_user("testuser").await.unwrap().unwrap();
        assert_eq!(user.username, "testuser");
        assert!(db.get_user("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trait_text_dedup_and_history() {
        let db = test_db();
        db.create_user("testuser", "h").await.unwrap();

        assert!(db
            .save_user_text("testuser", "Hello World")
            .await
            .unwrap()
            .is_some());
        assert!(db
            .save_user_text("testuser", "Hello World")
            .await
            .unwrap()
            .is_none());

        let texts = db.get_user_texts("testuser").await.unwrap();
        assert_eq!(texts, vec!["Hello World"]);
    }

    #[tokio::test]
    async fn test_trait_click_counts() {
        let db = test_db();
        db.create_user("testuser", "h").await.unwrap();
        db.save_button_click("testuser", "login_button").await.unwrap();
        db.save_button_click("testuser", "login_button").await.unwrap();

        let counts = db.click_counts().await.unwrap();
        assert_eq!(counts, vec![("login_button".to_string(), 2)]);
        assert_eq!(db.count_users().await.unwrap(), 1);
        assert_eq!(db.count_texts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db();
        assert_eq!(db.table_count().await.unwrap(), 4);
    }
}
