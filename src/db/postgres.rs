// PgDatabase — PostgreSQL backend implementing the Database trait.
//
// Uses sqlx PgPool for native async queries. All queries use runtime
// parameter binding (not compile-time macros) to avoid requiring
// DATABASE_URL at compile time.
//
// Key differences from SQLite:
// - TIMESTAMPTZ instead of TEXT for timestamps
// - $1/$2 parameter syntax (handled by sqlx)
// - GENERATED ALWAYS AS IDENTITY for auto-increment

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx_core::pool::Pool;
use sqlx_core::row::Row;
use sqlx_postgres::Postgres;

use super::models::User;
use super::traits::Database;

/// Type alias for the PostgreSQL connection pool.
pub type PgPool = Pool<Postgres>;

/// History window — must match queries::HISTORY_LIMIT on the SQLite side.
const HISTORY_LIMIT: i64 = 5;

pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    /// Connect to PostgreSQL and run migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to PostgreSQL at {database_url}"))?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run all pending migrations.
    ///
    /// Acquires a Postgres session-level advisory lock so that concurrent
    /// processes (e.g. two app instances starting together) don't race to
    /// apply the same migration.
    ///
    /// Session-level advisory locks are bound to the backend session that
    /// acquired them, so the lock and unlock MUST run on the same physical
    /// connection. We acquire a dedicated connection (`lock_conn`) for this
    /// purpose and keep it alive for the duration of the migration loop.
    /// The unlock always runs even if a migration fails — we capture the
    /// migration result first, then unlock, then surface any error.
    async fn run_migrations(&self) -> Result<()> {
        // 0x544558545343 = ASCII "TEXTSC" as a big-endian i64.
        // Used as the advisory lock key to namespace this lock to textscope.
        const MIGRATION_LOCK_KEY: i64 = 0x544558545343;

        let mut lock_conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire connection for migration advisory lock")?;

        // Block until no other textscope process is running migrations.
        sqlx_core::query::query("SELECT pg_advisory_lock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *lock_conn)
            .await
            .context("Failed to acquire migration advisory lock")?;

        let migration_result: Result<()> = async {
            // Ensure schema_version table exists (idempotent DDL)
            sqlx_core::query::query(
                "CREATE TABLE IF NOT EXISTS schema_version (
                    version INTEGER PRIMARY KEY,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
            )
            .execute(&self.pool)
            .await?;

            let migrations = [(
                1i32,
                include_str!("../../migrations/postgres/0001_initial.sql"),
            )];

            for (version, sql) in migrations {
                let applied: bool = sqlx_core::query::query(
                    "SELECT COUNT(*) > 0 FROM schema_version WHERE version = $1",
                )
                .bind(version)
                .fetch_one(&self.pool)
                .await
                .map(|row| row.get::<bool, _>(0))
                .unwrap_or(false);

                if !applied {
                    // Each migration runs in a transaction so the schema change
                    // and the schema_version insert commit or roll back together.
                    let mut tx = self.pool.begin().await?;
                    sqlx_core::raw_sql::raw_sql(sql).execute(&mut *tx).await?;
                    sqlx_core::query::query(
                        "INSERT INTO schema_version (version) VALUES ($1)",
                    )
                    .bind(version)
                    .execute(&mut *tx)
                    .await?;
                    tx.commit().await?;
                }
            }

            Ok(())
        }
        .await;

        // Release the advisory lock on the same connection that acquired it.
        let unlock_result = sqlx_core::query::query("SELECT pg_advisory_unlock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *lock_conn)
            .await
            .context("Failed to release migration advisory lock");

        // Migration error takes priority over unlock error.
        migration_result?;
        unlock_result?;

        Ok(())
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn table_count(&self) -> Result<i64> {
        let row = sqlx_core::query::query(
            "SELECT COUNT(*)::bigint FROM information_schema.tables
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get::<i64, _>(0))
    }

    async fn create_user(&self, username: &str, hashed_password: &str) -> Result<bool> {
        // ON CONFLICT DO NOTHING + rows_affected distinguishes "created"
        // from "username taken" in one round-trip.
        let result = sqlx_core::query::query(
            "INSERT INTO users (username, hashed_password)
             VALUES ($1, $2)
             ON CONFLICT (username) DO NOTHING",
        )
        .bind(username)
        .bind(hashed_password)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx_core::query::query(
            "SELECT id, username, hashed_password,
                    to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') as created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| User {
            id: r.get::<i64, _>(0),
            username: r.get(1),
            hashed_password: r.get(2),
            created_at: r.get(3),
        }))
    }

    async fn save_user_text(&self, username: &str, text: &str) -> Result<Option<i64>> {
        let last: Option<String> = sqlx_core::query::query(
            "SELECT text FROM user_texts WHERE user_id = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .map(|r| r.get(0));

        if last.as_deref() == Some(text) {
            return Ok(None);
        }

        let row = sqlx_core::query::query(
            "INSERT INTO user_texts (user_id, text) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;
        Ok(Some(row.get::<i64, _>(0)))
    }

    async fn get_user_texts(&self, username: &str) -> Result<Vec<String>> {
        let rows = sqlx_core::query::query(
            "SELECT text FROM user_texts WHERE user_id = $1 ORDER BY id DESC LIMIT $2",
        )
        .bind(username)
        .bind(HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let texts: Vec<String> = rows.iter().map(|r| r.get::<String, _>(0)).collect();

        // Prune everything older than the window we just read.
        sqlx_core::query::query(
            "DELETE FROM user_texts
             WHERE user_id = $1
               AND id NOT IN (
                   SELECT id FROM user_texts WHERE user_id = $1 ORDER BY id DESC LIMIT $2
               )",
        )
        .bind(username)
        .bind(HISTORY_LIMIT)
        .execute(&self.pool)
        .await?;

        Ok(texts)
    }

    async fn save_button_click(&self, username: &str, button_name: &str) -> Result<i64> {
        let row = sqlx_core::query::query(
            "INSERT INTO button_clicks (user_id, button_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(button_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get::<i64, _>(0))
    }

    async fn count_users(&self) -> Result<i64> {
        let row = sqlx_core::query::query("SELECT COUNT(*)::bigint FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>(0))
    }

    async fn count_texts(&self) -> Result<i64> {
        let row = sqlx_core::query::query("SELECT COUNT(*)::bigint FROM user_texts")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>(0))
    }

    async fn click_counts(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx_core::query::query(
            "SELECT button_name, COUNT(*)::bigint FROM button_clicks
             GROUP BY button_name
             ORDER BY COUNT(*) DESC, button_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| (r.get::<String, _>(0), r.get::<i64, _>(1)))
            .collect())
    }
}
