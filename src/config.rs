use std::env;

use anyhow::Result;

/// Stop-word language for the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Russian => "russian",
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// SQLite database path (TEXTSCOPE_DB_PATH, defaults to ./textscope.db)
    pub db_path: String,
    /// PostgreSQL connection URL (when set and starts with postgres://, uses Postgres backend)
    pub database_url: Option<String>,
    /// Secret for HMAC session token signing (TEXTSCOPE_SESSION_SECRET env var)
    pub session_secret: String,
    /// Listen address for `serve` (TEXTSCOPE_BIND, default 0.0.0.0)
    pub bind: String,
    /// Listen port for `serve` (TEXTSCOPE_PORT, default 8080)
    pub port: u16,
    /// Stop-word language for the analyzer (TEXTSCOPE_LANGUAGE, default english)
    pub language: Language,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the session secret has no default — it is required for `serve`
    /// and checked there via `require_session_secret`.
    pub fn load() -> Result<Self> {
        let language = match env::var("TEXTSCOPE_LANGUAGE").as_deref() {
            Ok("russian") | Ok("ru") => Language::Russian,
            // "english" or unset both default to English
            _ => Language::English,
        };

        let port = match env::var("TEXTSCOPE_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("TEXTSCOPE_PORT is not a valid port: {raw}"))?,
            Err(_) => 8080,
        };

        Ok(Self {
            db_path: env::var("TEXTSCOPE_DB_PATH").unwrap_or_else(|_| "./textscope.db".to_string()),
            database_url: env::var("DATABASE_URL").ok(),
            session_secret: env::var("TEXTSCOPE_SESSION_SECRET").unwrap_or_default(),
            bind: env::var("TEXTSCOPE_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            language,
        })
    }

    /// Check that the session secret is configured.
    /// Call this before starting the web server — without it every
    /// session cookie would verify against an empty key.
    pub fn require_session_secret(&self) -> Result<()> {
        if self.session_secret.is_empty() {
            anyhow::bail!(
                "TEXTSCOPE_SESSION_SECRET not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
