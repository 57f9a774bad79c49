use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use textscope::analysis::{TextAnalyzer, BIGRAM_FREQ_FILTER, BIGRAM_TOP_N};
use textscope::config::{Config, Language};

/// Textscope: an authenticated text-analysis dashboard.
///
/// Submit free text and run canned NLP analyses — sentiment polarity,
/// bigram collocations, descriptive statistics, and pairwise similarity —
/// with submissions and interactions persisted to a relational store.
#[derive(Parser)]
#[command(name = "textscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the web server
    Serve {
        /// Listen port (overrides TEXTSCOPE_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Bind address (overrides TEXTSCOPE_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Run the analyses once from the terminal, no server or login
    Analyze {
        /// The text to analyze
        text: String,

        /// Second text for similarity comparison
        #[arg(long)]
        compare: Option<String>,

        /// Stop-word language: english (default) or russian
        #[arg(long)]
        language: Option<String>,
    },

    /// Show database stats (users, texts, per-button clicks)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("textscope=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing textscope database...");
            let config = Config::load()?;
            let db = init_database(&config).await?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", database_location(&config));
            println!("Tables created: {table_count}");
            println!("\nTextscope is ready. Next step: set TEXTSCOPE_SESSION_SECRET");
            println!("  (see .env.example for the required variables)");
            println!("\nThen run: cargo run -- serve");
        }

        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }
            config.require_session_secret()?;

            let db = init_database(&config).await?;
            textscope::web::run_server(config, db).await?;
        }

        Commands::Analyze {
            text,
            compare,
            language,
        } => {
            let config = Config::load()?;
            let language = match language.as_deref() {
                Some("russian") | Some("ru") => Language::Russian,
                Some("english") | Some("en") => Language::English,
                Some(other) => anyhow::bail!("Unknown language: {other}"),
                None => config.language,
            };

            let analyzer = TextAnalyzer::new(&text, language);

            let sentiment = analyzer.sentiment();
            println!("{}", "Sentiment".bold());
            println!(
                "  {} (polarity {:.2}, {} lexicon hits)",
                sentiment.label.to_string().cyan(),
                sentiment.polarity,
                sentiment.hits
            );

            println!("{}", "Top bigrams".bold());
            let bigrams = analyzer.top_bigrams(BIGRAM_FREQ_FILTER, BIGRAM_TOP_N);
            if bigrams.is_empty() {
                println!("  {}", "none above the frequency floor".dimmed());
            } else {
                for bigram in &bigrams {
                    println!("  • {bigram}");
                }
            }

            let stats = analyzer.basic_stats();
            println!("{}", "Basic stats".bold());
            println!("  characters: {}", stats.char_count);
            println!("  words: {}", stats.word_count);
            println!("  sentences: {}", stats.sentence_count);
            println!("  avg word length: {:.2}", stats.avg_word_length);
            if !stats.pos_counts.is_empty() {
                let parts: Vec<String> = stats
                    .pos_counts
                    .iter()
                    .map(|(tag, count)| format!("{tag} {count}"))
                    .collect();
                println!("  parts of speech: {}", parts.join(", "));
            }

            if let Some(other) = compare {
                let similarity = analyzer.similarity(&other);
                println!("{}", "Similarity".bold());
                println!("  {:.2} / 1.00", similarity);
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            let db = open_database(&config).await?;

            println!("Users: {}", db.count_users().await?);
            println!("Texts: {}", db.count_texts().await?);

            let clicks = db.click_counts().await?;
            if clicks.is_empty() {
                println!("Clicks: none recorded");
            } else {
                println!("Clicks:");
                for (button, count) in clicks {
                    println!("  {button}: {count}");
                }
            }
        }
    }

    Ok(())
}

/// Open an existing database, picking the backend from DATABASE_URL.
async fn open_database(config: &Config) -> Result<Arc<dyn textscope::db::Database>> {
    if let Some(ref url) = config.database_url {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            #[cfg(feature = "postgres")]
            {
                info!("Using PostgreSQL backend");
                return textscope::db::connect_postgres(url).await;
            }
            #[cfg(not(feature = "postgres"))]
            anyhow::bail!(
                "DATABASE_URL points to PostgreSQL but the 'postgres' feature is not compiled in.\n\
                 Rebuild with: cargo build --features postgres"
            );
        }
    }
    #[cfg(feature = "sqlite")]
    return textscope::db::open_sqlite(&config.db_path);
    #[cfg(not(feature = "sqlite"))]
    anyhow::bail!("No database backend compiled in. Enable the 'sqlite' or 'postgres' feature.");
}

/// Initialize the database (create if needed).
async fn init_database(config: &Config) -> Result<Arc<dyn textscope::db::Database>> {
    if let Some(ref url) = config.database_url {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            #[cfg(feature = "postgres")]
            {
                info!("Using PostgreSQL backend");
                return textscope::db::connect_postgres(url).await;
            }
            #[cfg(not(feature = "postgres"))]
            anyhow::bail!(
                "DATABASE_URL points to PostgreSQL but the 'postgres' feature is not compiled in.\n\
                 Rebuild with: cargo build --features postgres"
            );
        }
    }
    #[cfg(feature = "sqlite")]
    return textscope::db::initialize_sqlite(&config.db_path);
    #[cfg(not(feature = "sqlite"))]
    anyhow::bail!("No database backend compiled in. Enable the 'sqlite' or 'postgres' feature.");
}

/// Human-readable location of whichever backend is in use.
fn database_location(config: &Config) -> String {
    match config.database_url {
        Some(ref url) if url.starts_with("postgres") => url.clone(),
        _ => config.db_path.clone(),
    }
}
