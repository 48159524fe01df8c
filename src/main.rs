//! floatchat command line.
//!
//! Usage:
//!   cargo run -- serve
//!   cargo run -- ask "show temperature anomaly" [--offline]
//!   cargo run -- classify "pacific temperature trend"
//!   cargo run -- history --user-id alice

use anyhow::Result;
use clap::{Parser, Subcommand};
use floatchat::{
    ResponseEngine,
    clients::FallbackChatClient,
    config::{Config, RuntimeConfig},
    http::start_http_server,
    schemas::{ANONYMOUS_USER, ChatMessage},
};
use tracing::info;

#[derive(Parser)]
#[command(name = "floatchat")]
#[command(about = "Ocean data chat assistant with an offline response engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the chat API backed by the local engine
    Serve,
    /// Ask a question through the live backend, falling back to the local engine
    Ask {
        message: String,
        /// Skip the live backend entirely
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Show which intent and rule a message resolves to
    Classify { message: String },
    /// Fetch chat history from the live backend
    History {
        #[arg(long, default_value = ANONYMOUS_USER)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Subscriber first so configuration warnings are not lost.
    Config::load_env_file();
    let runtime = RuntimeConfig::load_from_env();
    tracing_subscriber::fmt()
        .with_env_filter(runtime.log_level.as_str())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::load_with_runtime(runtime).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    match cli.command {
        Commands::Serve => {
            info!(
                "Configuration loaded: bind={}, origins={}",
                config.server.bind,
                config.server.allowed_origins.join(",")
            );
            start_http_server(&config).await?;
        }
        Commands::Ask {
            message,
            offline,
            user_id,
        } => {
            let client = if offline {
                FallbackChatClient::offline(ResponseEngine::new(config.engine.seed))
            } else {
                FallbackChatClient::from_config(&config)?
            };
            let reply = client.send(&ChatMessage::new(message, user_id)).await;
            info!(source = ?reply.source, "Reply ready");
            println!("{}", serde_json::to_string_pretty(&reply.document)?);
        }
        Commands::Classify { message } => {
            let classification = ResponseEngine::new(config.engine.seed).classify(&message);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "intent": classification.intent,
                    "rule": classification.rule,
                    "visualizations": classification.document.visualizations.len(),
                    "suggestions": classification.document.suggestions,
                }))?
            );
        }
        Commands::History { user_id } => {
            let client = FallbackChatClient::from_config(&config)?;
            let history = client.history(&user_id).await;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
    }

    Ok(())
}
