//! Interactive terminal chat against the shop assistant.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sewworld_rag::{AssistantConfig, Catalog, ConversationEngine, Profile, Role};

#[derive(Parser, Debug)]
#[command(name = "sewworld-chat")]
#[command(version)]
#[command(about = "Chat with the SR Sewing World shop assistant", long_about = None)]
struct Args {
    /// Catalog JSON with `products` and `articles` (bundled catalog by default)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Assistant configuration JSON; overrides --profile
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Configuration profile: production, development or default
    /// (falls back to SEWWORLD_PROFILE)
    #[arg(long)]
    profile: Option<String>,

    /// Session identifier (a fresh one by default)
    #[arg(long)]
    session: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AssistantConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let profile = args
                .profile
                .as_deref()
                .map(Profile::parse)
                .unwrap_or_else(Profile::from_env);
            AssistantConfig::for_profile(profile)
        }
    };

    let default_level = if config.debug.enable_debug_logging {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let catalog = match &args.catalog {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            Catalog::from_json_str(&json)?
        }
        None => Catalog::from_json_str(sewworld_rag::BUNDLED_CATALOG)?,
    };

    let metrics_enabled = config.debug.enable_performance_metrics;
    let show_confidence = config.response.enable_confidence_scores;
    let store_name = config.store.name.clone();
    let engine = ConversationEngine::from_catalog(&catalog, config)?;
    let session = args
        .session
        .unwrap_or_else(ConversationEngine::new_session_id);

    println!("{} assistant. Type /history, /reset or /quit.", store_name);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                engine.clear_conversation(&session);
                println!("Conversation cleared.");
            }
            "/history" => match engine.get_history(&session) {
                Some(history) => {
                    for message in &history.messages {
                        let who = match message.role {
                            Role::User => "you",
                            Role::Assistant => "assistant",
                        };
                        println!("[{}] {}: {}", message.timestamp.format("%H:%M:%S"), who, message.content);
                    }
                }
                None => println!("No messages yet."),
            },
            _ => {
                let response = engine.process_query(&session, input);
                println!("\n{}\n", response.answer);
                if show_confidence {
                    println!("({}, confidence {:.1})", response.intent, response.confidence);
                }
                if !response.suggested_actions.is_empty() {
                    println!("Try: {}\n", response.suggested_actions.join(" | "));
                }
            }
        }
    }

    if metrics_enabled {
        for (operation, average) in engine.metrics().snapshot() {
            tracing::info!(operation = %operation, average_ms = average.as_secs_f64() * 1000.0, "Timing");
        }
    }

    Ok(())
}
