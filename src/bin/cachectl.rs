//! cachectl - inspect and manage a multicache namespace
//!
//! Loads a cache module configuration (YAML file or `MULTICACHE_*`
//! environment variables), builds the engines and runs one operation
//! against the configured namespace.

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use multicache::utils::logging::{LogFormat, parse_level};
use multicache::{CacheManager, CacheModuleConfig};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, debug};

#[derive(Parser)]
#[command(name = "cachectl")]
#[command(about = "Inspect and manage a multicache namespace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Cache module configuration file (YAML). Falls back to MULTICACHE_* env vars.
    #[arg(short, long, env = "MULTICACHE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the module prefix
    #[arg(short, long)]
    prefix: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MULTICACHE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List keys in the namespace
    Keys {
        /// `*` pattern, everything when omitted
        pattern: Option<String>,
    },

    /// Print a value as JSON
    Get { key: String },

    /// Store a JSON value
    Set {
        key: String,

        /// JSON document; bare words are stored as strings
        value: String,

        /// TTL in milliseconds, engine default when omitted
        #[arg(long)]
        ttl_ms: Option<u64>,
    },

    /// Delete a key, or every key matching a pattern
    Del { key_or_pattern: String },

    /// Clear every engine
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = parse_level(&cli.log_level).unwrap_or(Level::WARN);
    multicache::utils::init_tracing(level, cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => CacheModuleConfig::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => CacheModuleConfig::from_env().context("loading configuration from environment")?,
    };
    if let Some(prefix) = cli.prefix {
        config.cache_module_prefix = Some(prefix);
    }

    let manager = CacheManager::new(&config)
        .await
        .context("building cache engines")?;
    debug!("Engines: {:?}", manager.registry().names());

    match cli.command {
        Commands::Keys { pattern } => {
            for key in manager.list_keys(pattern.as_deref()).await? {
                println!("{}", key);
            }
        }
        Commands::Get { key } => match manager.get::<Value>(&key).await? {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            None => anyhow::bail!("key `{}` not found", key),
        },
        Commands::Set { key, value, ttl_ms } => {
            let value = parse_value(&value);
            manager
                .set(&key, &value, ttl_ms.map(Duration::from_millis))
                .await?;
        }
        Commands::Del { key_or_pattern } => manager.delete(&key_or_pattern).await?,
        Commands::Reset => manager.reset().await?,
    }

    Ok(())
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
