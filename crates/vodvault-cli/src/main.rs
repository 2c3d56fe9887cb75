use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::sync::broadcast;
use uuid::Uuid;

use vodvault_client::GatewayClient;
use vodvault_core::models::CreateVideoRecord;
use vodvault_core::{content_type_for_key, GatewayConfig, ProgressFn};
use vodvault_sync::ChangeDetector;
use vodvault_transfer::TransferEngine;

#[derive(Parser, Debug)]
#[command(name = "vodvault")]
#[command(about = "Move video recordings in and out of a bucket behind the signing gateway")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a local recording and register its metadata record
    Upload {
        /// Path to a .mp4 or .png file
        file: PathBuf,
    },
    /// Download an object into a directory
    Download {
        /// Bucket key of the object
        key: String,
        /// Signed or public URL to fetch the bytes from
        url: String,
        /// Destination directory (default: current directory)
        #[arg(long, default_value = ".")]
        dest: PathBuf,
    },
    /// Watch the bucket for remote changes
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// List all records in the bucket
    List {
        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Delete a recording by record ID
    Delete { id: Uuid },
    /// Protect or release a recording from gateway housekeeping
    Protect {
        id: Uuid,
        /// Release protection instead of applying it
        #[arg(long)]
        release: bool,
    },
    /// Replace a recording's tag
    Tag { id: Uuid, tag: String },
    /// Show bucket storage usage
    Usage,
}

fn console_progress() -> ProgressFn {
    Arc::new(|pct| {
        eprint!("\r{pct:>3}%");
        if pct == 100 {
            eprintln!();
        }
        let _ = std::io::stderr().flush();
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = GatewayConfig::from_env().context("Failed to load gateway configuration")?;
    let client = GatewayClient::new(&config)?;
    let detector = Arc::new(ChangeDetector::new(client.clone()));
    let engine = TransferEngine::new(client.clone(), Arc::clone(&detector));

    match cli.command {
        Command::Upload { file } => {
            let key = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("Path has no usable file name")?
                .to_string();
            let content_type = content_type_for_key(&key)?;
            let size = std::fs::metadata(&file)
                .with_context(|| format!("Failed to stat {}", file.display()))?
                .len();

            engine.upload(&file, console_progress()).await?;
            let record = engine
                .register_recording(&CreateVideoRecord {
                    key: key.clone(),
                    content_type: content_type.to_string(),
                    file_size: size as i64,
                    recorded_at: Utc::now(),
                })
                .await?;
            println!("uploaded {} as record {}", key, record.id);
        }
        Command::Download { key, url, dest } => {
            let path = engine
                .download(&key, &url, &dest, console_progress())
                .await?;
            println!("wrote {}", path.display());
        }
        Command::Watch { interval } => {
            detector.poll_init().await?;
            let mut changes = detector.subscribe();
            detector.start_polling(Duration::from_secs(interval));
            println!(
                "watching bucket {} (poll every {interval}s, ctrl-c to stop)",
                client.bucket()
            );
            loop {
                match changes.recv().await {
                    Ok(()) => println!(
                        "remote change detected (clock {})",
                        detector.cached_clock().unwrap_or_default()
                    ),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
        Command::List { format } => {
            let records = client.list_records().await?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                println!("{:<36}  {:>12}  {:<20}  KEY", "ID", "BYTES", "RECORDED");
                for r in &records {
                    println!(
                        "{}  {:>12}  {:<20}  {}{}",
                        r.id,
                        r.file_size,
                        r.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                        r.key,
                        if r.protected { "  [protected]" } else { "" }
                    );
                }
                println!("{} record(s)", records.len());
            }
        }
        Command::Delete { id } => {
            engine.delete_recording(id).await?;
            println!("deleted {id}");
        }
        Command::Protect { id, release } => {
            engine.protect_recording(id, !release).await?;
            println!(
                "{} {id}",
                if release { "released" } else { "protected" }
            );
        }
        Command::Tag { id, tag } => {
            engine.tag_recording(id, &tag).await?;
            println!("tagged {id} as {tag}");
        }
        Command::Usage => {
            let usage = client.usage().await?;
            println!(
                "{} / {} bytes used ({} free)",
                usage.used_bytes,
                usage.max_bytes,
                usage.remaining_bytes()
            );
        }
    }

    Ok(())
}
