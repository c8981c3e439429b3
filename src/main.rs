use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use cmwatch::config::Config;
use cmwatch::dispatch::{self, PutvalWriter};
use cmwatch::hub;
use cmwatch::metric::{format_value, MetricValue, TYPE_BITRATE};
use cmwatch::poller::Poller;

/// Cable modem telemetry agent for Virgin Media SuperHubs.
#[derive(Parser)]
#[command(name = "cmwatch", about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Logging verbosity level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one poll cycle and print the provisioned bitrates.
    Once,
    /// Print version information and exit.
    Version,
}

/// Build-time version info, injected via environment at build time.
mod version {
    /// Release version string (set at build time).
    pub const RELEASE: &str = env!("CARGO_PKG_VERSION");

    /// Git commit hash (set at build time via env, or "unknown").
    pub fn git_commit() -> &'static str {
        option_env!("GIT_COMMIT").unwrap_or("unknown")
    }

    /// Full version string with platform info.
    pub fn full() -> String {
        format!(
            "{} (commit: {}, {}/{})",
            RELEASE,
            git_commit(),
            std::env::consts::OS,
            std::env::consts::ARCH,
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle version subcommand before anything else.
    if let Some(Command::Version) = &cli.command {
        println!("cmwatch {}", version::full());
        return Ok(());
    }

    let cfg = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // The verbose flag raises the default filter; an explicit --log-level
    // wins over both.
    let level = cli.log_level.clone().unwrap_or_else(|| {
        if cfg.verbose {
            "debug".to_string()
        } else {
            "info".to_string()
        }
    });
    let filter =
        EnvFilter::try_new(&level).with_context(|| format!("invalid log level: {level}"))?;

    // stdout carries the PUTVAL stream; diagnostics go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    for key in &cfg.unknown_keys {
        warn!(key = %key, "unknown config key");
    }

    // Build and run the tokio runtime.
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    match cli.command {
        Some(Command::Once) => rt.block_on(run_once(cfg)),
        _ => rt.block_on(run(cfg)),
    }
}

/// Single-shot mode: one poll cycle, bitrates on stdout, non-zero exit on
/// any failure.
async fn run_once(cfg: Config) -> Result<()> {
    let client = hub::Client::new(&cfg.hub)?;
    let poller = Poller::new(client, &cfg)?;

    let metrics = poller.collect().await?;

    for metric in &metrics {
        if metric.type_name != TYPE_BITRATE {
            continue;
        }
        let direction = match metric.type_instance.as_str() {
            "max-down" => "down",
            "max-up" => "up",
            _ => continue,
        };
        let MetricValue::Single(value) = metric.value else {
            continue;
        };
        println!(
            "{}.{}:{}",
            metric.plugin_instance,
            direction,
            format_value(value)
        );
    }

    Ok(())
}

/// Daemon mode: poll on the configured interval until SIGINT or SIGTERM.
async fn run(cfg: Config) -> Result<()> {
    info!(
        version = version::RELEASE,
        commit = version::git_commit(),
        generation = ?cfg.hub.generation,
        "starting cmwatch",
    );

    let client = hub::Client::new(&cfg.hub)?;
    let poller = Poller::new(client, &cfg)?;

    let (host, interval) = dispatch::resolve_target(&cfg.hostname, cfg.interval);
    let mut sink = PutvalWriter::new(std::io::stdout().lock(), host, interval);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .expect("failed to register SIGTERM handler");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("received SIGINT, shutting down");
                break;
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = ticker.tick() => {
                // A failed cycle emits nothing and the loop keeps its
                // schedule; retry policy stays with the scheduler.
                match poller.collect().await {
                    Ok(metrics) => {
                        for metric in &metrics {
                            sink.dispatch(metric)?;
                        }
                        sink.flush()?;
                        debug!(count = metrics.len(), "dispatched poll cycle");
                    }
                    Err(e) => error!(error = %e, "poll cycle failed"),
                }
            }
        }
    }

    info!("cmwatch stopped");

    Ok(())
}
