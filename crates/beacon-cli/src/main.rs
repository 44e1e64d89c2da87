//! beacon — periodic HTTP endpoint availability monitor.
//!
//! # Usage
//!
//! ```text
//! beacon endpoints.yaml          # 3 attempts per endpoint
//! beacon endpoints.yaml 5 --format json
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use beacon_core::MonitorConfig;
use beacon_health::checker::parse_duration;
use beacon_health::{HttpProber, Monitor, MonitorSettings, ProbeConfig, ReportFormat};

#[derive(Parser, Debug)]
#[command(
    name = "beacon",
    about = "Beacon — checks HTTP endpoints on an interval and reports per-domain availability",
    version
)]
struct Cli {
    /// Endpoint configuration file (YAML, TOML, or JSON)
    config: PathBuf,

    /// Attempts per endpoint before a transport failure counts as DOWN
    #[arg(default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    retries: u32,

    /// Pause between cycles
    #[arg(long, default_value = "15s", value_parser = duration_arg)]
    interval: Duration,

    /// Per-attempt request timeout
    #[arg(long, default_value = "5s", value_parser = duration_arg)]
    timeout: Duration,

    /// Pause between attempts after a transport failure
    #[arg(long, default_value = "1s", value_parser = duration_arg)]
    retry_delay: Duration,

    /// Responses slower than this count as DOWN
    #[arg(long, default_value = "500ms", value_parser = duration_arg)]
    latency_threshold: Duration,

    /// Report format: text or json
    #[arg(short, long, default_value = "text")]
    format: ReportFormat,
}

impl Cli {
    fn probe_config(&self) -> ProbeConfig {
        ProbeConfig::default()
            .with_max_attempts(self.retries)
            .with_timeout(self.timeout)
            .with_retry_delay(self.retry_delay)
            .with_latency_threshold(self.latency_threshold)
    }

    fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            interval: self.interval,
            format: self.format,
        }
    }
}

fn duration_arg(s: &str) -> Result<Duration, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration '{s}' (expected e.g. 15s, 500ms, 1m)"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("beacon=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = MonitorConfig::from_file(&cli.config)?;
    let prober = HttpProber::new(cli.probe_config())?;

    info!(
        path = %cli.config.display(),
        endpoints = config.endpoints.len(),
        max_attempts = cli.retries,
        "configuration loaded"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(wait_for_interrupt(shutdown_tx));

    let mut monitor = Monitor::new(config.endpoints, prober, cli.monitor_settings());
    if let Err(e) = monitor.run(&mut std::io::stdout(), shutdown_rx).await {
        eprintln!("Unexpected error occurred: {e}");
        std::process::exit(1);
    }

    println!("\nMonitoring stopped. Exiting program.");
    Ok(())
}

/// Flip the shutdown channel on the first Ctrl-C; exit on the second.
///
/// The monitor only observes shutdown between requests, so a second
/// interrupt is the way out of a long retry sequence.
async fn wait_for_interrupt(shutdown_tx: watch::Sender<bool>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install CTRL+C handler");
        // Keep the sender alive so the monitor keeps running.
        std::future::pending::<()>().await;
    }
    info!("interrupt received, finishing current request");
    let _ = shutdown_tx.send(true);

    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("second interrupt, exiting immediately");
        std::process::exit(130);
    }
}
