//! Entropy Roulette CLI
//!
//! Runs roulette draws against a synthetic pointer so the draw pipeline
//! can be exercised without a browser.

use chrono::Utc;
use clap::Parser;
use entropy_roulette::{
    capture::{PointerSource, SyntheticPointer},
    config::FileConfig,
    draw::RangeConfig,
    session::{DrawSession, Presenter, SessionJournal, TextPresenter},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[cfg(feature = "metrics")]
use entropy_roulette::metrics::{
    MetricsRegistry, MetricsServer, MetricsServerConfig, MetricsSnapshot, MetricsState,
};
#[cfg(feature = "metrics")]
use tokio::sync::RwLock;

/// Classroom number roulette seeded from pointer motion.
#[derive(Debug, Parser)]
#[command(name = "entropy-roulette", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lowest number (inclusive).
    #[arg(long, allow_hyphen_values = true)]
    min: Option<String>,

    /// Highest number (inclusive).
    #[arg(long, allow_hyphen_values = true)]
    max: Option<String>,

    /// Lucky number that is never drawn.
    #[arg(long, allow_hyphen_values = true)]
    excluded: Option<String>,

    /// Number of draws to run.
    #[arg(short = 'n', long)]
    draws: Option<u32>,

    /// Synthetic pointer moves before each draw.
    #[arg(long)]
    samples: Option<usize>,

    /// Keep drawing until interrupted with Ctrl-C.
    #[arg(long)]
    continuous: bool,

    /// Metrics server port (0 to disable; needs the `metrics` feature).
    #[arg(long)]
    metrics_port: Option<u16>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    info!("Entropy Roulette v{}", entropy_roulette::VERSION);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let range = config.range;

    let mut session = match DrawSession::new(&config, SessionJournal::new()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to start session: {}", e);
            std::process::exit(1);
        }
    };

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || running.store(false, Ordering::SeqCst)) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
    }

    #[cfg(feature = "metrics")]
    let metrics = spawn_metrics_server(config.output.metrics_port);

    if let Ok(reel) = session.prepare_idle_reel(&range) {
        info!(slots = reel.len(), "Idle reel ready");
    }

    info!(
        min = range.min,
        max = range.max,
        excluded = range.excluded,
        "Drawing (this demo moves a synthetic pointer)"
    );

    let mut pointer = SyntheticPointer::new(config.capture.region);
    let mut presenter = TextPresenter::default();
    let mut completed = 0u32;

    while running.load(Ordering::SeqCst) {
        if !config.output.continuous && completed >= config.output.draws {
            break;
        }

        for _ in 0..config.output.samples_per_draw {
            if let Some((x, y)) = pointer.next_position() {
                session.record_client_pointer(x, y);
            }
        }

        match session.trigger_draw(&range) {
            Ok(ticket) => {
                presenter.present(&ticket);
                println!(
                    "Draw #{}: {}    {}",
                    ticket.draw_id,
                    ticket.winner,
                    presenter.render(&ticket)
                );
                session.complete_presentation(ticket.draw_id);
                completed += 1;
            }
            Err(e) if e.needs_more_motion() => {
                warn!(
                    samples = session.collector().len(),
                    "Not enough motion yet: {}", e
                );
            }
            Err(e) => {
                eprintln!("Draw rejected: {}", e);
                break;
            }
        }

        session.expire_stale(Utc::now());
        #[cfg(feature = "metrics")]
        {
            if let Some(state) = &metrics {
                state
                    .blocking_write()
                    .update(&MetricsSnapshot::from_session(&session));
            }
        }

        if config.output.continuous {
            std::thread::sleep(Duration::from_millis(500));
        }
    }

    println!();
    println!("Session history (oldest first):");
    for record in session.sink().history().iter().rev() {
        println!(
            "  #{:<3} {:>6}  {}  samples={} digest={}",
            record.id,
            record.value,
            record.timestamp_iso(),
            record.sample_count,
            &record.entropy_digest[..12.min(record.entropy_digest.len())]
        );
    }

    let stats = session.stats();
    info!(
        draws = stats.draws,
        rejected = stats.rejected_total(),
        "Done"
    );
}

/// Loads the configuration file (or defaults) and applies CLI overrides.
fn load_config(cli: &Cli) -> Result<FileConfig, String> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path).map_err(|e| e.to_string())?,
        None => FileConfig::default(),
    };

    if cli.min.is_some() || cli.max.is_some() || cli.excluded.is_some() {
        let current = config.range;
        let field = |arg: &Option<String>, fallback: i64| {
            arg.clone().unwrap_or_else(|| fallback.to_string())
        };
        config.range = RangeConfig::parse(
            &field(&cli.min, current.min),
            &field(&cli.max, current.max),
            &field(&cli.excluded, current.excluded),
        )
        .map_err(|e| e.to_string())?;
    }

    if let Some(draws) = cli.draws {
        config.output.draws = draws;
    }
    if let Some(samples) = cli.samples {
        config.output.samples_per_draw = samples;
    }
    if cli.continuous {
        config.output.continuous = true;
    }
    if let Some(port) = cli.metrics_port {
        config.output.metrics_port = port;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

#[cfg(feature = "metrics")]
fn spawn_metrics_server(port: u16) -> Option<Arc<RwLock<MetricsState>>> {
    if port == 0 {
        return None;
    }

    let registry = match MetricsRegistry::new() {
        Ok(r) => r,
        Err(e) => {
            warn!("Metrics server disabled: {}", e);
            return None;
        }
    };
    let server = MetricsServer::new(MetricsServerConfig::with_port(port), registry);
    let state = server.state();

    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                warn!("Failed to start metrics runtime: {}", e);
                return;
            }
        };
        if let Err(e) = runtime.block_on(server.run()) {
            warn!("Metrics server stopped: {}", e);
        }
    });

    Some(state)
}
