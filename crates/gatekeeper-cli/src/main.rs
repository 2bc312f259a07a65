//! # Gatekeeper
//!
//! Runs the RFID access controller with emulated peripherals on a terminal.
//! Card taps are typed on stdin, the status display is printed as a 16×2
//! panel whenever it changes, and output changes are logged.
//!
//! # Usage
//!
//! ```bash
//! # Whitelist of two cards, default timings
//! gatekeeper --capacity 2
//!
//! # Timings from a file
//! gatekeeper --config config/gatekeeper.toml
//!
//! # Controller internals
//! RUST_LOG=gatekeeper_controller=debug gatekeeper -c config/gatekeeper.toml
//! ```

mod console;
mod outputs;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use gatekeeper_controller::{AccessController, Peripherals};
use gatekeeper_core::GateConfig;
use gatekeeper_hardware::MonotonicClock;
use gatekeeper_hardware::mock::{MockCardReader, MockCardReaderHandle, VirtualLcd};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{ConsoleCommand, parse_line};
use crate::outputs::LoggingActuator;

/// Gatekeeper - RFID access controller emulator
#[derive(Parser, Debug)]
#[command(name = "gatekeeper")]
#[command(version)]
#[command(about = "RFID access controller running on emulated peripherals")]
#[command(long_about = None)]
struct Args {
    /// TOML configuration file; defaults are used when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of cards to register (overrides the configuration file)
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_tracing();

    let config = load_config(&args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(run(config))
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<GateConfig> {
    let mut config = match &args.config {
        Some(path) => GateConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GateConfig::default(),
    };

    if let Some(capacity) = args.capacity {
        config = config.with_capacity(capacity);
    }
    config.validate().context("invalid configuration")?;

    Ok(config)
}

async fn run(config: GateConfig) -> anyhow::Result<()> {
    info!("Gatekeeper v{} starting", gatekeeper_core::VERSION);

    let (reader, card) = MockCardReader::new();
    let peripherals = Peripherals {
        reader,
        display: VirtualLcd::default(),
        actuator: LoggingActuator::new(),
        clock: MonotonicClock::new(),
    };
    let mut gate = AccessController::new(config.clone(), peripherals)?;

    println!("{}", console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let mut ticker = interval(Duration::from_millis(config.poll_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last_frame = String::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = gate.poll_once();
                if report.rendered.is_some() {
                    let frame = gate.display().frame();
                    if frame != last_frame {
                        println!("{frame}");
                        last_frame = frame;
                    }
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line.context("failed to read stdin")? {
                    Some(line) => {
                        if !handle_line(&card, &line)? {
                            break;
                        }
                    }
                    None => {
                        info!("Console closed, still running until Ctrl+C");
                        stdin_open = false;
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Received shutdown signal");
                break;
            }
        }
    }

    info!(
        "Stopped with {} of {} cards registered",
        gate.context().registry().len(),
        gate.context().registry().capacity()
    );
    Ok(())
}

/// Apply one console line. Returns `false` when the user asked to quit.
fn handle_line(card: &MockCardReaderHandle, line: &str) -> anyhow::Result<bool> {
    let command = match parse_line(line) {
        None => return Ok(true),
        Some(Ok(command)) => command,
        Some(Err(e)) => {
            warn!("{}", e);
            return Ok(true);
        }
    };

    match command {
        ConsoleCommand::Present(id) => {
            info!("Card {} presented", id.to_string_separated());
            card.present_card(id)?;
        }
        ConsoleCommand::Remove => {
            info!("Card removed");
            card.remove_card()?;
        }
        ConsoleCommand::FailNextRead => {
            info!("Next read will fail");
            card.fail_next_read()?;
        }
        ConsoleCommand::Quit => return Ok(false),
    }

    Ok(true)
}
