use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use motord::{manual, run, CommandClient};
use stepper::{LoggingOutputs, MicrostepMode, PositionTracker, StepperDriver};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Vision host command endpoint
    #[arg(
        long,
        env = "MOTORD_SERVER",
        default_value = "http://127.0.0.1:5000/get_motor_commands"
    )]
    server: String,
    /// Microstep divisor (1, 2, 4, 8, 16 or 32)
    #[arg(long, default_value_t = 4)]
    microstepping: u32,
    /// Total pan travel in degrees
    #[arg(long, default_value_t = 126.0)]
    travel_degrees: f64,
    /// Seconds per full motor revolution
    #[arg(long, default_value_t = 1.0)]
    seconds_per_rev: f64,
    /// Interval between command polls, in milliseconds
    #[arg(long, default_value_t = 50)]
    poll_interval_ms: u64,
    /// Per-request timeout for command polls, in milliseconds
    #[arg(long, default_value_t = 1000)]
    poll_timeout_ms: u64,
    /// Keyboard test mode, bypassing the vision host
    #[arg(long)]
    manual: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let mode = MicrostepMode::from_divisor(cli.microstepping)?;
    let position = PositionTracker::new(cli.travel_degrees, mode.divisor());
    let mut driver = StepperDriver::new(LoggingOutputs, position, mode, cli.seconds_per_rev);
    info!(
        ?mode,
        max_position = driver.position().max(),
        center = driver.position().center(),
        "motord starting"
    );

    if cli.manual {
        manual::run(&mut driver).await?;
        run::shutdown(&mut driver).await;
    } else {
        let client = CommandClient::new(&cli.server, Duration::from_millis(cli.poll_timeout_ms))?;
        run::run(&mut driver, &client, Duration::from_millis(cli.poll_interval_ms)).await;
    }
    Ok(())
}
