use clap::Parser;
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use tokio::time::{sleep, Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;
use visiond::{app, AppState};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, env = "VISIOND_ADDR", default_value = "0.0.0.0:5000")]
    addr: String,
    /// Start with the motor enable flag cleared
    #[arg(long)]
    motor_disabled: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let (state, mut quit) = AppState::new();
    if cli.motor_disabled {
        state.motor_enabled.store(false, Ordering::SeqCst);
    }

    let addr: SocketAddr = cli.addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "visiond listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(async move {
            let _ = quit.wait_for(|q| *q).await;
            // one more poll cycle so the motor host can observe quit=true
            sleep(Duration::from_secs(1)).await;
        })
        .await?;
    info!("visiond stopped");
    Ok(())
}
