use std::time::Duration;

use protocol::MotorCommand;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::channel::CommandClient;
use stepper::{recalibrate, MotorOutputs, StepOutcome, StepperDriver};

/// Drive the motor from the remote command stream until the vision
/// host requests shutdown or an interrupt arrives, then recenter and
/// release the outputs.
///
/// Polling runs in its own task and publishes each successful command
/// into a watch channel, so a slow or absent link never holds up pulse
/// timing: the stepping loop reads the latest command without blocking
/// and waits at most one step interval per iteration. A failed poll is
/// "no update this cycle": the last good command stays in effect and
/// the boundary guard still runs on every pulse.
pub async fn run<O: MotorOutputs>(
    driver: &mut StepperDriver<O>,
    client: &CommandClient,
    poll_interval: Duration,
) {
    let (tx, mut rx) = watch::channel(MotorCommand::off());
    let poller = tokio::spawn(poll_loop(client.clone(), tx, poll_interval));
    info!(position = driver.position().current(), "motor loop started");
    loop {
        let cmd = *rx.borrow_and_update();
        if cmd.quit {
            info!("vision host requested shutdown");
            break;
        }
        driver.apply(&cmd);
        if let StepOutcome::Stepped(position) = driver.step_if_due().await {
            debug!(position, "stepped");
            // the next pulse window may already be open
            continue;
        }
        // idle until the pulse window, a fresh command, or an interrupt
        tokio::select! {
            _ = rx.changed() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received");
                break;
            }
            _ = sleep(driver.step_interval()) => {}
        }
    }
    poller.abort();
    shutdown(driver).await;
}

/// Poll the vision host forever, publishing each successful command.
/// Errors are logged and leave the previous command in place; the task
/// winds down once a quit command went out or the reader is gone.
async fn poll_loop(
    client: CommandClient,
    tx: watch::Sender<MotorCommand>,
    poll_interval: Duration,
) {
    loop {
        match client.poll().await {
            Ok(cmd) => {
                let quit = cmd.quit;
                tx.send_replace(cmd);
                if quit {
                    break;
                }
            }
            Err(e) => warn!(error = %e, "poll failed, keeping previous motor state"),
        }
        if tx.is_closed() {
            break;
        }
        sleep(poll_interval).await;
    }
}

/// Recalibrate to center, then release the hardware outputs. Release
/// happens on every path, even when recalibration stops short.
pub async fn shutdown<O: MotorOutputs>(driver: &mut StepperDriver<O>) {
    let target = driver.position().center();
    let steps = recalibrate(driver).await;
    if driver.position().current() != target {
        error!(
            position = driver.position().current(),
            target, steps, "recalibration stopped short"
        );
    }
    driver.release();
    info!("outputs released");
}
