use protocol::{Direction, MotorCommand};
use tokio::time::sleep;
use tracing::info;

use crate::driver::{StepOutcome, StepperDriver};
use crate::outputs::MotorOutputs;

/// Drive the motor back to the center position before shutdown.
///
/// Bypasses the command channel and reuses the driver's pulse
/// primitive, so the single-writer rule on the position tracker holds.
/// Takes exactly `|current - center|` steps and returns how many were
/// emitted. Callers must still call [`StepperDriver::release`] on every
/// exit path afterwards.
pub async fn recalibrate<O: MotorOutputs>(driver: &mut StepperDriver<O>) -> u64 {
    let distance = driver.position().distance_to_center();
    if distance == 0 {
        info!("already centered");
        return 0;
    }
    let direction = if distance > 0 {
        Direction::Ccw
    } else {
        Direction::Cw
    };
    driver.apply(&MotorCommand {
        direction,
        motor_on: true,
        quit: false,
    });

    let steps = distance.unsigned_abs();
    let mut taken = 0u64;
    while taken < steps {
        match driver.step_if_due().await {
            StepOutcome::Stepped(_) => taken += 1,
            StepOutcome::Waiting => sleep(driver.step_interval() / 4).await,
            StepOutcome::Blocked | StepOutcome::Disabled => break,
        }
    }
    info!(
        steps = taken,
        position = driver.position().current(),
        "recalibrated toward center"
    );
    taken
}
