use std::time::{Duration, Instant};

use protocol::{Direction, MotorCommand};
use tokio::io::AsyncReadExt;
use tracing::info;

use stepper::{MotorOutputs, StepperDriver};

/// Cool-down after a recognized key so a held or repeated key does not
/// retrigger.
pub const KEY_COOLDOWN: Duration = Duration::from_millis(500);

/// What a key press asks the driver to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    PrevMode,
    NextMode,
    Direction(Direction),
    Enable(bool),
    Quit,
    Ignored,
}

/// Debounced keyboard state for the manual test mode.
///
/// Tracks the operator-selected direction and enable flag; the motor
/// itself is still driven through the shared [`StepperDriver`].
pub struct ManualState {
    direction: Direction,
    motor_on: bool,
    last_key: Option<Instant>,
}

impl Default for ManualState {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualState {
    /// Motor off, counter-clockwise preselected.
    pub fn new() -> Self {
        Self {
            direction: Direction::Ccw,
            motor_on: false,
            last_key: None,
        }
    }

    /// Interpret one key press at `now`. Recognized keys inside the
    /// cool-down window are ignored; unrecognized keys never start one.
    pub fn handle_key(&mut self, key: u8, now: Instant) -> KeyAction {
        if !matches!(key, b'a' | b'd' | b's' | b' ' | b'q') {
            return KeyAction::Ignored;
        }
        if self
            .last_key
            .is_some_and(|t| now.duration_since(t) < KEY_COOLDOWN)
        {
            return KeyAction::Ignored;
        }
        self.last_key = Some(now);
        match key {
            b'a' => KeyAction::PrevMode,
            b'd' => KeyAction::NextMode,
            b's' => {
                self.direction = match self.direction {
                    Direction::Ccw => Direction::Cw,
                    _ => Direction::Ccw,
                };
                KeyAction::Direction(self.direction)
            }
            b' ' => {
                self.motor_on = !self.motor_on;
                KeyAction::Enable(self.motor_on)
            }
            _ => KeyAction::Quit,
        }
    }

    /// The command the current toggles amount to.
    pub fn command(&self) -> MotorCommand {
        MotorCommand {
            direction: self.direction,
            motor_on: self.motor_on,
            quit: false,
        }
    }
}

/// Keyboard-driven test mode: `a`/`d` cycle the microstep mode, `s`
/// flips direction, space toggles the motor, `q` quits. Bypasses the
/// command channel entirely and drives the shared driver core.
pub async fn run<O: MotorOutputs>(driver: &mut StepperDriver<O>) -> std::io::Result<()> {
    let mut stdin = tokio::io::stdin();
    let mut buf = [0u8; 1];
    let mut keys = ManualState::new();
    info!("manual mode: [a]/[d] microstep, [s] direction, [space] motor on/off, [q] quit");
    loop {
        tokio::select! {
            read = stdin.read(&mut buf) => {
                let n = read?;
                if n == 0 {
                    break;
                }
                match keys.handle_key(buf[0], Instant::now()) {
                    KeyAction::PrevMode => {
                        driver.set_mode(driver.mode().prev());
                        info!(mode = ?driver.mode(), "microstep mode");
                    }
                    KeyAction::NextMode => {
                        driver.set_mode(driver.mode().next());
                        info!(mode = ?driver.mode(), "microstep mode");
                    }
                    KeyAction::Direction(direction) => {
                        driver.apply(&keys.command());
                        info!(?direction, "direction");
                    }
                    KeyAction::Enable(on) => {
                        driver.apply(&keys.command());
                        info!(motor_on = on, "motor");
                    }
                    KeyAction::Quit => break,
                    KeyAction::Ignored => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received");
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(1)) => {}
        }
        driver.step_if_due().await;
    }
    Ok(())
}
