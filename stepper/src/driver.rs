use std::time::{Duration, Instant};

use protocol::{Direction, MotorCommand};
use tracing::{debug, warn};

use crate::microstep::MicrostepMode;
use crate::outputs::{Level, Line, MotorOutputs};
use crate::position::PositionTracker;

/// Width of the step pulse's high phase. Independent of the step
/// interval and short enough never to eat the next pulse window.
pub const PULSE_WIDTH: Duration = Duration::from_millis(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Motor de-energized, nothing commanded.
    Idle,
    /// Enabled with a direction set, awaiting the pulse window.
    Armed,
    /// Inside the minimum pulse width.
    Pulsing,
    /// Boundary guard refused the commanded direction; outputs
    /// de-asserted until a command with a legal direction arrives.
    Blocked,
}

/// Result of one pass through the pulse window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A pulse was emitted; carries the new position.
    Stepped(i64),
    /// Armed, but the step interval has not elapsed yet.
    Waiting,
    /// The boundary guard refused the commanded direction.
    Blocked,
    /// Not armed; nothing to do.
    Disabled,
}

/// Pulse-emission state machine driving one stepper axis.
///
/// Owns the [`PositionTracker`] and all pulse timing state; nothing
/// else writes either. Generic over [`MotorOutputs`] so tests run
/// against a recording fake.
pub struct StepperDriver<O: MotorOutputs> {
    outputs: O,
    position: PositionTracker,
    mode: MicrostepMode,
    pending_mode: Option<MicrostepMode>,
    seconds_per_rev: f64,
    step_interval: Duration,
    last_step: Option<Instant>,
    direction: Direction,
    state: DriverState,
}

impl<O: MotorOutputs> StepperDriver<O> {
    /// Set up the driver: mode-select lines written, motor disabled,
    /// step interval derived from the rotation speed and the mode.
    pub fn new(
        mut outputs: O,
        position: PositionTracker,
        mode: MicrostepMode,
        seconds_per_rev: f64,
    ) -> Self {
        let levels = mode.select_levels();
        outputs.set(Line::M0, levels[0]);
        outputs.set(Line::M1, levels[1]);
        outputs.set(Line::M2, levels[2]);
        outputs.set(Line::Enable, Level::High);
        outputs.set(Line::Step, Level::Low);
        Self {
            outputs,
            position,
            mode,
            pending_mode: None,
            seconds_per_rev,
            step_interval: interval(seconds_per_rev, mode),
            last_step: None,
            direction: Direction::None,
            state: DriverState::Idle,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn mode(&self) -> MicrostepMode {
        self.mode
    }

    pub fn position(&self) -> &PositionTracker {
        &self.position
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    /// Apply the latest command.
    ///
    /// Disabling returns the driver to `Idle` (where a deferred mode
    /// change takes effect). Enabling arms the driver if the boundary
    /// guard allows the commanded direction, otherwise blocks with the
    /// outputs de-asserted. A blocked driver re-arms only through a
    /// command whose direction is legal again.
    pub fn apply(&mut self, cmd: &MotorCommand) {
        if !cmd.motor_on || cmd.direction == Direction::None {
            self.disable();
            return;
        }
        self.set_direction(cmd.direction);
        if self.position.allows(cmd.direction) {
            self.outputs.set(Line::Enable, Level::Low);
            self.state = DriverState::Armed;
        } else {
            self.block();
        }
    }

    /// Select a microstep mode. Honored immediately only at `Idle`;
    /// otherwise stored and applied when the driver next idles, so an
    /// in-flight pulse keeps its timing assumptions.
    pub fn set_mode(&mut self, mode: MicrostepMode) {
        if self.state == DriverState::Idle {
            self.apply_mode(mode);
        } else {
            debug!(?mode, "mode change deferred until idle");
            self.pending_mode = Some(mode);
        }
    }

    /// Emit one pulse if armed and the step interval has elapsed.
    ///
    /// The boundary guard is re-evaluated before every pulse. The
    /// position advances and `last_step` updates only on an actual
    /// emission, never on a rejected attempt.
    pub async fn step_if_due(&mut self) -> StepOutcome {
        match self.state {
            DriverState::Armed => {}
            DriverState::Blocked => return StepOutcome::Blocked,
            DriverState::Idle | DriverState::Pulsing => return StepOutcome::Disabled,
        }
        if !self.position.allows(self.direction) {
            self.block();
            return StepOutcome::Blocked;
        }
        let now = Instant::now();
        if let Some(last) = self.last_step {
            if now.duration_since(last) < self.step_interval {
                return StepOutcome::Waiting;
            }
        }
        self.state = DriverState::Pulsing;
        self.outputs.set(Line::Step, Level::High);
        tokio::time::sleep(PULSE_WIDTH).await;
        self.outputs.set(Line::Step, Level::Low);
        let position = match self.position.advance(self.direction) {
            Ok(p) => p,
            // guard passed above; unreachable in practice
            Err(_) => {
                self.block();
                return StepOutcome::Blocked;
            }
        };
        self.last_step = Some(now);
        self.state = DriverState::Armed;
        debug!(position, "step");
        StepOutcome::Stepped(position)
    }

    /// De-assert every output and return to `Idle`. Final hardware
    /// release on shutdown; a mode queued while armed is dropped here,
    /// not applied.
    pub fn release(&mut self) {
        self.outputs.set(Line::Enable, Level::High);
        self.outputs.set(Line::Step, Level::Low);
        self.outputs.set(Line::Dir, Level::Low);
        self.direction = Direction::None;
        self.state = DriverState::Idle;
        self.pending_mode = None;
    }

    fn disable(&mut self) {
        self.outputs.set(Line::Enable, Level::High);
        self.direction = Direction::None;
        self.state = DriverState::Idle;
        if let Some(mode) = self.pending_mode.take() {
            self.apply_mode(mode);
        }
    }

    fn block(&mut self) {
        self.outputs.set(Line::Enable, Level::High);
        if self.state != DriverState::Blocked {
            warn!(
                direction = ?self.direction,
                position = self.position.current(),
                "boundary hit, motor disabled"
            );
        }
        self.state = DriverState::Blocked;
    }

    fn set_direction(&mut self, direction: Direction) {
        match direction {
            Direction::Ccw => self.outputs.set(Line::Dir, Level::High),
            Direction::Cw => self.outputs.set(Line::Dir, Level::Low),
            Direction::None => {}
        }
        self.direction = direction;
    }

    fn apply_mode(&mut self, mode: MicrostepMode) {
        let levels = mode.select_levels();
        self.outputs.set(Line::M0, levels[0]);
        self.outputs.set(Line::M1, levels[1]);
        self.outputs.set(Line::M2, levels[2]);
        self.mode = mode;
        self.step_interval = interval(self.seconds_per_rev, mode);
        debug!(
            ?mode,
            interval_us = self.step_interval.as_micros() as u64,
            "microstep mode set"
        );
    }
}

fn interval(seconds_per_rev: f64, mode: MicrostepMode) -> Duration {
    Duration::from_secs_f64(seconds_per_rev / mode.steps_per_rev() as f64)
}
