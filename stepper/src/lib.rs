//! Stepper motor core for the pan platform.
//!
//! Owns the microstep table, the bounded position tracker, the
//! pulse-timed driver state machine and the recenter-on-shutdown
//! routine. Hardware is reached only through [`MotorOutputs`], so the
//! whole crate runs against a recording fake in tests.

pub mod driver;
pub mod microstep;
pub mod outputs;
pub mod position;
pub mod recal;

pub use driver::{DriverState, StepOutcome, StepperDriver, PULSE_WIDTH};
pub use microstep::MicrostepMode;
pub use outputs::{Level, Line, LoggingOutputs, MotorOutputs, RecordingOutputs};
pub use position::{BoundaryHit, PositionTracker};
pub use recal::recalibrate;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepperError {
    /// Divisor outside the fixed microstep table; the active mode is
    /// left unchanged by the caller.
    #[error("unsupported microstep divisor {0}")]
    InvalidMicrostep(u32),
}
