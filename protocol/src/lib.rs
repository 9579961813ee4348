use serde::{Deserialize, Serialize};

/// Rotation sense of the pan motor.
///
/// Serialized as `"CW"`, `"CCW"` or the empty string, matching the wire
/// format the motor host polls for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "CW")]
    Cw,
    #[serde(rename = "CCW")]
    Ccw,
    #[serde(rename = "")]
    None,
}

/// One cycle's worth of instruction for the motor host.
///
/// Recomputed by the vision host on every poll; carries no identity
/// across polls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorCommand {
    pub direction: Direction,
    pub motor_on: bool,
    pub quit: bool,
}

impl MotorCommand {
    /// Motor off, no rotation, keep running.
    pub fn off() -> Self {
        Self {
            direction: Direction::None,
            motor_on: false,
            quit: false,
        }
    }

    /// Motor off and the motor host should shut down.
    pub fn shutdown() -> Self {
        Self {
            quit: true,
            ..Self::off()
        }
    }
}
