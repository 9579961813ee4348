use crate::outputs::Level;
use crate::StepperError;

/// Full steps per revolution of the motor itself.
pub const BASE_STEPS_PER_REV: u32 = 200;

/// Microstep resolution, selected on the driver chip via three
/// mode-select lines. Fixed table; higher divisors trade step rate for
/// resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MicrostepMode {
    Full,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
}

impl MicrostepMode {
    pub const ALL: [MicrostepMode; 6] = [
        MicrostepMode::Full,
        MicrostepMode::Half,
        MicrostepMode::Quarter,
        MicrostepMode::Eighth,
        MicrostepMode::Sixteenth,
        MicrostepMode::ThirtySecond,
    ];

    /// How many microsteps subdivide one full step.
    pub fn divisor(self) -> u32 {
        match self {
            MicrostepMode::Full => 1,
            MicrostepMode::Half => 2,
            MicrostepMode::Quarter => 4,
            MicrostepMode::Eighth => 8,
            MicrostepMode::Sixteenth => 16,
            MicrostepMode::ThirtySecond => 32,
        }
    }

    pub fn steps_per_rev(self) -> u32 {
        BASE_STEPS_PER_REV * self.divisor()
    }

    /// Mode-select line levels `[M0, M1, M2]` per the driver datasheet.
    pub fn select_levels(self) -> [Level; 3] {
        use Level::{High, Low};
        match self {
            MicrostepMode::Full => [Low, Low, Low],
            MicrostepMode::Half => [High, Low, Low],
            MicrostepMode::Quarter => [Low, High, Low],
            MicrostepMode::Eighth => [High, High, Low],
            MicrostepMode::Sixteenth => [Low, Low, High],
            MicrostepMode::ThirtySecond => [High, Low, High],
        }
    }

    /// Look up a mode by divisor. Values outside the table are rejected
    /// so an invalid selection leaves the current mode unchanged.
    pub fn from_divisor(divisor: u32) -> Result<Self, StepperError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.divisor() == divisor)
            .ok_or(StepperError::InvalidMicrostep(divisor))
    }

    /// Next mode in the table, wrapping at the end.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous mode in the table, wrapping at the start.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
