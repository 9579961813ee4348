use tracing::debug;

/// Named digital output lines of the motor controller.
///
/// `Enable` is active-low: `Low` energizes the motor. `Dir` high selects
/// counter-clockwise rotation. `M0`..`M2` are the microstep mode-select
/// lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    Step,
    Dir,
    Enable,
    M0,
    M1,
    M2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// The only hardware contact point of the motor host.
pub trait MotorOutputs: Send {
    fn set(&mut self, line: Line, level: Level);
}

/// [`MotorOutputs`] implementation that logs each transition instead of
/// toggling real pins. Stands in for GPIO on a development machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingOutputs;

impl MotorOutputs for LoggingOutputs {
    fn set(&mut self, line: Line, level: Level) {
        debug!(?line, ?level, "output");
    }
}

/// Recording fake for tests: remembers every write in order.
#[derive(Debug, Default)]
pub struct RecordingOutputs {
    writes: Vec<(Line, Level)>,
}

impl RecordingOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(line, level)` write so far, oldest first.
    pub fn writes(&self) -> &[(Line, Level)] {
        &self.writes
    }

    /// Most recent level written to `line`, if any.
    pub fn last(&self, line: Line) -> Option<Level> {
        self.writes
            .iter()
            .rev()
            .find(|(l, _)| *l == line)
            .map(|(_, level)| *level)
    }

    /// How many times `line` was driven to `level`.
    pub fn count(&self, line: Line, level: Level) -> usize {
        self.writes
            .iter()
            .filter(|(l, lv)| *l == line && *lv == level)
            .count()
    }
}

impl MotorOutputs for RecordingOutputs {
    fn set(&mut self, line: Line, level: Level) {
        self.writes.push((line, level));
    }
}
