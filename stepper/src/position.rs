use protocol::Direction;

/// Angle of one full motor step, in degrees.
pub const BASE_STEP_ANGLE_DEG: f64 = 1.8;

/// Bounded integer step position of the pan axis.
///
/// Sign convention: CCW increments, CW decrements, matching the mount
/// orientation of the physical platform. `Direction::None` never moves.
/// `advance` is the only mutator; a refused advance leaves the position
/// untouched.
#[derive(Clone, Debug)]
pub struct PositionTracker {
    current: i64,
    min: i64,
    max: i64,
}

/// A refused attempt to advance past a travel limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryHit {
    pub direction: Direction,
    pub position: i64,
}

impl PositionTracker {
    /// Tracker spanning `travel_degrees` of pan travel at the given
    /// microstep divisor, starting at center.
    pub fn new(travel_degrees: f64, divisor: u32) -> Self {
        let max = (travel_degrees / (BASE_STEP_ANGLE_DEG / divisor as f64)) as i64;
        Self::from_steps(max)
    }

    /// Tracker over `[0, max]` steps, starting at center.
    pub fn from_steps(max: i64) -> Self {
        Self {
            current: max / 2,
            min: 0,
            max,
        }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Recalibration target; integer division rounds down.
    pub fn center(&self) -> i64 {
        self.max / 2
    }

    /// Signed steps from here to center, positive meaning CCW travel.
    pub fn distance_to_center(&self) -> i64 {
        self.center() - self.current
    }

    /// Boundary guard: may the motor take one step in `direction`?
    pub fn allows(&self, direction: Direction) -> bool {
        match direction {
            Direction::Ccw => self.current < self.max,
            Direction::Cw => self.current > self.min,
            Direction::None => true,
        }
    }

    /// Move one step. The only mutator of the position.
    pub fn advance(&mut self, direction: Direction) -> Result<i64, BoundaryHit> {
        if !self.allows(direction) {
            return Err(BoundaryHit {
                direction,
                position: self.current,
            });
        }
        match direction {
            Direction::Ccw => self.current += 1,
            Direction::Cw => self.current -= 1,
            Direction::None => {}
        }
        Ok(self.current)
    }
}
