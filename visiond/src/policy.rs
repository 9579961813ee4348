use protocol::{Direction, MotorCommand};

/// Angles within this band of center produce no correction, preventing
/// oscillation around the target.
pub const DEAD_BAND_DEG: f64 = 2.0;

/// Map the latest angle estimate to a motor command.
///
/// Pure and deterministic; callers re-evaluate it on every poll rather
/// than caching the result. A positive angle past the dead-band pans
/// clockwise, a negative one counter-clockwise; no target or an angle
/// inside the band leaves the motor off.
pub fn decide(angle: Option<f64>, motor_enabled: bool, shutdown: bool) -> MotorCommand {
    if shutdown {
        return MotorCommand::shutdown();
    }
    if !motor_enabled {
        return MotorCommand::off();
    }
    match angle {
        Some(a) if a > DEAD_BAND_DEG => MotorCommand {
            direction: Direction::Cw,
            motor_on: true,
            quit: false,
        },
        Some(a) if a < -DEAD_BAND_DEG => MotorCommand {
            direction: Direction::Ccw,
            motor_on: true,
            quit: false,
        },
        _ => MotorCommand::off(),
    }
}
