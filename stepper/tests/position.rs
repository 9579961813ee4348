use protocol::Direction;
use stepper::PositionTracker;

#[test]
fn range_derives_from_travel_and_divisor() {
    // 126 degrees of travel at 1/4 stepping: 126 / (1.8 / 4) = 280.
    let tracker = PositionTracker::new(126.0, 4);
    assert_eq!(tracker.max(), 280);
    assert_eq!(tracker.min(), 0);
    assert_eq!(tracker.center(), 140);
    assert_eq!(tracker.current(), 140);
}

#[test]
fn ccw_increments_cw_decrements() {
    let mut tracker = PositionTracker::from_steps(10);
    assert_eq!(tracker.advance(Direction::Ccw).unwrap(), 6);
    assert_eq!(tracker.advance(Direction::Cw).unwrap(), 5);
    assert_eq!(tracker.advance(Direction::None).unwrap(), 5);
}

#[test]
fn blocked_at_either_bound_leaves_position_unchanged() {
    let mut tracker = PositionTracker::from_steps(3);
    // walk down to the lower limit
    tracker.advance(Direction::Cw).unwrap();
    assert_eq!(tracker.current(), 0);
    assert!(!tracker.allows(Direction::Cw));
    let hit = tracker.advance(Direction::Cw).unwrap_err();
    assert_eq!(hit.position, 0);
    assert_eq!(tracker.current(), 0);

    // and up to the upper limit
    for _ in 0..3 {
        tracker.advance(Direction::Ccw).unwrap();
    }
    assert_eq!(tracker.current(), 3);
    assert!(!tracker.allows(Direction::Ccw));
    assert!(tracker.advance(Direction::Ccw).is_err());
    assert_eq!(tracker.current(), 3);
}

#[test]
fn never_leaves_bounds_under_arbitrary_sequences() {
    let mut tracker = PositionTracker::from_steps(4);
    let pattern = [
        Direction::Cw,
        Direction::Cw,
        Direction::Cw,
        Direction::Ccw,
        Direction::Cw,
        Direction::Ccw,
        Direction::Ccw,
        Direction::Ccw,
        Direction::Ccw,
        Direction::Ccw,
    ];
    for _ in 0..20 {
        for dir in pattern {
            let _ = tracker.advance(dir);
            assert!(tracker.current() >= tracker.min());
            assert!(tracker.current() <= tracker.max());
        }
    }
}

#[test]
fn distance_to_center_is_signed() {
    let mut tracker = PositionTracker::from_steps(10);
    assert_eq!(tracker.distance_to_center(), 0);
    tracker.advance(Direction::Cw).unwrap();
    tracker.advance(Direction::Cw).unwrap();
    assert_eq!(tracker.distance_to_center(), 2);
    for _ in 0..5 {
        tracker.advance(Direction::Ccw).unwrap();
    }
    assert_eq!(tracker.distance_to_center(), -3);
}
