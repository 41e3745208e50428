//! Queueing decision tests

use junction_sim::simulation::{
    must_wait, within_approach_buffer, Direction, Phase, Position, SignalController,
    APPROACH_BUFFER,
};

/// Tick until east/west turns yellow
fn east_west_yellow() -> SignalController {
    let mut controller = SignalController::new();
    while controller.phase_for(Direction::East) != Phase::Yellow {
        controller.tick();
    }
    controller
}

#[test]
fn test_buffer_measured_along_travel_axis() {
    let lane = 10.0;
    assert!(within_approach_buffer(
        Direction::North,
        &Position::new(lane, -APPROACH_BUFFER)
    ));
    assert!(!within_approach_buffer(
        Direction::North,
        &Position::new(lane, -APPROACH_BUFFER - 1.0)
    ));
    assert!(within_approach_buffer(
        Direction::West,
        &Position::new(20.0, -lane)
    ));
    assert!(!within_approach_buffer(
        Direction::West,
        &Position::new(APPROACH_BUFFER + 20.0, -lane)
    ));
}

#[test]
fn test_outside_buffer_always_proceeds() {
    let signals = SignalController::new();
    assert_eq!(signals.phase_for(Direction::North), Phase::Red);
    assert!(!must_wait(
        Direction::North,
        &Position::new(10.0, -200.0),
        &signals
    ));
}

#[test]
fn test_red_inside_buffer_waits() {
    let signals = SignalController::new();
    assert!(must_wait(
        Direction::North,
        &Position::new(10.0, -20.0),
        &signals
    ));
    assert!(must_wait(
        Direction::South,
        &Position::new(-10.0, 20.0),
        &signals
    ));
}

#[test]
fn test_green_inside_buffer_proceeds() {
    let signals = SignalController::new();
    assert!(!must_wait(
        Direction::East,
        &Position::new(-20.0, -10.0),
        &signals
    ));
}

#[test]
fn test_yellow_inside_buffer_waits() {
    let signals = east_west_yellow();
    assert!(must_wait(
        Direction::East,
        &Position::new(-20.0, -10.0),
        &signals
    ));
    assert!(must_wait(
        Direction::West,
        &Position::new(20.0, 10.0),
        &signals
    ));
}
