//! Turn-meter and speed constants shared by the data model and the engine.

/// A participant is granted a turn once its meter exceeds this value.
pub const TURN_METER_FULL: f64 = 100.0;

/// Fraction of speed added to the turn meter on every clock tick.
pub const TURN_METER_RATE: f64 = 0.07;

/// Speed bonus per equipped speed set, as a fraction of base speed.
pub const SPEED_SET_BONUS: f64 = 0.12;

/// Speed bonus per equipped perception set, as a fraction of base speed.
pub const PERCEPTION_SET_BONUS: f64 = 0.05;

/// Speed multiplier change while Increase Speed / Decrease Speed is active.
pub const SPEED_BUFF_FACTOR: f64 = 0.3;

pub const BOSS_NAME: &str = "Clan Boss";

/// Turn meter gained per clock tick at the given speed.
pub fn turn_meter_per_tick(speed: f64) -> f64 {
    speed * TURN_METER_RATE
}
