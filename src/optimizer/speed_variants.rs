//! Per-champion speed re-tunings tried by the search.

use serde::Serialize;

/// Shift gear speed by `speed_delta` and wear `speed_sets` speed sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeedVariant {
    pub speed_delta: i32,
    pub speed_sets: u32,
}

/// Deltas fanning out from zero: 0, -1, 1, -2, 2, ...
///
/// Step `i` flips direction and moves `i` further, so `max_delta_step = 20`
/// yields 21 deltas ending at 10.
pub fn speed_deltas(max_delta_step: u32) -> Vec<i32> {
    let mut deltas = Vec::with_capacity(max_delta_step as usize + 1);
    let mut flip = -1i32;
    let mut delta = 0i32;
    for step in 0..=max_delta_step {
        flip = -flip;
        delta += flip * step as i32;
        deltas.push(delta);
    }
    deltas
}

/// Every delta paired with every speed-set count, deltas outermost.
pub fn speed_variants(max_delta_step: u32, max_speed_sets: u32) -> Vec<SpeedVariant> {
    speed_deltas(max_delta_step)
        .into_iter()
        .flat_map(|speed_delta| {
            (0..=max_speed_sets).map(move |speed_sets| SpeedVariant {
                speed_delta,
                speed_sets,
            })
        })
        .collect()
}
