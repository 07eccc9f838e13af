use crate::components::{Airport, AircraftState};
use crate::config::ObservationConfig;

/// Number of values one aircraft slot occupies.
pub fn slot_width(config: &ObservationConfig) -> usize {
    if config.include_altitude {
        6
    } else {
        5
    }
}

/// Fixed-length observation vector.
///
/// One slot per aircraft: `[dx, dy, speed, heading, landed]`, extended
/// with altitude when configured. `dx`/`dy` are relative to the field in
/// NM. Slots beyond the live aircraft count are zero-padded so the vector
/// shape never changes within a session.
pub fn build_observation(
    aircraft: &[AircraftState],
    airport: &Airport,
    config: &ObservationConfig,
) -> Vec<f64> {
    let width = slot_width(config);
    let mut obs = vec![0.0; config.max_slots * width];

    for (slot, ac) in aircraft.iter().take(config.max_slots).enumerate() {
        let base = slot * width;
        let relative = ac.position_nm - airport.position_nm;
        obs[base] = relative.x;
        obs[base + 1] = relative.y;
        obs[base + 2] = ac.speed_kts;
        obs[base + 3] = ac.heading_rad;
        obs[base + 4] = if ac.landed { 1.0 } else { 0.0 };
        if config.include_altitude {
            obs[base + 5] = ac.altitude_ft;
        }
    }

    obs
}
