use serde::{Deserialize, Serialize};

use crate::components::AircraftState;
use crate::config::PhysicsConfig;
use crate::utils::wrap_angle;

/// One clearance for one aircraft: three bounded normalized fields, each
/// in `[-1, 1]`.
///
/// - `heading` maps linearly onto `[-pi, pi]` as an absolute course.
/// - `speed` maps onto the aircraft's own `[min_speed, max_speed]`.
/// - `altitude` maps onto the session's `[min_altitude, max_altitude]`.
///
/// Re-sending the value an aircraft is already cleared for is a no-op at
/// the clearance interface, so "maintain" costs nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AircraftCommand {
    pub heading: f64,
    pub speed: f64,
    pub altitude: f64,
}

/// Absolute target values decoded from one command.
#[derive(Debug, Clone, Copy)]
pub struct DecodedTargets {
    pub heading_rad: f64,
    pub speed_kts: f64,
    pub altitude_ft: f64,
}

impl AircraftCommand {
    /// Decode into absolute targets for a specific aircraft. A non-finite
    /// field decodes to the aircraft's current target, making that axis a
    /// no-op rather than poisoning the tick.
    pub fn decode(&self, aircraft: &AircraftState, physics: &PhysicsConfig) -> DecodedTargets {
        let heading_rad = if self.heading.is_finite() {
            wrap_angle(self.heading.clamp(-1.0, 1.0) * std::f64::consts::PI)
        } else {
            tracing::warn!(id = aircraft.id, "non-finite heading command ignored");
            aircraft.target_heading_rad
        };

        let speed_kts = if self.speed.is_finite() {
            let fraction = (self.speed.clamp(-1.0, 1.0) + 1.0) / 2.0;
            aircraft.min_speed_kts + fraction * (aircraft.max_speed_kts - aircraft.min_speed_kts)
        } else {
            tracing::warn!(id = aircraft.id, "non-finite speed command ignored");
            aircraft.target_speed_kts
        };

        let altitude_ft = if self.altitude.is_finite() {
            let fraction = (self.altitude.clamp(-1.0, 1.0) + 1.0) / 2.0;
            physics.min_altitude_ft + fraction * (physics.max_altitude_ft - physics.min_altitude_ft)
        } else {
            tracing::warn!(id = aircraft.id, "non-finite altitude command ignored");
            aircraft.target_altitude_ft
        };

        DecodedTargets {
            heading_rad,
            speed_kts,
            altitude_ft,
        }
    }

    /// The command that re-states an aircraft's current targets. Decodes
    /// to the stored targets exactly, so it never counts as an
    /// instruction.
    pub fn maintain(aircraft: &AircraftState, physics: &PhysicsConfig) -> Self {
        let speed_span = aircraft.max_speed_kts - aircraft.min_speed_kts;
        let altitude_span = physics.max_altitude_ft - physics.min_altitude_ft;
        Self {
            heading: aircraft.target_heading_rad / std::f64::consts::PI,
            speed: (aircraft.target_speed_kts - aircraft.min_speed_kts) / speed_span * 2.0 - 1.0,
            altitude: (aircraft.target_altitude_ft - physics.min_altitude_ft) / altitude_span * 2.0
                - 1.0,
        }
    }
}
