use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::utils::wrap_angle;

/// Flight rules an aircraft operates under. Landing criteria and reward
/// shaping are more permissive for VFR traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightRules {
    Vfr,
    Ifr,
}

/// Per-aircraft kinematic and control record.
///
/// Positions are in nautical miles (x east, y north), heading in radians
/// with 0 pointing along +x, speed in knots, altitude in feet and vertical
/// speed in feet per minute. The record is exclusively owned by the session
/// holding it and is only mutated inside a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftState {
    pub id: u32,
    pub position_nm: DVec2,
    pub heading_rad: f64,
    pub speed_kts: f64,
    pub altitude_ft: f64,
    pub vert_speed_fpm: f64,
    pub turn_rate_rad_s: f64,

    pub target_heading_rad: f64,
    pub target_speed_kts: f64,
    pub target_altitude_ft: f64,

    pub min_speed_kts: f64,
    pub max_speed_kts: f64,
    pub max_turn_rate_rad_s: f64,
    pub flight_rules: FlightRules,

    pub landed: bool,
    /// Simulated time of the last clearance that changed a target.
    pub last_clearance_s: f64,
    /// Distance to destination at the end of the previous tick, used for
    /// the progress reward term.
    pub prev_distance_nm: f64,
}

impl AircraftState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        position_nm: DVec2,
        destination_nm: DVec2,
        heading_rad: f64,
        speed_kts: f64,
        altitude_ft: f64,
        min_speed_kts: f64,
        max_speed_kts: f64,
        max_turn_rate_rad_s: f64,
        flight_rules: FlightRules,
    ) -> Self {
        let heading = wrap_angle(heading_rad);
        Self {
            id,
            position_nm,
            heading_rad: heading,
            speed_kts: speed_kts.clamp(min_speed_kts, max_speed_kts),
            altitude_ft,
            vert_speed_fpm: 0.0,
            turn_rate_rad_s: 0.0,
            target_heading_rad: heading,
            target_speed_kts: speed_kts.clamp(min_speed_kts, max_speed_kts),
            target_altitude_ft: altitude_ft,
            min_speed_kts,
            max_speed_kts,
            max_turn_rate_rad_s,
            flight_rules,
            landed: false,
            last_clearance_s: 0.0,
            prev_distance_nm: position_nm.distance(destination_nm),
        }
    }

    /// Horizontal distance to a point, in nautical miles.
    #[inline]
    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position_nm.distance(point)
    }
}
