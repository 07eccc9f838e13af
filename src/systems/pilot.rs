use crate::components::AircraftState;
use crate::config::PhysicsConfig;
use crate::utils::{heading_error, sanitize_delta};

/// Three bounded single-axis controllers tracking the cleared targets.
///
/// Each axis is a proportional loop with an explicit rate limit: heading
/// commands a turn rate, speed commands an acceleration, altitude commands
/// a vertical speed that itself slews at a bounded vertical acceleration.
/// All three only touch the aircraft's own fields.
#[derive(Debug, Clone)]
pub struct PilotController {
    config: PhysicsConfig,
}

impl PilotController {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Run all three axes for one tick.
    pub fn update(&self, aircraft: &mut AircraftState, dt: f64) {
        self.heading_control(aircraft);
        self.speed_control(aircraft, dt);
        self.altitude_control(aircraft, dt);
    }

    /// Commanded turn rate is proportional to the wrapped heading error,
    /// clamped to the airframe's turn-rate limit.
    pub fn heading_control(&self, aircraft: &mut AircraftState) {
        let error = heading_error(aircraft.target_heading_rad, aircraft.heading_rad);
        let limit = aircraft
            .max_turn_rate_rad_s
            .min(self.config.max_turn_rate_rad_s);
        aircraft.turn_rate_rad_s =
            sanitize_delta(self.config.kp_heading * error).clamp(-limit, limit);
    }

    pub fn speed_control(&self, aircraft: &mut AircraftState, dt: f64) {
        let error = aircraft.target_speed_kts - aircraft.speed_kts;
        let accel = sanitize_delta(self.config.kp_speed * error)
            .clamp(-self.config.max_accel_kts_s, self.config.max_accel_kts_s);
        aircraft.speed_kts = (aircraft.speed_kts + accel * dt)
            .clamp(aircraft.min_speed_kts, aircraft.max_speed_kts);
    }

    /// Within the dead-band the pilot levels off; outside it the desired
    /// vertical speed is proportional to the altitude error and the actual
    /// vertical speed slews toward it at the vertical-acceleration limit.
    pub fn altitude_control(&self, aircraft: &mut AircraftState, dt: f64) {
        let error = aircraft.target_altitude_ft - aircraft.altitude_ft;
        let desired_vs = if error.abs() < self.config.altitude_dead_band_ft {
            0.0
        } else {
            sanitize_delta(self.config.kp_altitude * error).clamp(
                -self.config.max_vert_speed_fpm,
                self.config.max_vert_speed_fpm,
            )
        };

        let max_delta = self.config.max_vert_accel_fpm_s * dt;
        let delta = (desired_vs - aircraft.vert_speed_fpm).clamp(-max_delta, max_delta);
        aircraft.vert_speed_fpm += delta;
    }
}
