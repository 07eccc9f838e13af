use glam::DVec2;

use crate::components::AircraftState;
use crate::config::PhysicsConfig;
use crate::utils::{clamp_or, sanitize_delta, wrap_angle, KNOTS_TO_NM_PER_S};

/// Advances kinematic state by one time step.
///
/// Landed aircraft are frozen and never touched. All deltas pass through
/// `sanitize_delta`, so a degenerate intermediate value costs one tick of
/// motion on that axis instead of corrupting the state.
#[derive(Debug, Clone)]
pub struct PhysicsIntegrator {
    config: PhysicsConfig,
}

impl PhysicsIntegrator {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    pub fn advance(&self, aircraft: &mut AircraftState, dt: f64) {
        if aircraft.landed {
            return;
        }

        // Turn rate is re-clamped here so the invariant holds even if a
        // caller wrote the field directly.
        let limit = aircraft
            .max_turn_rate_rad_s
            .min(self.config.max_turn_rate_rad_s);
        aircraft.turn_rate_rad_s = sanitize_delta(aircraft.turn_rate_rad_s).clamp(-limit, limit);
        aircraft.heading_rad = wrap_angle(aircraft.heading_rad + aircraft.turn_rate_rad_s * dt);

        // Rates recover to zero, absolutes to their nearest bound.
        aircraft.vert_speed_fpm = sanitize_delta(aircraft.vert_speed_fpm);
        aircraft.speed_kts = clamp_or(
            aircraft.speed_kts,
            aircraft.min_speed_kts,
            aircraft.max_speed_kts,
            aircraft.min_speed_kts,
        );

        let climb_ft = sanitize_delta(aircraft.vert_speed_fpm / 60.0 * dt);
        let unclamped = aircraft.altitude_ft + climb_ft;
        aircraft.altitude_ft =
            unclamped.clamp(self.config.min_altitude_ft, self.config.max_altitude_ft);
        if aircraft.altitude_ft != unclamped && aircraft.altitude_ft == self.config.min_altitude_ft
        {
            // Met the ground; no residual sink rate.
            aircraft.vert_speed_fpm = 0.0;
        }

        let direction = DVec2::new(aircraft.heading_rad.cos(), aircraft.heading_rad.sin());
        let step_nm = direction * (aircraft.speed_kts * KNOTS_TO_NM_PER_S * dt);
        aircraft.position_nm += DVec2::new(sanitize_delta(step_nm.x), sanitize_delta(step_nm.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::FlightRules;
    use crate::utils::deg_to_rad;
    use approx::assert_relative_eq;

    fn arrival() -> AircraftState {
        AircraftState::new(
            1,
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            0.0,
            120.0,
            5000.0,
            80.0,
            250.0,
            deg_to_rad(3.0),
            FlightRules::Ifr,
        )
    }

    #[test]
    fn lateral_motion_matches_ground_speed() {
        let integrator = PhysicsIntegrator::new(PhysicsConfig::default());
        let mut ac = arrival();
        ac.heading_rad = 0.0;
        ac.speed_kts = 120.0;

        // 60 seconds at 120 kts covers 2 NM
        integrator.advance(&mut ac, 60.0);

        assert_relative_eq!(ac.position_nm.x, 2.0, epsilon = 0.05);
        assert_relative_eq!(ac.position_nm.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn descent_clamps_at_ground_and_zeroes_sink() {
        let integrator = PhysicsIntegrator::new(PhysicsConfig::default());
        let mut ac = arrival();
        ac.altitude_ft = 10.0;
        ac.vert_speed_fpm = -1500.0;

        integrator.advance(&mut ac, 1.0);

        assert_eq!(ac.altitude_ft, 0.0);
        assert_eq!(ac.vert_speed_fpm, 0.0);
    }

    #[test]
    fn landed_aircraft_is_frozen() {
        let integrator = PhysicsIntegrator::new(PhysicsConfig::default());
        let mut ac = arrival();
        ac.landed = true;
        let before = ac.clone();

        integrator.advance(&mut ac, 1.0);

        assert_eq!(ac.position_nm, before.position_nm);
        assert_eq!(ac.heading_rad, before.heading_rad);
        assert_eq!(ac.altitude_ft, before.altitude_ft);
    }

    #[test]
    fn turn_rate_is_reclamped_before_integration() {
        let integrator = PhysicsIntegrator::new(PhysicsConfig::default());
        let mut ac = arrival();
        ac.turn_rate_rad_s = 10.0; // far beyond the limit

        integrator.advance(&mut ac, 1.0);

        assert!(ac.turn_rate_rad_s.abs() <= deg_to_rad(3.0) + 1e-9);
        assert_relative_eq!(ac.heading_rad, deg_to_rad(3.0), epsilon = 1e-9);
    }

    #[test]
    fn nan_vertical_speed_costs_one_tick_not_the_state() {
        let integrator = PhysicsIntegrator::new(PhysicsConfig::default());
        let mut ac = arrival();
        ac.vert_speed_fpm = f64::NAN;

        integrator.advance(&mut ac, 1.0);

        assert_eq!(ac.altitude_ft, 5000.0);
        assert_eq!(ac.vert_speed_fpm, 0.0);
        assert!(ac.position_nm.x.is_finite());
    }
}
