use crate::components::AircraftState;
use crate::config::{ClearanceConfig, PhysicsConfig};
use crate::utils::{heading_error, wrap_angle};

/// Converts decoded target values into target updates with dead-band
/// gating.
///
/// A commanded value within the per-axis dead-band of the currently stored
/// target is treated as a free correction: the target is left untouched and
/// no instruction is counted. A change beyond the dead-band replaces the
/// target with the bounds-clamped commanded value and costs exactly one
/// instruction for that axis.
#[derive(Debug, Clone)]
pub struct ClearanceInterface {
    config: ClearanceConfig,
    min_altitude_ft: f64,
    max_altitude_ft: f64,
}

impl ClearanceInterface {
    pub fn new(config: ClearanceConfig, physics: &PhysicsConfig) -> Self {
        Self {
            config,
            min_altitude_ft: physics.min_altitude_ft,
            max_altitude_ft: physics.max_altitude_ft,
        }
    }

    /// Apply a clearance to one aircraft. Returns the number of
    /// instructions issued, in `[0, 3]`.
    pub fn set_targets(
        &self,
        aircraft: &mut AircraftState,
        new_heading_rad: f64,
        new_speed_kts: f64,
        new_altitude_ft: f64,
        now_s: f64,
    ) -> u32 {
        let mut issued = 0;

        if new_heading_rad.is_finite() {
            let delta = heading_error(new_heading_rad, aircraft.target_heading_rad);
            if delta.abs() > self.config.heading_dead_band_rad {
                aircraft.target_heading_rad = wrap_angle(new_heading_rad);
                issued += 1;
            }
        }

        if new_speed_kts.is_finite() {
            let clamped = new_speed_kts.clamp(aircraft.min_speed_kts, aircraft.max_speed_kts);
            if (clamped - aircraft.target_speed_kts).abs() > self.config.speed_dead_band_kts {
                aircraft.target_speed_kts = clamped;
                issued += 1;
            }
        }

        if new_altitude_ft.is_finite() {
            let clamped = new_altitude_ft.clamp(self.min_altitude_ft, self.max_altitude_ft);
            if (clamped - aircraft.target_altitude_ft).abs() > self.config.altitude_dead_band_ft {
                aircraft.target_altitude_ft = clamped;
                issued += 1;
            }
        }

        if issued > 0 {
            aircraft.last_clearance_s = now_s;
        }
        issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::FlightRules;
    use crate::utils::deg_to_rad;
    use glam::DVec2;

    fn interface() -> ClearanceInterface {
        ClearanceInterface::new(ClearanceConfig::default(), &PhysicsConfig::default())
    }

    fn arrival() -> AircraftState {
        AircraftState::new(
            1,
            DVec2::new(10.0, 0.0),
            DVec2::ZERO,
            0.0,
            180.0,
            5000.0,
            120.0,
            250.0,
            deg_to_rad(3.0),
            FlightRules::Ifr,
        )
    }

    #[test]
    fn small_corrections_are_free() {
        let clearance = interface();
        let mut ac = arrival();

        let issued = clearance.set_targets(
            &mut ac,
            deg_to_rad(0.5), // below 1 deg dead-band
            182.0,           // below 5 kt dead-band
            5100.0,          // below 200 ft dead-band
            10.0,
        );

        assert_eq!(issued, 0);
        assert_eq!(ac.target_heading_rad, 0.0);
        assert_eq!(ac.target_speed_kts, 180.0);
        assert_eq!(ac.target_altitude_ft, 5000.0);
        assert_eq!(ac.last_clearance_s, 0.0);
    }

    #[test]
    fn meaningful_changes_cost_one_each() {
        let clearance = interface();
        let mut ac = arrival();

        let issued = clearance.set_targets(&mut ac, deg_to_rad(30.0), 160.0, 3000.0, 25.0);

        assert_eq!(issued, 3);
        assert_eq!(ac.target_heading_rad, deg_to_rad(30.0));
        assert_eq!(ac.target_speed_kts, 160.0);
        assert_eq!(ac.target_altitude_ft, 3000.0);
        assert_eq!(ac.last_clearance_s, 25.0);
    }

    #[test]
    fn single_axis_counts_one() {
        let clearance = interface();
        let mut ac = arrival();

        let issued = clearance.set_targets(&mut ac, 0.0, 180.0, 2000.0, 5.0);

        assert_eq!(issued, 1);
        assert_eq!(ac.target_altitude_ft, 2000.0);
    }

    #[test]
    fn targets_are_clamped_to_bounds() {
        let clearance = interface();
        let mut ac = arrival();

        clearance.set_targets(&mut ac, 0.0, 400.0, 50000.0, 5.0);

        assert_eq!(ac.target_speed_kts, 250.0);
        assert_eq!(ac.target_altitude_ft, 15000.0);
    }

    #[test]
    fn heading_delta_wraps_across_north() {
        let clearance = interface();
        let mut ac = arrival();
        ac.target_heading_rad = deg_to_rad(179.5);

        // 179.5 -> -179.5 is only 1 degree around the circle
        let issued = clearance.set_targets(&mut ac, deg_to_rad(-179.5), 180.0, 5000.0, 5.0);
        assert_eq!(issued, 0);
    }

    #[test]
    fn non_finite_axis_is_ignored() {
        let clearance = interface();
        let mut ac = arrival();

        let issued = clearance.set_targets(&mut ac, f64::NAN, f64::INFINITY, 3000.0, 5.0);

        assert_eq!(issued, 1);
        assert_eq!(ac.target_heading_rad, 0.0);
        assert_eq!(ac.target_speed_kts, 180.0);
        assert_eq!(ac.target_altitude_ft, 3000.0);
    }
}
