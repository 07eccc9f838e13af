use crate::components::{Airport, AircraftState, FlightRules};
use crate::config::{LandingConfig, LandingCriteria};

/// One-shot landing transition.
///
/// An aircraft lands on the first tick where it is inside the landing
/// radius, low, slow, not sinking hard and wings level; the transition is
/// irreversible and the state is frozen from then on. VFR traffic is
/// evaluated against the looser criteria set.
#[derive(Debug, Clone)]
pub struct LandingDetector {
    config: LandingConfig,
}

impl LandingDetector {
    pub fn new(config: LandingConfig) -> Self {
        Self { config }
    }

    pub fn criteria_for(&self, rules: FlightRules) -> &LandingCriteria {
        match rules {
            FlightRules::Ifr => &self.config.ifr,
            FlightRules::Vfr => &self.config.vfr,
        }
    }

    /// Evaluate one aircraft against its criteria without mutating it.
    pub fn meets_criteria(&self, aircraft: &AircraftState, airport: &Airport) -> bool {
        let criteria = self.criteria_for(aircraft.flight_rules);
        let distance = aircraft.distance_to(airport.position_nm);
        let height = aircraft.altitude_ft - airport.altitude_ft;

        distance <= criteria.radius_nm
            && height <= criteria.max_altitude_ft
            && aircraft.vert_speed_fpm.abs() <= criteria.max_vert_speed_fpm
            && aircraft.turn_rate_rad_s.abs() <= criteria.max_turn_rate_rad_s
            && aircraft.speed_kts <= criteria.max_speed_kts
    }

    /// Transition to landed if the criteria hold. Returns true exactly once
    /// per aircraft.
    pub fn check(&self, aircraft: &mut AircraftState, airport: &Airport) -> bool {
        if aircraft.landed {
            return false;
        }
        if !self.meets_criteria(aircraft, airport) {
            return false;
        }

        aircraft.landed = true;
        aircraft.turn_rate_rad_s = 0.0;
        aircraft.vert_speed_fpm = 0.0;
        tracing::info!(id = aircraft.id, "aircraft landed");
        true
    }
}
