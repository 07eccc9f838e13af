use crate::components::{Airport, AircraftState};
use crate::config::{RewardConfig, ShapingKind};
use crate::utils::{heading_error, sanitize_delta, GLIDE_SLOPE_FT_PER_NM};

/// Multi-term scalar reward.
///
/// Per-aircraft flight terms (progress, glide-path deviation, vertical
/// rate, stage-gated tracking shaping) are summed with the fleet-level
/// terms (instruction cost, silence bonus, terminal bonuses and penalties,
/// per-tick cost) by the stepper; `finalize` applies the stage scale and
/// the symmetric clip last. The output is always finite.
#[derive(Debug, Clone)]
pub struct RewardEngine {
    config: RewardConfig,
}

impl RewardEngine {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Flight terms for one non-landed aircraft. Updates the aircraft's
    /// stored previous distance as a side effect.
    pub fn flight_terms(&self, aircraft: &mut AircraftState, airport: &Airport, stage: u32) -> f64 {
        let distance = aircraft.distance_to(airport.position_nm);

        // (a) progress toward the destination since the last tick
        let progress = sanitize_delta(aircraft.prev_distance_nm - distance);
        if distance.is_finite() {
            aircraft.prev_distance_nm = distance;
        }
        let mut total = self.config.progress_weight * progress;

        // (b) penalty for sitting above the ideal descent profile
        let ideal_ft = airport.altitude_ft + distance * GLIDE_SLOPE_FT_PER_NM;
        let above_ft = sanitize_delta((aircraft.altitude_ft - ideal_ft).max(0.0));
        total -= self.config.glide_deviation_weight * above_ft;

        // (c) vertical-rate magnitude
        total -= self.config.vert_speed_weight * sanitize_delta(aircraft.vert_speed_fpm.abs());

        // (d) tracking-error shaping, activated incrementally by stage
        for term in &self.config.shaping {
            if stage < term.activation_stage {
                continue;
            }
            let error = match term.kind {
                ShapingKind::HeadingTracking => {
                    heading_error(aircraft.target_heading_rad, aircraft.heading_rad).abs()
                }
                ShapingKind::AltitudeTracking => {
                    (aircraft.target_altitude_ft - aircraft.altitude_ft).abs()
                }
                ShapingKind::SpeedTracking => {
                    (aircraft.target_speed_kts - aircraft.speed_kts).abs()
                }
            };
            total -= term.weight * sanitize_delta(error);
        }

        sanitize_delta(total)
    }

    /// (e) instruction cost and silence bonus for the tick.
    pub fn instruction_terms(&self, instructions: u32, quiet_active: usize) -> f64 {
        self.config.silence_bonus * quiet_active as f64
            - self.config.instruction_cost * instructions as f64
    }

    pub fn landing_bonus(&self) -> f64 {
        self.config.landing_bonus
    }

    pub fn all_landed_bonus(&self) -> f64 {
        self.config.all_landed_bonus
    }

    pub fn collision_penalty(&self) -> f64 {
        self.config.collision_penalty
    }

    pub fn discard_penalty(&self) -> f64 {
        self.config.discard_penalty
    }

    pub fn tick_cost(&self) -> f64 {
        self.config.tick_cost
    }

    pub fn landed_idle_reward(&self) -> f64 {
        self.config.landed_idle_reward
    }

    /// Apply the stage-dependent scale, then clip. Never returns a
    /// non-finite value.
    pub fn finalize(&self, total: f64, stage: u32) -> f64 {
        let index = (stage as usize).min(self.config.stage_scales.len() - 1);
        let scaled = total * self.config.stage_scales[index];
        let clipped = scaled.clamp(-self.config.reward_clip, self.config.reward_clip);
        sanitize_delta(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::FlightRules;
    use crate::config::ShapingTerm;
    use crate::utils::deg_to_rad;
    use glam::DVec2;

    fn engine() -> RewardEngine {
        RewardEngine::new(RewardConfig::default())
    }

    fn arrival_at(distance_nm: f64, altitude_ft: f64) -> AircraftState {
        let mut ac = AircraftState::new(
            1,
            DVec2::new(distance_nm, 0.0),
            DVec2::ZERO,
            std::f64::consts::PI,
            180.0,
            altitude_ft,
            120.0,
            250.0,
            deg_to_rad(3.0),
            FlightRules::Ifr,
        );
        ac.target_altitude_ft = altitude_ft;
        ac
    }

    #[test]
    fn progress_toward_field_is_rewarded() {
        let engine = engine();
        let airport = Airport::default();

        let mut ac = arrival_at(10.0, 10.0 * GLIDE_SLOPE_FT_PER_NM);
        ac.prev_distance_nm = 10.5; // closed half a mile last tick
        let closing = engine.flight_terms(&mut ac, &airport, 0);

        let mut ac = arrival_at(10.0, 10.0 * GLIDE_SLOPE_FT_PER_NM);
        ac.prev_distance_nm = 10.0;
        let holding = engine.flight_terms(&mut ac, &airport, 0);

        assert!(closing > holding);
    }

    #[test]
    fn above_glide_path_is_penalized_below_is_not() {
        let engine = engine();
        let airport = Airport::default();

        let mut high = arrival_at(10.0, 6000.0); // well above 3180 ft profile
        let r_high = engine.flight_terms(&mut high, &airport, 0);

        let mut low = arrival_at(10.0, 2000.0); // below profile
        let r_low = engine.flight_terms(&mut low, &airport, 0);

        assert!(r_low > r_high);
    }

    #[test]
    fn vertical_rate_magnitude_is_penalized() {
        let engine = engine();
        let airport = Airport::default();

        let mut level = arrival_at(10.0, 3000.0);
        level.vert_speed_fpm = 0.0;
        let r_level = engine.flight_terms(&mut level, &airport, 0);

        let mut churning = arrival_at(10.0, 3000.0);
        churning.vert_speed_fpm = 2500.0;
        let r_churning = engine.flight_terms(&mut churning, &airport, 0);

        assert!(r_level > r_churning);
    }

    #[test]
    fn shaping_terms_activate_monotonically_with_stage() {
        let engine = engine();
        let airport = Airport::default();

        // Off-target heading: the heading shaping term (stage 1) should
        // bite at stage 1 but not at stage 0.
        let make = || {
            let mut ac = arrival_at(10.0, 2000.0);
            ac.target_heading_rad = ac.heading_rad + deg_to_rad(40.0);
            ac
        };

        let r0 = engine.flight_terms(&mut make(), &airport, 0);
        let r1 = engine.flight_terms(&mut make(), &airport, 1);

        assert!(r0 > r1, "stage 1 adds a penalty stage 0 does not have");
    }

    #[test]
    fn instruction_terms_balance_cost_and_silence() {
        let engine = engine();

        approx::assert_relative_eq!(engine.instruction_terms(0, 3), 0.3, epsilon = 1e-12);
        assert!(engine.instruction_terms(2, 1) < 0.0);
    }

    #[test]
    fn non_finite_state_yields_finite_reward() {
        let engine = engine();
        let airport = Airport::default();

        let mut ac = arrival_at(10.0, 3000.0);
        ac.prev_distance_nm = f64::INFINITY;
        ac.vert_speed_fpm = f64::NAN;

        let r = engine.flight_terms(&mut ac, &airport, 5);
        assert!(r.is_finite());
    }

    #[test]
    fn finalize_scales_then_clips() {
        let mut config = RewardConfig::default();
        config.stage_scales = vec![1.0, 0.5];
        config.reward_clip = 100.0;
        let engine = RewardEngine::new(config);

        assert_eq!(engine.finalize(60.0, 1), 30.0);
        assert_eq!(engine.finalize(10_000.0, 0), 100.0);
        assert_eq!(engine.finalize(-10_000.0, 7), -100.0);
        assert!(engine.finalize(f64::NAN, 0).is_finite());
    }

    #[test]
    fn shaping_list_is_externally_configurable() {
        let mut config = RewardConfig::default();
        config.shaping = vec![ShapingTerm {
            kind: ShapingKind::SpeedTracking,
            activation_stage: 0,
            weight: 1.0,
        }];
        let engine = RewardEngine::new(config);
        let airport = Airport::default();

        let mut ac = arrival_at(10.0, 2000.0);
        ac.target_speed_kts = ac.speed_kts + 30.0;
        let slow = engine.flight_terms(&mut ac, &airport, 0);

        let mut ac = arrival_at(10.0, 2000.0);
        let on_speed = engine.flight_terms(&mut ac, &airport, 0);

        assert!(on_speed > slow);
    }
}
