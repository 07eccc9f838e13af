use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Airport, FlightRules, Runway};
use crate::utils::{deg_to_rad, wrap_angle, RngManager, SimError, INITIAL_SPACING_NM};

/// Everything needed to create one aircraft at reset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position_nm: DVec2,
    pub heading_rad: f64,
    pub speed_kts: f64,
    pub altitude_ft: f64,
    pub min_speed_kts: f64,
    pub max_speed_kts: f64,
    pub flight_rules: FlightRules,
}

/// Difficulty parameters for one curriculum stage. The engine only ever
/// consumes the stage index; this table parameterizes spawning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StageConfig {
    pub stage: u32,
    pub num_planes: usize,
    pub initial_distance_nm: f64,
    pub min_altitude_ft: f64,
    pub max_altitude_ft: f64,
    /// Intercept angle range in degrees, sampled per aircraft.
    pub intercept_range_deg: (f64, f64),
}

impl StageConfig {
    /// The default progression, from a lone arrival established on final
    /// up to an eight-aircraft terminal area.
    pub fn schedule() -> Vec<StageConfig> {
        vec![
            StageConfig {
                stage: 0,
                num_planes: 1,
                initial_distance_nm: 10.0,
                min_altitude_ft: 2000.0,
                max_altitude_ft: 2000.0,
                intercept_range_deg: (0.0, 0.0),
            },
            StageConfig {
                stage: 1,
                num_planes: 1,
                initial_distance_nm: 15.0,
                min_altitude_ft: 4000.0,
                max_altitude_ft: 4000.0,
                intercept_range_deg: (-30.0, 30.0),
            },
            StageConfig {
                stage: 2,
                num_planes: 2,
                initial_distance_nm: 12.0,
                min_altitude_ft: 3000.0,
                max_altitude_ft: 6000.0,
                intercept_range_deg: (-20.0, 20.0),
            },
            StageConfig {
                stage: 3,
                num_planes: 4,
                initial_distance_nm: 10.0,
                min_altitude_ft: 2000.0,
                max_altitude_ft: 10000.0,
                intercept_range_deg: (-45.0, 45.0),
            },
            StageConfig {
                stage: 4,
                num_planes: 6,
                initial_distance_nm: 15.0,
                min_altitude_ft: 1000.0,
                max_altitude_ft: 12000.0,
                intercept_range_deg: (-60.0, 60.0),
            },
            StageConfig {
                stage: 5,
                num_planes: 8,
                initial_distance_nm: 20.0,
                min_altitude_ft: 500.0,
                max_altitude_ft: 15000.0,
                intercept_range_deg: (-90.0, 90.0),
            },
        ]
    }

    /// Stage lookup; stages past the end of the schedule use the last one.
    pub fn for_stage(stage: u32) -> StageConfig {
        let schedule = Self::schedule();
        let index = (stage as usize).min(schedule.len() - 1);
        schedule[index]
    }
}

/// VFR aircraft classes with their typical performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VfrClass {
    GeneralAviation,
    Commuter,
    BusinessJet,
    Cargo,
}

impl VfrClass {
    pub const ALL: [VfrClass; 4] = [
        VfrClass::GeneralAviation,
        VfrClass::Commuter,
        VfrClass::BusinessJet,
        VfrClass::Cargo,
    ];

    /// (cruise speed kts, pattern altitude ft)
    pub fn profile(&self) -> (f64, f64) {
        match self {
            VfrClass::GeneralAviation => (100.0, 3000.0),
            VfrClass::Commuter => (120.0, 5000.0),
            VfrClass::BusinessJet => (200.0, 8000.0),
            VfrClass::Cargo => (140.0, 4000.0),
        }
    }
}

/// Standard VFR pattern entries relative to the runway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternEntry {
    Downwind,
    Base,
    StraightIn,
}

impl PatternEntry {
    /// Entry position and heading for this pattern leg.
    pub fn geometry(&self, airport: &Airport, runway: &Runway, distance_nm: f64) -> (DVec2, f64) {
        let course = runway.heading_rad;
        match self {
            PatternEntry::Downwind => {
                // Parallel to the runway, opposite direction, abeam the field.
                let perpendicular = course + std::f64::consts::FRAC_PI_2;
                let position = airport.position_nm
                    + DVec2::new(perpendicular.cos(), perpendicular.sin()) * distance_nm;
                (position, wrap_angle(course + std::f64::consts::PI))
            }
            PatternEntry::Base => {
                let position =
                    airport.position_nm + DVec2::new(course.cos(), course.sin()) * distance_nm;
                (position, wrap_angle(course))
            }
            PatternEntry::StraightIn => {
                let position =
                    airport.position_nm - DVec2::new(course.cos(), course.sin()) * distance_nm;
                (position, wrap_angle(course))
            }
        }
    }

    fn default_distance_nm(&self) -> f64 {
        match self {
            PatternEntry::Downwind => 1.5,
            PatternEntry::Base => 1.0,
            PatternEntry::StraightIn => 2.0,
        }
    }
}

/// Place an arrival on (or converging toward) the localizer.
pub fn spawn_on_final(
    airport: &Airport,
    runway: &Runway,
    distance_nm: f64,
    intercept_deg: f64,
    altitude_ft: f64,
) -> SpawnPoint {
    let position = runway.localizer_point_nm(airport, distance_nm);
    let heading = wrap_angle(runway.heading_rad + deg_to_rad(intercept_deg));
    SpawnPoint {
        position_nm: position,
        heading_rad: heading,
        speed_kts: 180.0,
        altitude_ft,
        min_speed_kts: 120.0,
        max_speed_kts: 250.0,
        flight_rules: FlightRules::Ifr,
    }
}

/// Injectable spawn policy consumed by `reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// IFR arrivals on final, parameterized by the stage table; distances
    /// and intercept angles drawn from the session's seeded RNG.
    OnFinal { num_planes: Option<usize> },
    /// Mixed VFR traffic joining the pattern.
    VfrPattern { num_planes: usize },
    /// Exact spawn points, for scripted scenarios and tests.
    Fixed(Vec<SpawnPoint>),
}

impl SpawnPolicy {
    pub fn generate(
        &self,
        airport: &Airport,
        runway: &Runway,
        stage: u32,
        rng: &RngManager,
    ) -> Result<Vec<SpawnPoint>, SimError> {
        let points = match self {
            SpawnPolicy::Fixed(points) => points.clone(),
            SpawnPolicy::OnFinal { num_planes } => {
                let stage_config = StageConfig::for_stage(stage);
                let count = num_planes.unwrap_or(stage_config.num_planes);
                (0..count)
                    .map(|i| {
                        let mut stream = rng.get_rng(&format!("aircraft_{i}"));
                        let distance =
                            stage_config.initial_distance_nm + i as f64 * INITIAL_SPACING_NM;
                        let intercept =
                            sample_range(&mut stream, stage_config.intercept_range_deg);
                        let altitude = sample_range(
                            &mut stream,
                            (stage_config.min_altitude_ft, stage_config.max_altitude_ft),
                        );
                        spawn_on_final(airport, runway, distance, intercept, altitude)
                    })
                    .collect()
            }
            SpawnPolicy::VfrPattern { num_planes } => (0..*num_planes)
                .map(|i| {
                    let entry = match i % 3 {
                        0 => PatternEntry::Downwind,
                        1 => PatternEntry::Base,
                        _ => PatternEntry::StraightIn,
                    };
                    let class = VfrClass::ALL[i % VfrClass::ALL.len()];
                    let (cruise_kts, altitude_ft) = class.profile();
                    // Successive waves join further out.
                    let wave = (i / 3) as f64;
                    let distance = entry.default_distance_nm() + wave * INITIAL_SPACING_NM;
                    let (position, heading) = entry.geometry(airport, runway, distance);
                    SpawnPoint {
                        position_nm: position,
                        heading_rad: heading,
                        speed_kts: cruise_kts,
                        altitude_ft,
                        min_speed_kts: (cruise_kts - 20.0).max(60.0),
                        max_speed_kts: cruise_kts + 30.0,
                        flight_rules: FlightRules::Vfr,
                    }
                })
                .collect(),
        };

        if points.is_empty() {
            return Err(SimError::SpawnError(
                "spawn policy produced no aircraft".into(),
            ));
        }
        Ok(points)
    }
}

fn sample_range(rng: &mut impl Rng, (lo, hi): (f64, f64)) -> f64 {
    if (hi - lo).abs() < f64::EPSILON {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn on_final_spawn_points_at_the_field_with_zero_intercept() {
        let airport = Airport::default();
        let runway = Runway::new(deg_to_rad(180.0), 6.0);

        let point = spawn_on_final(&airport, &runway, 10.0, 0.0, 3000.0);

        assert_relative_eq!(point.position_nm.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(point.heading_rad.abs(), std::f64::consts::PI, epsilon = 1e-9);
        assert_eq!(point.flight_rules, FlightRules::Ifr);
    }

    #[test]
    fn stage_lookup_saturates_at_the_last_stage() {
        let last = StageConfig::for_stage(99);
        assert_eq!(last.stage, 5);
        assert_eq!(last.num_planes, 8);
    }

    #[test]
    fn on_final_policy_is_deterministic_per_seed() {
        let airport = Airport::default();
        let runway = Runway::new(deg_to_rad(90.0), 6.0);
        let policy = SpawnPolicy::OnFinal { num_planes: None };

        let a = policy
            .generate(&airport, &runway, 3, &RngManager::new(7))
            .unwrap();
        let b = policy
            .generate(&airport, &runway, 3, &RngManager::new(7))
            .unwrap();
        let c = policy
            .generate(&airport, &runway, 3, &RngManager::new(8))
            .unwrap();

        assert_eq!(a.len(), 4);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position_nm, y.position_nm);
            assert_eq!(x.altitude_ft, y.altitude_ft);
        }
        assert!(a
            .iter()
            .zip(&c)
            .any(|(x, y)| x.position_nm != y.position_nm || x.altitude_ft != y.altitude_ft));
    }

    #[test]
    fn successive_arrivals_are_spaced_along_the_stream() {
        let airport = Airport::default();
        let runway = Runway::new(0.0, 6.0);
        let policy = SpawnPolicy::OnFinal { num_planes: Some(3) };

        let points = policy
            .generate(&airport, &runway, 0, &RngManager::new(1))
            .unwrap();

        let d0 = points[0].position_nm.distance(airport.position_nm);
        let d1 = points[1].position_nm.distance(airport.position_nm);
        assert_relative_eq!(d1 - d0, INITIAL_SPACING_NM, epsilon = 1e-9);
    }

    #[test]
    fn vfr_pattern_produces_vfr_traffic() {
        let airport = Airport::default();
        let runway = Runway::new(deg_to_rad(270.0), 6.0);
        let policy = SpawnPolicy::VfrPattern { num_planes: 4 };

        let points = policy
            .generate(&airport, &runway, 0, &RngManager::new(1))
            .unwrap();

        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.flight_rules == FlightRules::Vfr));
        // Entries differ in position.
        assert_ne!(points[0].position_nm, points[1].position_nm);
    }

    #[test]
    fn empty_fixed_policy_is_rejected() {
        let airport = Airport::default();
        let runway = Runway::default();
        let policy = SpawnPolicy::Fixed(vec![]);

        assert!(policy
            .generate(&airport, &runway, 0, &RngManager::new(1))
            .is_err());
    }
}
