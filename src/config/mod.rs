use serde::{Deserialize, Serialize};

use crate::utils::{constants, deg_to_rad, SimError};

/// Kinematic limits and pilot gains shared by every aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Simulation time step in seconds.
    pub dt_s: f64,
    pub max_turn_rate_rad_s: f64,
    pub max_accel_kts_s: f64,
    pub max_vert_speed_fpm: f64,
    pub max_vert_accel_fpm_s: f64,
    pub min_altitude_ft: f64,
    pub max_altitude_ft: f64,
    /// Heading loop gain, rad/s of commanded turn per rad of error.
    pub kp_heading: f64,
    /// Speed loop gain, kt/s of commanded accel per kt of error.
    pub kp_speed: f64,
    /// Altitude loop gain, ft/min of commanded vertical speed per ft of error.
    pub kp_altitude: f64,
    /// Altitude error inside which the pilot levels off.
    pub altitude_dead_band_ft: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt_s: 1.0,
            max_turn_rate_rad_s: constants::MAX_TURN_RATE_RAD_S,
            max_accel_kts_s: constants::MAX_ACCEL_KTS_S,
            max_vert_speed_fpm: constants::MAX_VERT_SPEED_FPM,
            max_vert_accel_fpm_s: constants::MAX_VERT_ACCEL_FPM_S,
            min_altitude_ft: 0.0,
            max_altitude_ft: 15000.0,
            kp_heading: 1.0,
            kp_speed: 0.5,
            kp_altitude: 5.0,
            altitude_dead_band_ft: 100.0,
        }
    }
}

/// Dead-bands separating a meaningful clearance from a free correction,
/// plus the spans used to decode normalized commands into targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearanceConfig {
    pub heading_dead_band_rad: f64,
    pub speed_dead_band_kts: f64,
    pub altitude_dead_band_ft: f64,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            heading_dead_band_rad: deg_to_rad(1.0),
            speed_dead_band_kts: 5.0,
            altitude_dead_band_ft: 200.0,
        }
    }
}

/// All conditions must hold simultaneously for a touchdown to count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LandingCriteria {
    pub radius_nm: f64,
    pub max_altitude_ft: f64,
    pub max_vert_speed_fpm: f64,
    pub max_turn_rate_rad_s: f64,
    pub max_speed_kts: f64,
}

/// Landing criteria per flight rules. VFR traffic gets the looser set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingConfig {
    pub ifr: LandingCriteria,
    pub vfr: LandingCriteria,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            ifr: LandingCriteria {
                radius_nm: 1.0,
                max_altitude_ft: 500.0,
                max_vert_speed_fpm: 1500.0,
                max_turn_rate_rad_s: deg_to_rad(1.5),
                max_speed_kts: 230.0,
            },
            vfr: LandingCriteria {
                radius_nm: 1.5,
                max_altitude_ft: 1000.0,
                max_vert_speed_fpm: 2000.0,
                max_turn_rate_rad_s: deg_to_rad(3.0),
                max_speed_kts: 250.0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparationConfig {
    pub min_horizontal_nm: f64,
    pub min_vertical_ft: f64,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            min_horizontal_nm: 3.0,
            min_vertical_ft: 1000.0,
        }
    }
}

/// Tracking-error shaping terms, activated incrementally by curriculum
/// stage: a term contributes only once the current stage reaches
/// `activation_stage`, and stays active from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapingKind {
    HeadingTracking,
    AltitudeTracking,
    SpeedTracking,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShapingTerm {
    pub kind: ShapingKind,
    pub activation_stage: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    pub progress_weight: f64,
    pub glide_deviation_weight: f64,
    pub vert_speed_weight: f64,
    pub shaping: Vec<ShapingTerm>,
    pub instruction_cost: f64,
    pub silence_bonus: f64,
    /// Credit for aircraft already on the ground, so reward accounting
    /// stays well-formed after a landing.
    pub landed_idle_reward: f64,
    pub landing_bonus: f64,
    pub all_landed_bonus: f64,
    pub collision_penalty: f64,
    pub discard_penalty: f64,
    pub tick_cost: f64,
    /// Multiplicative scale per curriculum stage; the last entry covers
    /// all later stages.
    pub stage_scales: Vec<f64>,
    /// Symmetric clip applied after scaling.
    pub reward_clip: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            progress_weight: 10.0,
            glide_deviation_weight: 0.002,
            vert_speed_weight: 0.0002,
            shaping: vec![
                ShapingTerm {
                    kind: ShapingKind::HeadingTracking,
                    activation_stage: 1,
                    weight: 0.5,
                },
                ShapingTerm {
                    kind: ShapingKind::AltitudeTracking,
                    activation_stage: 2,
                    weight: 0.0005,
                },
                ShapingTerm {
                    kind: ShapingKind::SpeedTracking,
                    activation_stage: 3,
                    weight: 0.01,
                },
            ],
            instruction_cost: 0.3,
            silence_bonus: 0.1,
            landed_idle_reward: 0.05,
            landing_bonus: 100.0,
            all_landed_bonus: 200.0,
            collision_penalty: 200.0,
            discard_penalty: 50.0,
            tick_cost: 0.1,
            stage_scales: vec![1.0, 1.0, 1.0, 0.9, 0.9, 0.8],
            reward_clip: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationConfig {
    /// Fixed number of aircraft slots; absent slots are zero-padded.
    pub max_slots: usize,
    pub include_altitude: bool,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            max_slots: 8,
            include_altitude: true,
        }
    }
}

/// Top-level configuration for a simulation session. Every tunable the
/// engine consumes lives here; nothing is read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EnvConfig {
    pub physics: PhysicsConfig,
    pub clearance: ClearanceConfig,
    pub landing: LandingConfig,
    pub separation: SeparationConfig,
    pub reward: RewardConfig,
    pub observation: ObservationConfig,
    pub limits: EpisodeLimits,
}

/// Episode caps and the discard boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeLimits {
    pub max_ticks: u64,
    pub max_sim_time_s: f64,
    /// Aircraft drifting further than this from the field are discarded.
    pub max_distance_nm: f64,
}

impl Default for EpisodeLimits {
    fn default() -> Self {
        Self {
            max_ticks: 4000,
            max_sim_time_s: constants::MAX_SIM_SECONDS,
            max_distance_nm: 40.0,
        }
    }
}

impl EnvConfig {
    pub fn load(path: &str) -> Result<Self, SimError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<(), SimError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// Reject inconsistent configuration before any aircraft exists.
    pub fn validate(&self) -> Result<(), SimError> {
        let p = &self.physics;
        if !p.dt_s.is_finite() || p.dt_s <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "dt_s must be positive and finite, got {}",
                p.dt_s
            )));
        }
        if p.max_turn_rate_rad_s <= 0.0
            || p.max_accel_kts_s <= 0.0
            || p.max_vert_speed_fpm <= 0.0
            || p.max_vert_accel_fpm_s <= 0.0
        {
            return Err(SimError::InvalidConfig(
                "physical rate limits must be positive".into(),
            ));
        }
        if p.min_altitude_ft >= p.max_altitude_ft {
            return Err(SimError::InvalidConfig(format!(
                "min_altitude_ft ({}) must be below max_altitude_ft ({})",
                p.min_altitude_ft, p.max_altitude_ft
            )));
        }
        if p.kp_heading <= 0.0 || p.kp_speed <= 0.0 || p.kp_altitude <= 0.0 {
            return Err(SimError::InvalidConfig(
                "pilot gains must be positive".into(),
            ));
        }
        if p.altitude_dead_band_ft < 0.0 {
            return Err(SimError::InvalidConfig(
                "altitude_dead_band_ft must be non-negative".into(),
            ));
        }

        let c = &self.clearance;
        if c.heading_dead_band_rad < 0.0
            || c.speed_dead_band_kts < 0.0
            || c.altitude_dead_band_ft < 0.0
        {
            return Err(SimError::InvalidConfig(
                "clearance dead-bands must be non-negative".into(),
            ));
        }

        for criteria in [&self.landing.ifr, &self.landing.vfr] {
            if criteria.radius_nm <= 0.0
                || criteria.max_vert_speed_fpm <= 0.0
                || criteria.max_turn_rate_rad_s <= 0.0
                || criteria.max_speed_kts <= 0.0
            {
                return Err(SimError::InvalidConfig(
                    "landing criteria must be positive".into(),
                ));
            }
        }

        if self.separation.min_horizontal_nm <= 0.0 || self.separation.min_vertical_ft <= 0.0 {
            return Err(SimError::InvalidConfig(
                "separation minima must be positive".into(),
            ));
        }

        let r = &self.reward;
        if r.stage_scales.is_empty() {
            return Err(SimError::InvalidConfig(
                "stage_scales must not be empty".into(),
            ));
        }
        if r.stage_scales.iter().any(|s| !s.is_finite()) {
            return Err(SimError::InvalidConfig(
                "stage_scales must be finite".into(),
            ));
        }
        if !r.reward_clip.is_finite() || r.reward_clip <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "reward_clip must be positive and finite, got {}",
                r.reward_clip
            )));
        }

        if self.observation.max_slots == 0 {
            return Err(SimError::InvalidConfig(
                "observation.max_slots must be at least 1".into(),
            ));
        }

        let l = &self.limits;
        if l.max_ticks == 0 || l.max_sim_time_s <= 0.0 || l.max_distance_nm <= 0.0 {
            return Err(SimError::InvalidConfig(
                "episode limits must be positive".into(),
            ));
        }

        Ok(())
    }
}
