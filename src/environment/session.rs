use crate::components::{Airport, AircraftState, Runway};
use crate::config::EnvConfig;
use crate::environment::events::{
    EpisodeOutcome, EventKind, EventSink, NullSink, SessionEvent,
};
use crate::environment::spawn::SpawnPolicy;
use crate::server::{build_observation, AircraftCommand};
use crate::systems::{
    ClearanceInterface, LandingDetector, PhysicsIntegrator, PilotController, RewardEngine,
    SeparationMonitor, SeparationViolation,
};
use crate::utils::{RngManager, SimError};

/// Episode state machine. Terminal states are sticky: a terminal session
/// produces no further ticks until it is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Terminated,
    Truncated,
}

/// Result of one tick.
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub observation: Vec<f64>,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
}

/// One simulation session: the fixed per-tick pipeline over an exclusively
/// owned aircraft set.
///
/// Tick ordering is load-bearing and must not change:
/// clearances, pilot + integrator, flight reward terms, landing detection,
/// separation, instruction shaping, discard check, all-landed check,
/// truncation caps.
pub struct AtcSession {
    config: EnvConfig,
    airport: Airport,
    runway: Runway,
    aircraft: Vec<AircraftState>,
    status: SessionStatus,
    tick: u64,
    sim_time_s: f64,
    stage: u32,
    rng: RngManager,

    pilot: PilotController,
    clearance: ClearanceInterface,
    integrator: PhysicsIntegrator,
    landing: LandingDetector,
    separation: SeparationMonitor,
    reward: RewardEngine,
    sink: Box<dyn EventSink>,
}

impl AtcSession {
    pub fn new(config: EnvConfig, airport: Airport, runway: Runway) -> Result<Self, SimError> {
        Self::with_sink(config, airport, runway, Box::new(NullSink))
    }

    pub fn with_sink(
        config: EnvConfig,
        airport: Airport,
        runway: Runway,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, SimError> {
        config.validate()?;

        Ok(Self {
            pilot: PilotController::new(config.physics.clone()),
            clearance: ClearanceInterface::new(config.clearance.clone(), &config.physics),
            integrator: PhysicsIntegrator::new(config.physics.clone()),
            landing: LandingDetector::new(config.landing.clone()),
            separation: SeparationMonitor::new(config.separation.clone()),
            reward: RewardEngine::new(config.reward.clone()),
            config,
            airport,
            runway,
            aircraft: Vec::new(),
            status: SessionStatus::Terminated,
            tick: 0,
            sim_time_s: 0.0,
            stage: 0,
            rng: RngManager::new(0),
            sink,
        })
    }

    /// Start a new episode. Destroys the previous aircraft set.
    pub fn reset(
        &mut self,
        seed: u64,
        curriculum_stage: u32,
        policy: &SpawnPolicy,
    ) -> Result<Vec<f64>, SimError> {
        self.rng = RngManager::new(seed);
        self.stage = curriculum_stage;

        let points = policy.generate(&self.airport, &self.runway, curriculum_stage, &self.rng)?;
        if points.len() > self.config.observation.max_slots {
            return Err(SimError::SpawnError(format!(
                "{} aircraft exceed the {} observation slots",
                points.len(),
                self.config.observation.max_slots
            )));
        }

        self.aircraft = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                AircraftState::new(
                    i as u32,
                    p.position_nm,
                    self.airport.position_nm,
                    p.heading_rad,
                    p.speed_kts,
                    p.altitude_ft,
                    p.min_speed_kts,
                    p.max_speed_kts,
                    self.config.physics.max_turn_rate_rad_s,
                    p.flight_rules,
                )
            })
            .collect();

        self.status = SessionStatus::Running;
        self.tick = 0;
        self.sim_time_s = 0.0;

        for ac in &self.aircraft {
            self.sink.record(SessionEvent {
                time_s: 0.0,
                aircraft: Some(ac.id),
                kind: EventKind::Spawn,
            });
        }

        Ok(build_observation(
            &self.aircraft,
            &self.airport,
            &self.config.observation,
        ))
    }

    /// Advance the simulation by one tick.
    ///
    /// All-or-nothing: an invalid command vector is rejected before any
    /// aircraft is touched, and a terminal session rejects the call
    /// outright.
    pub fn step(&mut self, commands: &[AircraftCommand]) -> Result<StepOutput, SimError> {
        if self.status != SessionStatus::Running {
            return Err(SimError::SessionTerminal);
        }
        if commands.len() != self.aircraft.len() {
            return Err(SimError::InvalidCommand {
                expected: self.aircraft.len(),
                got: commands.len(),
            });
        }

        let dt = self.config.physics.dt_s;
        self.tick += 1;
        self.sim_time_s += dt;

        let mut reward = 0.0;
        let mut instructions_total = 0u32;
        let mut quiet_active = 0usize;
        let mut outcome: Option<EpisodeOutcome> = None;

        // 1. Clearances. Landed aircraft are skipped but credited so the
        //    reward accounting stays well-formed.
        for (ac, command) in self.aircraft.iter_mut().zip(commands) {
            if ac.landed {
                reward += self.reward.landed_idle_reward();
                continue;
            }
            let targets = command.decode(ac, &self.config.physics);
            let issued = self.clearance.set_targets(
                ac,
                targets.heading_rad,
                targets.speed_kts,
                targets.altitude_ft,
                self.sim_time_s,
            );
            instructions_total += issued;
            if issued > 0 {
                self.sink.record(SessionEvent {
                    time_s: self.sim_time_s,
                    aircraft: Some(ac.id),
                    kind: EventKind::Clearance {
                        instructions: issued,
                    },
                });
            } else {
                quiet_active += 1;
            }
        }

        // 2. Controllers and integration. Each aircraft only reads its own
        //    start-of-tick state, so iteration order is immaterial.
        for ac in self.aircraft.iter_mut().filter(|ac| !ac.landed) {
            self.pilot.update(ac, dt);
            self.integrator.advance(ac, dt);
        }

        // Flight reward terms use post-integration state.
        for ac in self.aircraft.iter_mut().filter(|ac| !ac.landed) {
            reward += self.reward.flight_terms(ac, &self.airport, self.stage);
        }

        // 3. Landing detection.
        for ac in self.aircraft.iter_mut() {
            if self.landing.check(ac, &self.airport) {
                reward += self.reward.landing_bonus();
                self.sink.record(SessionEvent {
                    time_s: self.sim_time_s,
                    aircraft: Some(ac.id),
                    kind: EventKind::Landed,
                });
            }
        }

        // 4. Separation. The penalty and the termination latch once, but
        //    every simultaneous pair is reported.
        let violations = self.separation.violations(&self.aircraft);
        if !violations.is_empty() {
            reward -= self.reward.collision_penalty();
            outcome = Some(EpisodeOutcome::SeparationLoss);
            for v in &violations {
                tracing::info!(first = v.first, second = v.second, "separation violation");
                self.sink.record(SessionEvent {
                    time_s: self.sim_time_s,
                    aircraft: Some(v.first),
                    kind: EventKind::SeparationViolation { other: v.second },
                });
            }
        }

        // 5. Instruction cost and silence bonus.
        reward += self
            .reward
            .instruction_terms(instructions_total, quiet_active);

        // 6. Distance discard.
        let max_distance = self.config.limits.max_distance_nm;
        for ac in self.aircraft.iter().filter(|ac| !ac.landed) {
            if ac.distance_to(self.airport.position_nm) > max_distance {
                reward -= self.reward.discard_penalty();
                outcome.get_or_insert(EpisodeOutcome::AircraftDiscarded);
                tracing::info!(id = ac.id, "aircraft discarded beyond boundary");
                self.sink.record(SessionEvent {
                    time_s: self.sim_time_s,
                    aircraft: Some(ac.id),
                    kind: EventKind::Discarded,
                });
            }
        }

        // 7. All landed.
        if outcome.is_none() && !self.aircraft.is_empty() && self.aircraft.iter().all(|a| a.landed)
        {
            reward += self.reward.all_landed_bonus();
            outcome = Some(EpisodeOutcome::AllLanded);
        }

        // 8. Episode caps.
        if outcome.is_none()
            && (self.tick >= self.config.limits.max_ticks
                || self.sim_time_s >= self.config.limits.max_sim_time_s)
        {
            outcome = Some(EpisodeOutcome::TimeLimit);
        }

        reward -= self.reward.tick_cost();
        let reward = self.reward.finalize(reward, self.stage);

        if let Some(outcome) = outcome {
            self.status = match outcome {
                EpisodeOutcome::TimeLimit => SessionStatus::Truncated,
                _ => SessionStatus::Terminated,
            };
            self.sink.record(SessionEvent {
                time_s: self.sim_time_s,
                aircraft: None,
                kind: EventKind::EpisodeEnd { outcome },
            });
        }

        Ok(StepOutput {
            observation: build_observation(&self.aircraft, &self.airport, &self.config.observation),
            reward,
            terminated: self.status == SessionStatus::Terminated,
            truncated: self.status == SessionStatus::Truncated,
        })
    }

    /// All currently violating pairs, for external auditing. Available in
    /// any state.
    pub fn separation_violations(&self) -> Vec<SeparationViolation> {
        self.separation.violations(&self.aircraft)
    }

    pub fn aircraft(&self) -> &[AircraftState] {
        &self.aircraft
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn sim_time_s(&self) -> f64 {
        self.sim_time_s
    }

    pub fn curriculum_stage(&self) -> u32 {
        self.stage
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}
