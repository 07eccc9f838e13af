//! Terminal-area approach control simulation engine.
//!
//! Simulates multiple aircraft approaching a single airport under
//! externally issued heading, speed and altitude clearances, and scores
//! every simulation tick for a control policy. The engine is
//! single-threaded, step-driven and deterministic: identical seeds,
//! commands and time steps reproduce identical trajectories.
//!
//! ```no_run
//! use tracon::{AtcSession, EnvConfig, Airport, Runway, SpawnPolicy, AircraftCommand};
//!
//! let mut session = AtcSession::new(
//!     EnvConfig::default(),
//!     Airport::default(),
//!     Runway::default(),
//! )?;
//! session.reset(42, 0, &SpawnPolicy::OnFinal { num_planes: None })?;
//!
//! let commands: Vec<AircraftCommand> = session
//!     .aircraft()
//!     .iter()
//!     .map(|ac| AircraftCommand::maintain(ac, &session.config().physics))
//!     .collect();
//! let out = session.step(&commands)?;
//! println!("reward {}", out.reward);
//! # Ok::<(), tracon::SimError>(())
//! ```

pub mod components;
pub mod config;
pub mod environment;
pub mod server;
pub mod systems;
pub mod utils;

pub use components::{AircraftState, Airport, FlightRules, Runway};
pub use config::{
    ClearanceConfig, EnvConfig, EpisodeLimits, LandingConfig, LandingCriteria, ObservationConfig,
    PhysicsConfig, RewardConfig, SeparationConfig, ShapingKind, ShapingTerm,
};
pub use environment::{
    AtcSession, EpisodeOutcome, EventKind, EventLog, EventSink, NullSink, SessionEvent,
    SessionStatus, SpawnPoint, SpawnPolicy, StageConfig, StepOutput,
};
pub use server::{build_observation, AircraftCommand};
pub use systems::{
    ClearanceInterface, LandingDetector, PhysicsIntegrator, PilotController, RewardEngine,
    SeparationMonitor, SeparationViolation,
};
pub use utils::{RngManager, SimError};
