pub mod clearance;
pub mod landing;
pub mod physics;
pub mod pilot;
pub mod reward;
pub mod separation;

pub use clearance::ClearanceInterface;
pub use landing::LandingDetector;
pub use physics::PhysicsIntegrator;
pub use pilot::PilotController;
pub use reward::RewardEngine;
pub use separation::{SeparationMonitor, SeparationViolation};
