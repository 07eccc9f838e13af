pub mod act;
pub mod obs;

pub use act::{AircraftCommand, DecodedTargets};
pub use obs::{build_observation, slot_width};
