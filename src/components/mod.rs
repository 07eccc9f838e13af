pub mod aircraft;
pub mod airport;

pub use aircraft::{AircraftState, FlightRules};
pub use airport::{Airport, Runway};
