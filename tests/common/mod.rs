use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;
use tracon::{
    AircraftCommand, AircraftState, AtcSession, EventLog, EventSink, FlightRules, PhysicsConfig,
    SessionEvent, SpawnPoint,
};

/// Event sink the test keeps a handle to after the session takes ownership.
#[derive(Clone, Default)]
pub struct SharedLog(pub Rc<RefCell<EventLog>>);

impl EventSink for SharedLog {
    fn record(&mut self, event: SessionEvent) {
        self.0.borrow_mut().record(event);
    }
}

pub fn arrival_point(
    position: DVec2,
    heading_rad: f64,
    speed_kts: f64,
    altitude_ft: f64,
) -> SpawnPoint {
    SpawnPoint {
        position_nm: position,
        heading_rad,
        speed_kts,
        altitude_ft,
        min_speed_kts: 120.0,
        max_speed_kts: 250.0,
        flight_rules: FlightRules::Ifr,
    }
}

/// One "maintain everything" command per live aircraft.
pub fn maintain_all(session: &AtcSession) -> Vec<AircraftCommand> {
    session
        .aircraft()
        .iter()
        .map(|ac| AircraftCommand::maintain(ac, &session.config().physics))
        .collect()
}

/// Command that restates heading and speed but requests a new altitude.
pub fn descend_to(ac: &AircraftState, physics: &PhysicsConfig, altitude_ft: f64) -> AircraftCommand {
    let mut command = AircraftCommand::maintain(ac, physics);
    let span = physics.max_altitude_ft - physics.min_altitude_ft;
    command.altitude = (altitude_ft - physics.min_altitude_ft) / span * 2.0 - 1.0;
    command
}
