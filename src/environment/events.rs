use serde::{Deserialize, Serialize};

/// Outcome recorded when an episode reaches a terminal or truncated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    AllLanded,
    SeparationLoss,
    AircraftDiscarded,
    TimeLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Spawn,
    Clearance { instructions: u32 },
    Landed,
    SeparationViolation { other: u32 },
    Discarded,
    EpisodeEnd { outcome: EpisodeOutcome },
}

/// Fire-and-forget session notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub time_s: f64,
    pub aircraft: Option<u32>,
    pub kind: EventKind,
}

/// Receiver for session notifications.
///
/// The stepper calls `record` and moves on; the trait is infallible by
/// construction so a misbehaving sink can never affect the simulation.
pub trait EventSink {
    fn record(&mut self, event: SessionEvent);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: SessionEvent) {}
}

/// In-memory sink with counters, useful for audits and tests.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<SessionEvent>,
    pub landings: u32,
    pub violations: u32,
    pub discards: u32,
}

impl EventSink for EventLog {
    fn record(&mut self, event: SessionEvent) {
        match event.kind {
            EventKind::Landed => self.landings += 1,
            EventKind::SeparationViolation { .. } => self.violations += 1,
            EventKind::Discarded => self.discards += 1,
            _ => {}
        }
        self.events.push(event);
    }
}
