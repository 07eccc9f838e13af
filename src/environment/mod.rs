pub mod events;
pub mod session;
pub mod spawn;

pub use events::{EpisodeOutcome, EventKind, EventLog, EventSink, NullSink, SessionEvent};
pub use session::{AtcSession, SessionStatus, StepOutput};
pub use spawn::{spawn_on_final, PatternEntry, SpawnPoint, SpawnPolicy, StageConfig, VfrClass};
