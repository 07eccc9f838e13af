use crate::components::AircraftState;
use crate::config::SeparationConfig;

/// A breached pair, reported with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparationViolation {
    pub first: u32,
    pub second: u32,
    pub horizontal_nm: f64,
    pub vertical_ft: f64,
}

/// Pairwise minimum-distance conflict detection.
///
/// A pair is in violation only when it is simultaneously inside the
/// horizontal minimum and inside the vertical minimum: aircraft stacked
/// with enough altitude between them are exempt from the horizontal rule.
/// Landed aircraft are excluded entirely.
#[derive(Debug, Clone)]
pub struct SeparationMonitor {
    config: SeparationConfig,
}

impl SeparationMonitor {
    pub fn new(config: SeparationConfig) -> Self {
        Self { config }
    }

    /// Symmetric pair predicate.
    pub fn violated(&self, a: &AircraftState, b: &AircraftState) -> bool {
        if a.landed || b.landed {
            return false;
        }
        let horizontal = a.position_nm.distance(b.position_nm);
        let vertical = (a.altitude_ft - b.altitude_ft).abs();
        horizontal < self.config.min_horizontal_nm && vertical < self.config.min_vertical_ft
    }

    /// Every violating unordered pair this tick, for external auditing.
    /// Termination latches once, but all simultaneous conflicts are still
    /// enumerable.
    pub fn violations(&self, aircraft: &[AircraftState]) -> Vec<SeparationViolation> {
        let mut found = Vec::new();
        for i in 0..aircraft.len() {
            for j in (i + 1)..aircraft.len() {
                let (a, b) = (&aircraft[i], &aircraft[j]);
                if self.violated(a, b) {
                    let (first, second) = if a.id <= b.id { (a.id, b.id) } else { (b.id, a.id) };
                    found.push(SeparationViolation {
                        first,
                        second,
                        horizontal_nm: a.position_nm.distance(b.position_nm),
                        vertical_ft: (a.altitude_ft - b.altitude_ft).abs(),
                    });
                }
            }
        }
        found
    }
}
