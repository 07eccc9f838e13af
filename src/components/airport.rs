use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Destination airport. Immutable for the lifetime of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Airport {
    /// Field position in the nautical-mile ENU frame.
    pub position_nm: DVec2,
    /// Field elevation in feet.
    pub altitude_ft: f64,
}

impl Default for Airport {
    fn default() -> Self {
        Self {
            position_nm: DVec2::ZERO,
            altitude_ft: 0.0,
        }
    }
}

/// Runway geometry, consumed only for spawn placement.
///
/// `heading_rad` is the inbound course aircraft fly toward the runway.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Runway {
    pub heading_rad: f64,
    pub faf_distance_nm: f64,
}

impl Default for Runway {
    fn default() -> Self {
        Self {
            heading_rad: 0.0,
            faf_distance_nm: 6.0,
        }
    }
}

impl Runway {
    pub fn new(heading_rad: f64, faf_distance_nm: f64) -> Self {
        Self {
            heading_rad,
            faf_distance_nm,
        }
    }

    /// Unit vector along the inbound localizer course.
    pub fn localizer_dir(&self) -> DVec2 {
        DVec2::new(self.heading_rad.cos(), self.heading_rad.sin())
    }

    /// Unit vector pointing away from the runway along final.
    pub fn outbound_dir(&self) -> DVec2 {
        -self.localizer_dir()
    }

    /// Point on the localizer a given distance out from the field.
    pub fn localizer_point_nm(&self, airport: &Airport, distance_nm: f64) -> DVec2 {
        airport.position_nm + self.outbound_dir() * distance_nm
    }

    /// Final approach fix.
    pub fn faf_point_nm(&self, airport: &Airport) -> DVec2 {
        self.localizer_point_nm(airport, self.faf_distance_nm)
    }
}
