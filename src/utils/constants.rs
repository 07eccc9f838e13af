/// Feet per nautical mile.
pub const FEET_PER_NM: f64 = 6076.12;

/// Knots to nautical miles per second.
pub const KNOTS_TO_NM_PER_S: f64 = 1.0 / 3600.0;

/// Ideal approach profile: altitude above field per nautical mile of
/// distance to run, corresponding to a 3 degree glide slope.
pub const GLIDE_SLOPE_FT_PER_NM: f64 = 318.0;

// Default physical limits for a terminal-area arrival.
pub const MAX_TURN_RATE_RAD_S: f64 = 3.0 * std::f64::consts::PI / 180.0; // 3 deg/s
pub const MAX_ACCEL_KTS_S: f64 = 5.0; // knots/s
pub const MAX_VERT_SPEED_FPM: f64 = 2500.0; // ft/min
pub const MAX_VERT_ACCEL_FPM_S: f64 = 200.0; // ft/min per second of slew

/// Longitudinal spacing between successive arrivals on the same stream.
pub const INITIAL_SPACING_NM: f64 = 4.0;

/// Hard cap on simulated episode time.
pub const MAX_SIM_SECONDS: f64 = 3600.0;
