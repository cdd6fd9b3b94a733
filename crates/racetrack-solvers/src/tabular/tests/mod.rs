mod policy_tests;
mod table_tests;

use racetrack_env::{CrashPolicy, EnvConfig, IntRange, Racetrack, TrackMap};

/// Single-start corridor whose finish column sits at `x = 2`.
pub(super) const SHORT_CORRIDOR: &str = "3,3\nS.F\n##F\n###\n";

/// Two-lane straight track, finish column at `x = 7`.
pub(super) const STRAIGHT: &str = "8,2\nS......F\nS......F\n";

/// Environment with accelerations and velocities limited to `[-1, 1]`.
pub(super) fn unit_speed_track(text: &str, p_transition: f64) -> Racetrack {
    let map = TrackMap::parse(text).expect("test track should parse");
    let config = EnvConfig {
        p_transition,
        accel_range: IntRange::new(-1, 1),
        x_velocity_range: IntRange::new(-1, 1),
        y_velocity_range: IntRange::new(-1, 1),
        crash_policy: CrashPolicy::Nearest,
        seed: Some(3),
        ..EnvConfig::default()
    };
    Racetrack::new(map, &config).expect("test config is valid")
}
