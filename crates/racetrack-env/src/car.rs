use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::trace;

use crate::{Action, Coord, CrashPolicy, Racetrack, Velocity};

/// Snapshot of what a solver may read from the car.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub position: Coord,
    pub velocity: Velocity,
    pub finished: bool,
}

/// The agent: position, velocity and finish state on a borrowed racetrack.
///
/// Every transition mutates the car in place. A car must not be shared
/// between a live episode and planner probing at the same time.
#[derive(Debug, Clone)]
pub struct Car<'a> {
    track: &'a Racetrack,
    crash_policy: CrashPolicy,
    rng: ChaCha8Rng,
    position: Coord,
    velocity: Velocity,
    previous: Option<Coord>,
    finished: bool,
}

impl<'a> Car<'a> {
    /// Create a car and place it on a random start cell.
    /// `seed` fixes start selection; `None` seeds from OS entropy.
    pub fn new(track: &'a Racetrack, crash_policy: CrashPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut car = Car {
            track,
            crash_policy,
            rng,
            position: Coord::default(),
            velocity: Velocity::ZERO,
            previous: None,
            finished: false,
        };
        car.reset();
        car
    }

    /// Create a car using the crash policy and seed configured on the racetrack.
    pub fn from_racetrack(track: &'a Racetrack) -> Self {
        Self::new(track, track.crash_policy(), track.seed())
    }

    /// Stop the car on a random start cell and clear the finish flag.
    pub fn reset(&mut self) {
        self.velocity = Velocity::ZERO;
        self.previous = None;
        self.finished = false;
        self.position = self.track.map().random_start(&mut self.rng);
    }

    /// Put the car at an arbitrary state for one-step lookahead.
    pub fn place(&mut self, position: Coord, velocity: Velocity) {
        self.position = position;
        self.velocity = velocity;
        self.previous = None;
        self.finished = false;
    }

    /// Apply one acceleration.
    ///
    /// The velocity saturates to the configured ranges, but the position moves
    /// by the unsaturated `velocity + acceleration`. Finish detection runs
    /// before crash handling.
    pub fn step(&mut self, action: Action) {
        self.previous = Some(self.position);

        let vx = self.velocity.x + action.ax;
        let vy = self.velocity.y + action.ay;
        self.velocity = Velocity::new(
            self.track.x_velocity_range().clamp(vx),
            self.track.y_velocity_range().clamp(vy),
        );
        self.position = Coord::new(self.position.x + vx, self.position.y + vy);

        self.check_finished();
        self.recover_from_crash();
    }

    fn check_finished(&mut self) {
        let Some(previous) = self.previous else {
            return;
        };
        if self.track.map().finish_line().crossed(previous, self.position) {
            self.finished = true;
        }
    }

    fn recover_from_crash(&mut self) {
        let map = self.track.map();
        if !map.is_crash(self.position) {
            return;
        }

        match self.crash_policy {
            CrashPolicy::Nearest => {
                let relief = map.nearest_relief(self.position);
                trace!(
                    x = self.position.x,
                    y = self.position.y,
                    relief_x = relief.x,
                    relief_y = relief.y,
                    "crash, moved to nearest cell"
                );
                self.previous = None;
                self.position = relief;
                self.velocity = Velocity::ZERO;
            }
            CrashPolicy::Restart => {
                trace!(
                    x = self.position.x,
                    y = self.position.y,
                    "crash, restarting"
                );
                self.reset();
            }
        }
    }

    pub fn track(&self) -> &'a Racetrack {
        self.track
    }

    pub fn crash_policy(&self) -> CrashPolicy {
        self.crash_policy
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Position before the last step; `None` after a reset, placement or crash relief.
    pub fn previous_position(&self) -> Option<Coord> {
        self.previous
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn observe(&self) -> Observation {
        Observation {
            position: self.position,
            velocity: self.velocity,
            finished: self.finished,
        }
    }
}
