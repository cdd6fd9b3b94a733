mod actions;
mod car;
mod config;
mod error;
mod finish;
mod geometry;
mod racetrack;
mod range;
mod track;

pub use actions::{Action, ActionId, ActionSet};
pub use car::{Car, Observation};
pub use config::{CrashPolicy, EnvConfig};
pub use error::EnvError;
pub use finish::{FinishLine, Orientation};
pub use geometry::{Coord, Velocity};
pub use racetrack::{FINISH_REWARD, Racetrack};
pub use range::IntRange;
pub use track::{Cell, TrackMap};
