use serde::{Deserialize, Serialize};

use crate::{Coord, EnvError};

/// Which coordinate the crossing test watches.
///
/// Endpoints sharing an `x` make a `Horizontal` line: the car crosses it by
/// changing `x`, and the span is measured along `y`. Otherwise the line is
/// `Vertical`: crossing is tested along `y` and the span along `x`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Finish segment described by its two farthest-apart cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishLine {
    first: Coord,
    second: Coord,
    orientation: Orientation,
}

impl FinishLine {
    /// Build a line from two endpoints and infer its orientation.
    ///
    /// The endpoints must share a row or a column; the crossing test reads the
    /// line position from `first`. `TrackMap::parse` rejects finish regions
    /// that are not straight.
    pub fn new(first: Coord, second: Coord) -> Self {
        let orientation = if first.x == second.x {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        FinishLine {
            first,
            second,
            orientation,
        }
    }

    /// Pick the pair of finish cells with maximum separation.
    /// Pairs are visited in combination order and the first strictly farther pair wins.
    pub fn from_cells(cells: &[Coord]) -> Result<Self, EnvError> {
        if cells.len() < 2 {
            return Err(EnvError::TooFewFinishCells { count: cells.len() });
        }

        let mut best = (cells[0], cells[1]);
        let mut best_distance = -1_i64;

        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                let distance = a.squared_distance(*b);
                if distance > best_distance {
                    best = (*a, *b);
                    best_distance = distance;
                }
            }
        }

        Ok(FinishLine::new(best.0, best.1))
    }

    pub fn endpoints(&self) -> (Coord, Coord) {
        (self.first, self.second)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether moving from `old` to `new` crosses or touches the line within its span.
    pub fn crossed(&self, old: Coord, new: Coord) -> bool {
        let (before, after, span, old_along, new_along) = match self.orientation {
            Orientation::Vertical => (
                self.first.y - old.y,
                self.first.y - new.y,
                self.first.x.min(self.second.x)..=self.first.x.max(self.second.x),
                old.x,
                new.x,
            ),
            Orientation::Horizontal => (
                self.first.x - old.x,
                self.first.x - new.x,
                self.first.y.min(self.second.y)..=self.first.y.max(self.second.y),
                old.y,
                new.y,
            ),
        };

        if i64::from(before) * i64::from(after) > 0 {
            return false;
        }

        span.contains(&old_along) || span.contains(&new_along)
    }
}
