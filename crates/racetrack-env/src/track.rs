use std::{fs, path::Path, str::FromStr};

use rand::Rng;

use crate::{Coord, EnvError, FinishLine};

/// Classification of a single grid cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    Start,
    Finish,
    Track,
    Wall,
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            'S' => Some(Cell::Start),
            'F' => Some(Cell::Finish),
            '.' => Some(Cell::Track),
            '#' => Some(Cell::Wall),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::Start => 'S',
            Cell::Finish => 'F',
            Cell::Track => '.',
            Cell::Wall => '#',
        }
    }

    /// Cells a crashed car may be placed on.
    pub fn is_relief(&self) -> bool {
        matches!(self, Cell::Start | Cell::Track)
    }
}

/// Immutable racetrack grid with precomputed coordinate sets.
///
/// Coordinate sets are stored in row-major order (`y` outer, `x` inner),
/// which is the "first encountered" order for every tie-break on the map.
#[derive(Debug, Clone)]
pub struct TrackMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Vec<Coord>,
    finish: Vec<Coord>,
    track: Vec<Coord>,
    wall: Vec<Coord>,
    finish_line: FinishLine,
}

impl TrackMap {
    /// Parse the textual track format: a `<width>,<height>` header followed by
    /// exactly `height` rows of `width` symbols from `{S, F, ., #}`.
    pub fn parse(text: &str) -> Result<Self, EnvError> {
        let mut lines = text.lines();
        let header = lines
            .by_ref()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(EnvError::MissingHeader)?;
        let (width, height) = parse_header(header)?;

        let mut rows: Vec<&str> = lines.map(str::trim).collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        if rows.len() != height {
            return Err(EnvError::RowCountMismatch {
                declared: height,
                actual: rows.len(),
            });
        }

        let mut cells = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(EnvError::RowWidthMismatch {
                    row: y,
                    declared: width,
                    actual,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let cell =
                    Cell::from_symbol(symbol).ok_or(EnvError::InvalidSymbol { x, y, symbol })?;
                cells.push(cell);
            }
        }

        let collect = |kind: Cell| -> Vec<Coord> {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| **cell == kind)
                .map(|(idx, _)| Coord::new((idx % width) as i32, (idx / width) as i32))
                .collect()
        };
        let start = collect(Cell::Start);
        let finish = collect(Cell::Finish);
        let track = collect(Cell::Track);
        let wall = collect(Cell::Wall);

        if start.is_empty() {
            return Err(EnvError::MissingStart);
        }
        let same_column = finish.iter().all(|cell| cell.x == finish[0].x);
        let same_row = finish.iter().all(|cell| cell.y == finish[0].y);
        if !finish.is_empty() && !same_column && !same_row {
            return Err(EnvError::FinishNotStraight);
        }
        let finish_line = FinishLine::from_cells(&finish)?;

        Ok(TrackMap {
            width,
            height,
            cells,
            start,
            finish,
            track,
            wall,
            finish_line,
        })
    }

    /// Read and parse a track file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `coord` lies on the grid. Upper bounds are exclusive.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Cell classification, or `None` off the grid.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells
            .get(coord.y as usize * self.width + coord.x as usize)
            .copied()
    }

    /// A position the car cannot occupy: a wall cell or anywhere off the grid.
    pub fn is_crash(&self, coord: Coord) -> bool {
        match self.cell(coord) {
            Some(cell) => cell == Cell::Wall,
            None => true,
        }
    }

    pub fn start_cells(&self) -> &[Coord] {
        &self.start
    }

    pub fn finish_cells(&self) -> &[Coord] {
        &self.finish
    }

    pub fn track_cells(&self) -> &[Coord] {
        &self.track
    }

    pub fn wall_cells(&self) -> &[Coord] {
        &self.wall
    }

    pub fn finish_line(&self) -> &FinishLine {
        &self.finish_line
    }

    /// Uniformly random start cell.
    pub fn random_start<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        // Parsing rejects maps without start cells.
        self.start[rng.gen_range(0..self.start.len())]
    }

    /// Track cells followed by start cells; the candidate order for crash relief.
    pub fn relief_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.track.iter().chain(self.start.iter()).copied()
    }

    /// Closest relief cell by squared distance; ties keep the first candidate.
    pub fn nearest_relief(&self, coord: Coord) -> Coord {
        let mut best = self.start[0];
        let mut best_distance = i64::MAX;
        for candidate in self.relief_cells() {
            let distance = candidate.squared_distance(coord);
            if distance < best_distance {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }
}

impl FromStr for TrackMap {
    type Err = EnvError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        TrackMap::parse(text)
    }
}

fn parse_header(header: &str) -> Result<(usize, usize), EnvError> {
    let invalid = || EnvError::InvalidHeader {
        header: header.to_string(),
    };

    let (width, height) = header.split_once(',').ok_or_else(invalid)?;
    let width = width.trim().parse::<usize>().map_err(|_| invalid())?;
    let height = height.trim().parse::<usize>().map_err(|_| invalid())?;

    // Coordinates are `i32` and the cell grid is one flat vector.
    let limit = i32::MAX as usize;
    if width > limit || height > limit || width.checked_mul(height).is_none() {
        return Err(EnvError::GridTooLarge { width, height });
    }
    Ok((width, height))
}
