use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for track loading, environment configuration, and car construction.
pub enum EnvError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("track file is missing the '<width>,<height>' header line")]
    MissingHeader,

    #[error("invalid track header '{header}', expected '<width>,<height>'")]
    InvalidHeader { header: String },

    #[error("track dimensions {width}x{height} are too large")]
    GridTooLarge { width: usize, height: usize },

    #[error("track declares {declared} rows but contains {actual}")]
    RowCountMismatch { declared: usize, actual: usize },

    #[error("track row {row} has {actual} cells but the declared width is {declared}")]
    RowWidthMismatch {
        row: usize,
        declared: usize,
        actual: usize,
    },

    #[error("unknown track symbol '{symbol}' at ({x}, {y})")]
    InvalidSymbol { x: usize, y: usize, symbol: char },

    #[error("finish line needs at least two cells, found {count}")]
    TooFewFinishCells { count: usize },

    #[error("finish cells must lie on one row or one column")]
    FinishNotStraight,

    #[error("track has no start cells")]
    MissingStart,

    #[error("{name} range [{min}, {max}] is inverted")]
    InvalidRange {
        name: &'static str,
        min: i32,
        max: i32,
    },

    #[error("{name} range [{min}, {max}] must contain 0")]
    RangeMissingZero {
        name: &'static str,
        min: i32,
        max: i32,
    },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("step reward must be finite, got {value}")]
    InvalidReward { value: f64 },

    #[error("unknown crash policy '{value}', expected 'nearest' or 'restart'")]
    UnknownCrashPolicy { value: String },
}
