use thiserror::Error;

pub type Result<T> = std::result::Result<T, SortingHatError>;

#[derive(Debug, Error)]
pub enum SortingHatError {
    // A per-class parameter list that doesn't line up with the labels
    #[error("{parameter} has {actual} entries but there are {expected} labels")]
    LengthMismatch {
        parameter: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid normal distribution for class {label_index}: mean {mean}, std {std}")]
    InvalidDistribution {
        label_index: usize,
        mean: f64,
        std: f64,
    },

    // Only raised by the checked rescale
    #[error("slice {index} along axis {axis} has zero range")]
    ZeroRange { axis: usize, index: usize },

    #[error("axis must be 0 or 1, got {0}")]
    InvalidAxis(usize),

    #[error("row {row} has {actual} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("could not parse {value:?} at row {row}, column {column}")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
