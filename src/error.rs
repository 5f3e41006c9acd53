use crate::location::Location;

/// Failures raised by [CostGrid](crate::CostGrid) construction and cell access. Both variants
/// indicate a caller bug; a search that finds no path is reported as [None], not as an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("width and height must be positive values; got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("location {location} is outside the {width}x{height} grid")]
    OutOfBounds {
        location: Location,
        width: usize,
        height: usize,
    },
}
