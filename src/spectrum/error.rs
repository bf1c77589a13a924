use crate::array::ArrayError;
use crate::processing::ProcessingError;
use crate::udic::UdicError;
use crate::units::UnitError;

/// Errors that can occur while building or processing a spectrum
#[derive(Debug, thiserror::Error)]
pub enum SpectrumError {
    /// No history step with this name
    #[error("no history step named '{0}'")]
    NotFound(String),

    /// History step names are unique
    #[error("history already has a step named '{0}'")]
    DuplicateStep(String),

    /// Coordinate system does not cover the data's dimensions
    #[error("coordinate system has {coordinates} dimensions but the data has {ndim}")]
    CoordinateMismatch {
        /// Dimensions in the coordinate system
        coordinates: usize,
        /// Rank of the data
        ndim: usize,
    },

    /// Failure raised by a user-supplied transformation
    #[error("transform '{step}' failed: {message}")]
    TransformFailed {
        /// Step that failed
        step: String,
        /// Error reported by the transform
        message: String,
    },

    /// Tagged array error
    #[error("array error: {0}")]
    ArrayError(#[from] ArrayError),

    /// Numeric primitive failed
    #[error("processing error: {0}")]
    ProcessingError(#[from] ProcessingError),

    /// Descriptor invariant broken
    #[error("descriptor error: {0}")]
    UdicError(#[from] UdicError),

    /// Coordinate system construction failed
    #[error("unit conversion error: {0}")]
    UnitError(#[from] UnitError),
}
