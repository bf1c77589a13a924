use crate::processing::ProcessingError;
use crate::udic::UdicError;

/// Errors raised when building or reshaping a tagged array
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// Buffer rank differs from the descriptor's `ndim`
    #[error("array has rank {array} but descriptor has {descriptor} dimensions")]
    RankMismatch {
        /// Rank of the buffer
        array: usize,
        /// Dimensions in the descriptor
        descriptor: usize,
    },

    /// Buffer extents differ from the descriptor sizes
    #[error("array shape {array:?} does not match descriptor sizes {descriptor:?}")]
    ShapeMismatch {
        /// Shape of the buffer
        array: Vec<usize>,
        /// Sizes in the descriptor
        descriptor: Vec<usize>,
    },

    /// Buffer storage (real/complex) does not fit the requested layout change
    #[error("layout mismatch: {0}")]
    LayoutMismatch(String),

    /// Operation not defined for this rank
    #[error("{operation} is not defined for rank {rank}")]
    UnsupportedRank {
        /// Name of the operation
        operation: &'static str,
        /// Rank of the array
        rank: usize,
    },

    /// Descriptor invariant broken
    #[error("descriptor error: {0}")]
    UdicError(#[from] UdicError),

    /// Numeric primitive failed
    #[error("processing error: {0}")]
    ProcessingError(#[from] ProcessingError),

    /// Array construction error
    #[error("array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),
}
