/// Errors raised by the numeric primitives
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// Interleaved data needs an even number of values on the last axis
    #[error("interleaved data needs an even last axis, got {0} points")]
    OddInterleave(usize),

    /// The primitive is only defined for a particular rank
    #[error("operation requires {expected}, got rank {actual}")]
    UnsupportedRank {
        /// Accepted ranks, human readable
        expected: &'static str,
        /// Rank of the offending array
        actual: usize,
    },

    /// Digital filter removal could not find its parameters
    #[error("missing digital filter parameter: {0}")]
    MissingFilterParameter(String),

    /// Parameter outside its accepted range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Array construction error
    #[error("array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    /// Failure reported by an external numeric backend
    #[error("numeric backend failure: {0}")]
    Backend(String),
}
