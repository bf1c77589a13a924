use std::path::PathBuf;

use super::FileFormat;
use crate::array::ArrayError;
use crate::processing::ProcessingError;
use crate::spectrum::SpectrumError;
use crate::udic::UdicError;
use crate::units::UnitError;

/// Errors that can occur while building a spectrum from instrument files
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error reading the source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by a file reader
    #[error("reader error: {0}")]
    Reader(String),

    /// No reader registered for the format
    #[error("no reader configured for {0} data")]
    NoReader(FileFormat),

    /// Format tag not recognised
    #[error("unknown file format '{0}'")]
    UnknownFormat(String),

    /// Required acquisition parameter absent from the dictionary
    #[error("missing acquisition parameter: {0}")]
    MissingParameter(String),

    /// Processed data was required but the reader found none
    #[error("no processed data found for {}", .0.display())]
    MissingProcessedData(PathBuf),

    /// More dimensions than the format describes
    #[error("{format} data cannot have {ndim} dimensions")]
    UnsupportedDimensions {
        /// Source format
        format: FileFormat,
        /// Rank of the data
        ndim: usize,
    },

    /// Tagged array error
    #[error("array error: {0}")]
    ArrayError(#[from] ArrayError),

    /// Numeric primitive failed
    #[error("processing error: {0}")]
    ProcessingError(#[from] ProcessingError),

    /// Spectrum construction failed
    #[error("spectrum error: {0}")]
    SpectrumError(#[from] SpectrumError),

    /// Descriptor invariant broken
    #[error("descriptor error: {0}")]
    UdicError(#[from] UdicError),

    /// Coordinate system construction failed
    #[error("unit conversion error: {0}")]
    UnitError(#[from] UnitError),
}
