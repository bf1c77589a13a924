//! # nmrpro - NMR Spectra with a Replayable Processing History
//!
//! `nmrpro` models an N-dimensional NMR spectrum as an immutable original
//! sample buffer plus an ordered, named chain of processing steps. The data
//! you see is always the original replayed through that chain, so any step
//! can be inspected, replaced or moved without losing earlier state.
//!
//! ## Key Features
//!
//! - **Immutable, versioned history**: every `apply` returns a new
//!   [`Spectrum`](spectrum::Spectrum) with a new history version; the
//!   receiver and anything derived from it stay valid.
//!
//! - **Hypercomplex-aware layout**: transposes and real-part extraction
//!   respect interleaved real/imaginary storage in 2D data.
//!
//! - **Domain views**: `time_domain()` / `freq_domain()` are cached views that
//!   never touch the history.
//!
//! - **Serializable processing recipes**: built-in [`Operation`](spectrum::Operation)s
//!   load from TOML and describe themselves as JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use nmrpro::prelude::*;
//!
//! // 8-point complex FID: sw = 1000 Hz, obs = 500 MHz, carrier 0 Hz
//! let fid: Vec<Complex32> = (0..8)
//!     .map(|k| Complex32::from_polar(0.9f32.powi(k), 0.5 * k as f32))
//!     .collect();
//! let samples = Samples::complex_from_vec(&[8], fid)?;
//! let udic = Udic::new(vec![DimensionInfo::new(8, true, Domain::Time, 1000.0, 500.0, 0.0)])?;
//! let spectrum = Spectrum::new(TaggedArray::new(samples, udic)?, None)?;
//!
//! let processed = spectrum
//!     .apply(Operation::ZeroFill { size: 16 }, "zf")?
//!     .apply(Operation::ForwardFourier, "ft")?;
//! assert_eq!(processed.history().names(), vec!["original", "zf", "ft"]);
//! assert_eq!(processed.shape(), &[16]);
//!
//! // the receiver is untouched
//! assert_eq!(spectrum.history().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`udic`]: per-dimension acquisition metadata
//! - [`units`]: index to ppm/Hz/time conversion
//! - [`processing`]: the numeric backend trait and its `rustfft` implementation
//! - [`array`]: sample buffers bound to a descriptor, transposes
//! - [`spectrum`]: spectra, history, operations and recipes
//! - [`dataset`]: ordered collections of spectra
//! - [`ingest`]: Bruker and NMRPipe construction adapters

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod array;
pub mod dataset;
pub mod ingest;
pub mod params;
pub mod processing;
pub mod spectrum;
pub mod udic;
pub mod units;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::array::{ArrayError, Samples, TaggedArray, TransposeMode};
    pub use crate::dataset::{DatasetError, NmrDataset};
    pub use crate::ingest::{
        BrukerOptions, BrukerReader, FileFormat, IngestError, Ingestor, ParameterDictionary,
        PipeReader, RawData,
    };
    pub use crate::processing::{FftProcessor, ProcessingError, Processor};
    pub use crate::spectrum::{
        FnTransform, History, Operation, Recipe, RecipeError, Spectrum, SpectrumError, SpectrumKind,
        Transform,
    };
    pub use crate::udic::{DimensionInfo, Domain, OriginalFormat, Udic, UdicError};
    pub use crate::units::{CoordinateSystem, Unit, UnitConversion, UnitError};
    pub use num_complex::Complex32;
}
