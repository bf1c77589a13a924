//! # Construction Adapters
//!
//! Build a [`Spectrum`] from instrument data. Binary parsing is done by
//! external readers that implement [`BrukerReader`] or [`PipeReader`]; each
//! returns the acquisition parameters as a [`ParameterDictionary`] plus the
//! raw samples. The adapters here turn that pair into a descriptor, a
//! coordinate system and an initial spectrum.
//!
//! ## Bruker
//!
//! - With [`BrukerOptions::read_pdata`], processed data found by the reader
//!   replaces the raw FID and every dimension is marked real and in the
//!   frequency domain.
//! - Otherwise, with [`BrukerOptions::remove_filter`], the digital filter
//!   group delay is removed.
//! - Parameter block `acqus` describes the last (direct) axis, `acqu2s` the
//!   one before it, and so on.
//!
//! ## NMRPipe
//!
//! Header keys `FDF{n}*` describe the axes; `FDDIMORDER[0]` names the last
//! axis. Data stored transposed (`FDTRANSPOSED = 1`) is transposed back first.

use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::array::{Samples, TaggedArray};
use crate::processing::{FftProcessor, Processor};
use crate::spectrum::Spectrum;
use crate::units::CoordinateSystem;

mod bruker;
mod error;
mod pipe;


pub use crate::params::ParameterDictionary;
pub use error::IngestError;

/// Supported instrument formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Bruker TopSpin directory
    Bruker,
    /// NMRPipe file
    Pipe,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Bruker => write!(f, "Bruker"),
            FileFormat::Pipe => write!(f, "Pipe"),
        }
    }
}

impl FromStr for FileFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bruker" => Ok(FileFormat::Bruker),
            "pipe" | "nmrpipe" => Ok(FileFormat::Pipe),
            _ => Err(IngestError::UnknownFormat(s.to_string())),
        }
    }
}

/// Parameters and samples as handed back by a file reader
#[derive(Debug, Clone, PartialEq)]
pub struct RawData {
    /// Acquisition parameters
    pub dic: ParameterDictionary,
    /// Raw samples
    pub data: Samples,
}

impl RawData {
    /// Pair a dictionary with samples
    pub fn new(dic: ParameterDictionary, data: Samples) -> Self {
        Self { dic, data }
    }
}

/// Reader for Bruker data directories
pub trait BrukerReader: Send + Sync {
    /// Read acquisition parameters and the raw FID
    fn read(&self, path: &Path) -> Result<RawData, IngestError>;

    /// Locate processed data for an `ndim`-dimensional experiment
    fn find_pdata(&self, path: &Path, ndim: usize) -> Option<PathBuf>;

    /// Read processed data
    fn read_pdata(&self, path: &Path) -> Result<RawData, IngestError>;
}

/// Reader for NMRPipe files
pub trait PipeReader: Send + Sync {
    /// Read the header dictionary and samples
    fn read(&self, path: &Path) -> Result<RawData, IngestError>;
}

/// Bruker adapter options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrukerOptions {
    /// Prefer processed data when the reader finds it
    pub read_pdata: bool,
    /// Remove the digital filter from raw FIDs
    pub remove_filter: bool,
    /// Fail instead of falling back to raw data when no processed data exists
    pub require_pdata: bool,
}

impl Default for BrukerOptions {
    fn default() -> Self {
        Self {
            read_pdata: true,
            remove_filter: true,
            require_pdata: false,
        }
    }
}

/// Spectrum factory dispatching on [`FileFormat`]
#[derive(Clone)]
pub struct Ingestor {
    bruker: Option<Arc<dyn BrukerReader>>,
    pipe: Option<Arc<dyn PipeReader>>,
    bruker_options: BrukerOptions,
    processor: Arc<dyn Processor>,
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ingestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ingestor")
            .field("bruker", &self.bruker.is_some())
            .field("pipe", &self.pipe.is_some())
            .field("bruker_options", &self.bruker_options)
            .field("processor", &self.processor)
            .finish()
    }
}

impl Ingestor {
    /// Ingestor without readers, using [`FftProcessor`]
    pub fn new() -> Self {
        Self {
            bruker: None,
            pipe: None,
            bruker_options: BrukerOptions::default(),
            processor: Arc::new(FftProcessor::new()),
        }
    }

    /// Register the Bruker reader
    pub fn with_bruker_reader(mut self, reader: Arc<dyn BrukerReader>) -> Self {
        self.bruker = Some(reader);
        self
    }

    /// Register the NMRPipe reader
    pub fn with_pipe_reader(mut self, reader: Arc<dyn PipeReader>) -> Self {
        self.pipe = Some(reader);
        self
    }

    /// Set the Bruker adapter options
    pub fn with_bruker_options(mut self, options: BrukerOptions) -> Self {
        self.bruker_options = options;
        self
    }

    /// Numeric backend for filter removal, transposes and the new spectra
    pub fn with_processor(mut self, processor: Arc<dyn Processor>) -> Self {
        self.processor = processor;
        self
    }

    /// Build a spectrum from `path`, dispatching on `format`
    pub fn load<P: AsRef<Path>>(&self, path: P, format: FileFormat) -> Result<Spectrum, IngestError> {
        match format {
            FileFormat::Bruker => self.load_bruker(path),
            FileFormat::Pipe => self.load_pipe(path),
        }
    }

    /// Build a spectrum from a Bruker directory
    pub fn load_bruker<P: AsRef<Path>>(&self, path: P) -> Result<Spectrum, IngestError> {
        let reader = self
            .bruker
            .as_deref()
            .ok_or(IngestError::NoReader(FileFormat::Bruker))?;
        let path = path.as_ref();
        info!("Reading Bruker data from {}", path.display());
        let (data, coordinates) =
            bruker::assemble(reader, path, &self.bruker_options, self.processor.as_ref())?;
        self.finish(data, coordinates)
    }

    /// Build a spectrum from an NMRPipe file
    pub fn load_pipe<P: AsRef<Path>>(&self, path: P) -> Result<Spectrum, IngestError> {
        let reader = self
            .pipe
            .as_deref()
            .ok_or(IngestError::NoReader(FileFormat::Pipe))?;
        let path = path.as_ref();
        info!("Reading NMRPipe data from {}", path.display());
        let (data, coordinates) = pipe::assemble(reader, path, self.processor.as_ref())?;
        self.finish(data, coordinates)
    }

    fn finish(&self, data: TaggedArray, coordinates: CoordinateSystem) -> Result<Spectrum, IngestError> {
        info!(
            "Loaded {}-dimensional spectrum with shape {:?}",
            data.ndim(),
            data.shape()
        );
        let spectrum = Spectrum::new(data, Some(coordinates))?;
        Ok(spectrum.with_processor(Arc::clone(&self.processor))?)
    }
}

impl Spectrum {
    /// Build a spectrum from an instrument file through `ingestor`
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        format: FileFormat,
        ingestor: &Ingestor,
    ) -> Result<Spectrum, IngestError> {
        ingestor.load(path, format)
    }
}
