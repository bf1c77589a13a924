//! # Spectrum
//!
//! A [`Spectrum`] owns an immutable original [`TaggedArray`], a
//! [`CoordinateSystem`] and a named [`History`] of transformations. Its
//! visible data is always the result of replaying the history over the
//! original, followed by the spectrum's view layer.
//!
//! The view layer holds the read-only views taken with
//! [`Spectrum::time_domain`], [`Spectrum::freq_domain`],
//! [`Spectrum::transpose`] and [`Spectrum::real_part`]. Views are not history
//! steps, but a view is re-run on every recompute, so edits made through a
//! view come back through the same view.
//!
//! Every history operation returns a **new** spectrum holding a new history
//! version; the receiver is never modified. The original data, coordinate
//! system and numeric backend are shared between derived spectra.
//!
//! ```no_run
//! use nmrpro::prelude::*;
//!
//! # fn demo(data: TaggedArray) -> Result<(), SpectrumError> {
//! let spectrum = Spectrum::new(data, None)?;
//! let processed = spectrum
//!     .apply(Operation::ExponentialApodization { line_broadening: 1.0 }, "apodize")?
//!     .apply(Operation::ForwardFourier, "ft")?;
//! let _before_ft = processed.data_at_step("ft", false)?;
//! # Ok(())
//! # }
//! ```

use log::{debug, warn};
use std::sync::{Arc, OnceLock};

use crate::array::{TaggedArray, TransposeMode};
use crate::processing::{FftProcessor, Processor};
use crate::udic::{Domain, Udic};
use crate::units::CoordinateSystem;

mod error;
mod history;
mod operation;
mod recipe;


pub use error::SpectrumError;
pub use history::{FnTransform, History, Step, StepSummary, Transform, ORIGINAL_STEP};
pub use operation::Operation;
pub use recipe::{Recipe, RecipeError, RecipeStep};

/// Rank specialization of a spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumKind {
    /// One dimension
    OneD,
    /// Two dimensions
    TwoD,
    /// Three or more dimensions
    MultiD(usize),
}

impl SpectrumKind {
    /// Kind for an array of rank `ndim`
    pub fn from_rank(ndim: usize) -> Self {
        match ndim {
            0 | 1 => SpectrumKind::OneD,
            2 => SpectrumKind::TwoD,
            n => SpectrumKind::MultiD(n),
        }
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        match self {
            SpectrumKind::OneD => 1,
            SpectrumKind::TwoD => 2,
            SpectrumKind::MultiD(n) => *n,
        }
    }

    /// Whether transposes may need hypercomplex handling
    pub fn supports_hypercomplex(&self) -> bool {
        self.ndim() >= 2
    }
}

/// NMR spectrum with a replayable processing history
#[derive(Debug, Clone)]
pub struct Spectrum {
    original: Arc<TaggedArray>,
    history: History,
    coordinates: Arc<CoordinateSystem>,
    processor: Arc<dyn Processor>,
    view: Arc<[Operation]>,
    data: TaggedArray,
    kind: SpectrumKind,
    time_view: OnceLock<Box<Spectrum>>,
    freq_view: OnceLock<Box<Spectrum>>,
}

impl Spectrum {
    /// Create a spectrum whose history is only the identity step.
    ///
    /// When `coordinates` is `None` the coordinate system is built from the
    /// descriptor's own `(size, complex, sw, obs, car)` fields. The
    /// [`FftProcessor`] backend is used until [`Spectrum::with_processor`].
    pub fn new(data: TaggedArray, coordinates: Option<CoordinateSystem>) -> Result<Self, SpectrumError> {
        let coordinates = match coordinates {
            Some(c) => c,
            None => CoordinateSystem::from_udic(data.udic())?,
        };
        if coordinates.ndim() != data.ndim() {
            return Err(SpectrumError::CoordinateMismatch {
                coordinates: coordinates.ndim(),
                ndim: data.ndim(),
            });
        }
        let kind = SpectrumKind::from_rank(data.ndim());
        debug!("Creating {kind:?} spectrum with shape {:?}", data.shape());

        Ok(Self {
            original: Arc::new(data.clone()),
            history: History::new(),
            coordinates: Arc::new(coordinates),
            processor: Arc::new(FftProcessor::new()),
            view: Arc::from(Vec::new()),
            data,
            kind,
            time_view: OnceLock::new(),
            freq_view: OnceLock::new(),
        })
    }

    /// Use another numeric backend and recompute the visible data with it
    pub fn with_processor(&self, processor: Arc<dyn Processor>) -> Result<Self, SpectrumError> {
        let data = self.materialize(&self.history, processor.as_ref())?;
        let mut spectrum = self.derive(data, self.history.clone());
        spectrum.processor = processor;
        Ok(spectrum)
    }

    /// Same spectrum with a caller-supplied coordinate system
    pub fn with_coordinate_system(&self, coordinates: CoordinateSystem) -> Result<Self, SpectrumError> {
        if coordinates.ndim() != self.data.ndim() {
            return Err(SpectrumError::CoordinateMismatch {
                coordinates: coordinates.ndim(),
                ndim: self.data.ndim(),
            });
        }
        let mut spectrum = self.derive(self.data.clone(), self.history.clone());
        spectrum.coordinates = Arc::new(coordinates);
        Ok(spectrum)
    }

    fn derive(&self, data: TaggedArray, history: History) -> Self {
        Self {
            original: Arc::clone(&self.original),
            history,
            coordinates: Arc::clone(&self.coordinates),
            processor: Arc::clone(&self.processor),
            view: Arc::clone(&self.view),
            kind: SpectrumKind::from_rank(data.ndim()),
            data,
            time_view: OnceLock::new(),
            freq_view: OnceLock::new(),
        }
    }

    /// A derived view: `operation` is pushed onto the view layer and `data`
    /// must be its result over the current visible data
    fn derive_view(&self, data: TaggedArray, operation: Operation) -> Self {
        let mut spectrum = self.derive(data, self.history.clone());
        spectrum.view = self.view.iter().cloned().chain([operation]).collect();
        spectrum
    }

    /// Replay `history` over the original, then the view layer on top
    fn materialize(&self, history: &History, processor: &dyn Processor) -> Result<TaggedArray, SpectrumError> {
        let mut data = history.replay(&self.original, processor, history.len())?;
        for operation in self.view.iter() {
            debug!("Re-applying view {operation}");
            data = operation.run(&data, processor)?;
        }
        Ok(data)
    }

    fn rebuild(&self, history: History) -> Result<Self, SpectrumError> {
        let data = self.materialize(&history, self.processor.as_ref())?;
        if data.shape() != self.data.shape() || data.nbytes() != self.data.nbytes() {
            debug!(
                "Materialized shape changed from {:?} to {:?}",
                self.data.shape(),
                data.shape()
            );
        }
        Ok(self.derive(data, history))
    }

    // ----- history ----------------------------------------------------------
    //
    // Edits on a view land in the history, below the view layer, and the
    // result is presented through the same view.

    /// Append `transform` as step `name` and recompute
    pub fn apply<T: Transform + 'static>(&self, transform: T, name: &str) -> Result<Self, SpectrumError> {
        self.apply_shared(Arc::new(transform), name)
    }

    /// Append a shared transform as step `name` and recompute
    pub fn apply_shared(&self, transform: Arc<dyn Transform>, name: &str) -> Result<Self, SpectrumError> {
        let history = self.history.appended(Step::new(name, transform))?;
        self.rebuild(history)
    }

    /// Append a closure as step `name` and recompute
    pub fn apply_fn<F>(&self, f: F, name: &str) -> Result<Self, SpectrumError>
    where
        F: Fn(&TaggedArray) -> Result<TaggedArray, SpectrumError> + Send + Sync + 'static,
    {
        self.apply(FnTransform::new(name, f), name)
    }

    /// Insert `transform` at position `index` (clamped to the history length)
    pub fn apply_at_index<T: Transform + 'static>(
        &self,
        transform: T,
        name: &str,
        index: usize,
    ) -> Result<Self, SpectrumError> {
        let history = self
            .history
            .inserted(index, Step::new(name, Arc::new(transform)))?;
        self.rebuild(history)
    }

    /// Insert `transform` right after step `after`; appends when `after` is absent
    pub fn apply_at<T: Transform + 'static>(&self, transform: T, name: &str, after: &str) -> Result<Self, SpectrumError> {
        match self.history.position(after) {
            Some(index) => self.apply_at_index(transform, name, index + 1),
            None => {
                warn!("No step named '{after}', appending '{name}' at the end");
                self.apply(transform, name)
            }
        }
    }

    /// Insert `transform` right before step `before`; appends when `before` is absent
    pub fn apply_before<T: Transform + 'static>(
        &self,
        transform: T,
        name: &str,
        before: &str,
    ) -> Result<Self, SpectrumError> {
        match self.history.position(before) {
            Some(index) => self.apply_at_index(transform, name, index),
            None => {
                warn!("No step named '{before}', appending '{name}' at the end");
                self.apply(transform, name)
            }
        }
    }

    /// Replace the transform of step `name` in place, or append it
    pub fn apply_at_name<T: Transform + 'static>(&self, transform: T, name: &str) -> Result<Self, SpectrumError> {
        match self.history.position(name) {
            Some(index) => {
                let history = self.history.replaced(index, Arc::new(transform))?;
                self.rebuild(history)
            }
            None => self.apply(transform, name),
        }
    }

    /// Replay the whole history over the original, then the view layer.
    ///
    /// On failure `self` keeps its materialized data.
    pub fn recompute(&self) -> Result<Self, SpectrumError> {
        self.rebuild(self.history.clone())
    }

    /// Data after replaying the history up to step `name`. The view layer is
    /// not applied.
    pub fn data_at_step(&self, name: &str, include_step: bool) -> Result<TaggedArray, SpectrumError> {
        let index = self
            .history
            .position(name)
            .ok_or_else(|| SpectrumError::NotFound(name.to_string()))?;
        let upto = if include_step { index + 1 } else { index };
        self.history
            .replay(&self.original, self.processor.as_ref(), upto)
    }

    // ----- views ------------------------------------------------------------

    /// This spectrum with its direct dimension in the time domain.
    ///
    /// Only the domain of the **last** dimension is checked and transformed;
    /// indirect dimensions keep their domain. Returns `self` when the last
    /// dimension is already in the time domain; otherwise the inverse
    /// transform is run once and the resulting view is cached. Views are not
    /// recorded in the history but stay in the view layer, so `recompute`
    /// and further edits on the view keep it in the time domain.
    pub fn time_domain(&self) -> Result<&Spectrum, SpectrumError> {
        self.domain_view(Domain::Time)
    }

    /// This spectrum with its direct dimension in the frequency domain.
    ///
    /// As with [`Spectrum::time_domain`], only the last dimension is checked
    /// and transformed.
    pub fn freq_domain(&self) -> Result<&Spectrum, SpectrumError> {
        self.domain_view(Domain::Frequency)
    }

    fn domain_view(&self, domain: Domain) -> Result<&Spectrum, SpectrumError> {
        if self.data.direct_domain() == domain {
            return Ok(self);
        }
        let (cache, operation) = match domain {
            Domain::Time => (&self.time_view, Operation::InverseFourier),
            Domain::Frequency => (&self.freq_view, Operation::ForwardFourier),
        };
        if let Some(view) = cache.get() {
            return Ok(&**view);
        }
        debug!("Computing {domain:?} domain view");
        let data = operation.run(&self.data, self.processor.as_ref())?;
        let view = Box::new(self.derive_view(data, operation));
        Ok(&**cache.get_or_init(|| view))
    }

    /// Per dimension, whether it is in the time domain
    pub fn is_time_domain(&self) -> Vec<bool> {
        self.data.is_time_domain()
    }

    /// Transposed view of the visible data, not recorded in the history but
    /// kept in the view layer.
    ///
    /// The coordinate system is kept as is; reorder it with
    /// [`CoordinateSystem::swapped`] and [`Spectrum::with_coordinate_system`]
    /// when the dimension order matters.
    pub fn transpose(&self, mode: TransposeMode) -> Result<Self, SpectrumError> {
        if !self.kind.supports_hypercomplex() {
            return Ok(self.clone());
        }
        let mode = match self.kind {
            // interleaving never touches the leading axes above rank 2
            SpectrumKind::MultiD(_) => TransposeMode::NoHyper,
            _ => mode,
        };
        let operation = Operation::Transpose { mode };
        let data = operation.run(&self.data, self.processor.as_ref())?;
        Ok(self.derive_view(data, operation))
    }

    /// Real-part view of the visible data (rank ≤ 2), kept in the view layer
    pub fn real_part(&self) -> Result<Self, SpectrumError> {
        let data = Operation::RealPart.run(&self.data, self.processor.as_ref())?;
        Ok(self.derive_view(data, Operation::RealPart))
    }

    /// Operations stacked on top of the history by the view methods, in order
    pub fn view_layer(&self) -> &[Operation] {
        &self.view
    }

    /// Whether any view operation sits on top of the history
    pub fn is_view(&self) -> bool {
        !self.view.is_empty()
    }

    /// The same history with the view layer dropped
    pub fn without_view(&self) -> Result<Self, SpectrumError> {
        let mut base = self.derive(self.data.clone(), self.history.clone());
        base.view = Arc::from(Vec::new());
        base.recompute()
    }

    // ----- accessors --------------------------------------------------------

    /// Visible data
    pub fn data(&self) -> &TaggedArray {
        &self.data
    }

    /// Descriptor of the visible data
    pub fn udic(&self) -> &Udic {
        self.data.udic()
    }

    /// The untouched ingested data
    pub fn original_data(&self) -> &TaggedArray {
        &self.original
    }

    /// Coordinate system
    pub fn coordinates(&self) -> &CoordinateSystem {
        &self.coordinates
    }

    /// Processing history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Numeric backend
    pub fn processor(&self) -> &dyn Processor {
        self.processor.as_ref()
    }

    /// Rank specialization
    pub fn kind(&self) -> SpectrumKind {
        self.kind
    }

    /// Rank of the visible data
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Shape of the visible data
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Whether two spectra share the same original data
    pub fn shares_original(&self, other: &Spectrum) -> bool {
        Arc::ptr_eq(&self.original, &other.original)
    }
}
