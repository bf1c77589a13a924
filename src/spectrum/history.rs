use log::debug;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::{Operation, SpectrumError};
use crate::array::TaggedArray;
use crate::processing::Processor;

/// Name of the identity step every history starts with
pub const ORIGINAL_STEP: &str = "original";

/// A unary transformation replayed over tagged data
pub trait Transform: Send + Sync {
    /// Produce the transformed data; `data` is never modified
    fn apply(&self, data: &TaggedArray, processor: &dyn Processor) -> Result<TaggedArray, SpectrumError>;

    /// Short human-readable description
    fn describe(&self) -> String;

    /// The built-in operation behind this transform, if any
    fn operation(&self) -> Option<&Operation> {
        None
    }
}

/// [`Transform`] wrapping a closure
pub struct FnTransform<F> {
    label: String,
    f: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&TaggedArray) -> Result<TaggedArray, SpectrumError> + Send + Sync,
{
    /// Wrap `f`, described as `label`
    pub fn new(label: impl Into<String>, f: F) -> Self {
        Self {
            label: label.into(),
            f,
        }
    }
}

impl<F> Transform for FnTransform<F>
where
    F: Fn(&TaggedArray) -> Result<TaggedArray, SpectrumError> + Send + Sync,
{
    fn apply(&self, data: &TaggedArray, _processor: &dyn Processor) -> Result<TaggedArray, SpectrumError> {
        (self.f)(data)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// One named entry of a [`History`]
#[derive(Clone)]
pub struct Step {
    name: String,
    transform: Arc<dyn Transform>,
}

impl Step {
    /// Pair a name with a shared transform
    pub fn new(name: impl Into<String>, transform: Arc<dyn Transform>) -> Self {
        Self {
            name: name.into(),
            transform,
        }
    }

    /// Step name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The transformation
    pub fn transform(&self) -> &dyn Transform {
        self.transform.as_ref()
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("transform", &self.transform.describe())
            .finish()
    }
}

/// Serializable description of a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    /// Step name
    pub name: String,
    /// Transform description
    pub transform: String,
}

/// Ordered, named sequence of steps replayed over an immutable original.
///
/// A history is never modified: every edit returns a new version and leaves
/// the receiver (and every spectrum holding it) untouched. Steps are shared
/// between versions.
#[derive(Debug, Clone)]
pub struct History {
    steps: Arc<[Step]>,
    version: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// History holding only the identity step [`ORIGINAL_STEP`]
    pub fn new() -> Self {
        let identity: Arc<dyn Transform> = Arc::new(Operation::Identity);
        Self {
            steps: Arc::from(vec![Step::new(ORIGINAL_STEP, identity)]),
            version: 0,
        }
    }

    fn derive(&self, steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::from(steps),
            version: self.version + 1,
        }
    }

    /// Number of steps, including the identity step
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the history has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Edit count since the history was created
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Steps in replay order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step names in replay order
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Position of a step
    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name == name)
    }

    /// Whether a step exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Step by name
    pub fn get(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// New version with `step` inserted at `index` (clamped to the length)
    pub fn inserted(&self, index: usize, step: Step) -> Result<Self, SpectrumError> {
        if self.contains(&step.name) {
            return Err(SpectrumError::DuplicateStep(step.name));
        }
        let index = index.min(self.steps.len());
        let mut steps = self.steps.to_vec();
        steps.insert(index, step);
        Ok(self.derive(steps))
    }

    /// New version with `step` at the tail
    pub fn appended(&self, step: Step) -> Result<Self, SpectrumError> {
        self.inserted(self.steps.len(), step)
    }

    /// New version with the transform at `index` swapped, position kept
    pub fn replaced(&self, index: usize, transform: Arc<dyn Transform>) -> Result<Self, SpectrumError> {
        let mut steps = self.steps.to_vec();
        let slot = steps.get_mut(index).ok_or_else(|| {
            SpectrumError::NotFound(format!("step index {index}"))
        })?;
        slot.transform = transform;
        Ok(self.derive(steps))
    }

    /// Replay the first `upto` steps (clamped) over `original`
    pub fn replay(
        &self,
        original: &TaggedArray,
        processor: &dyn Processor,
        upto: usize,
    ) -> Result<TaggedArray, SpectrumError> {
        let upto = upto.min(self.steps.len());
        let mut data = original.clone();
        for step in &self.steps[..upto] {
            debug!("Replaying step '{}': {}", step.name, step.transform.describe());
            data = step.transform.apply(&data, processor)?;
        }
        Ok(data)
    }

    /// Serializable summary of every step
    pub fn describe(&self) -> Vec<StepSummary> {
        self.steps
            .iter()
            .map(|s| StepSummary {
                name: s.name.clone(),
                transform: s.transform.describe(),
            })
            .collect()
    }

    /// Step summaries as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.describe())
    }
}
