use log::{debug, info};
use serde_json::Value;
use std::path::Path;

use super::{FileFormat, IngestError, ParameterDictionary, PipeReader};
use crate::array::{Samples, TaggedArray, TransposeMode};
use crate::processing::Processor;
use crate::udic::{DimensionInfo, Domain, OriginalFormat, Udic};
use crate::units::{CoordinateSystem, UnitConversion};

/// FDDIMORDER when the header does not carry one
const DEFAULT_DIM_ORDER: [f64; 4] = [2.0, 1.0, 3.0, 4.0];

fn dim_order(dic: &ParameterDictionary) -> Vec<f64> {
    dic.f64_array_at(&["FDDIMORDER"])
        .filter(|order| !order.is_empty())
        .unwrap_or_else(|| DEFAULT_DIM_ORDER.to_vec())
}

/// `FDF{n}` prefix of the header keys describing `axis`.
///
/// `FDDIMORDER[0]` names the last axis, `FDDIMORDER[1]` the one before it.
fn axis_prefix(dic: &ParameterDictionary, axis: usize, ndim: usize) -> Result<String, IngestError> {
    let order = dim_order(dic);
    let n = order
        .get(ndim - 1 - axis)
        .ok_or(IngestError::UnsupportedDimensions {
            format: FileFormat::Pipe,
            ndim,
        })?;
    Ok(format!("FDF{}", *n as i64))
}

fn field(dic: &ParameterDictionary, prefix: &str, name: &str) -> Option<f64> {
    let key = format!("{prefix}{name}");
    dic.f64_at(&[key.as_str()])
}

fn required(dic: &ParameterDictionary, prefix: &str, name: &str) -> Result<f64, IngestError> {
    field(dic, prefix, name).ok_or_else(|| IngestError::MissingParameter(format!("{prefix}{name}")))
}

/// Descriptor for NMRPipe data.
///
/// `FDF{n}QUADFLAG = 0` marks a complex axis (the last axis follows the
/// sample type instead), `FDF{n}FTFLAG = 1` a frequency axis. `FDF{n}CAR` is
/// stored in ppm and converted to Hz.
pub(super) fn guess_udic(dic: &ParameterDictionary, samples: &Samples) -> Result<Udic, IngestError> {
    let ndim = samples.ndim();
    let mut dims = Vec::with_capacity(ndim);
    for (axis, &size) in samples.shape().iter().enumerate() {
        let prefix = axis_prefix(dic, axis, ndim)?;
        let sw = required(dic, &prefix, "SW")?;
        let obs = required(dic, &prefix, "OBS")?;
        let car = field(dic, &prefix, "CAR").unwrap_or(0.0) * obs;

        let complex = if axis == ndim - 1 {
            samples.is_complex()
        } else {
            field(dic, &prefix, "QUADFLAG") == Some(0.0)
        };
        let domain = if field(dic, &prefix, "FTFLAG") == Some(1.0) {
            Domain::Frequency
        } else {
            Domain::Time
        };

        let mut dim = DimensionInfo::new(size, complex, domain, sw, obs, car);
        let label_key = format!("{prefix}LABEL");
        if let Some(label) = dic.str_at(&[label_key.as_str()]) {
            dim = dim.with_label(label.trim());
        }
        dims.push(dim);
    }
    Ok(Udic::new(dims)?)
}

/// One converter per axis, in axis order
pub(super) fn coordinate_system(udic: &Udic) -> Result<CoordinateSystem, IngestError> {
    let dims = udic
        .dims()
        .iter()
        .map(|d| UnitConversion::new(d.size, d.complex, d.sw, d.obs, d.car))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CoordinateSystem::new(dims))
}

/// Undo transposed storage: transpose the data and swap the first two
/// `FDDIMORDER` entries so the header describes the new axis order.
fn untranspose(
    dic: &mut ParameterDictionary,
    samples: Samples,
    processor: &dyn Processor,
) -> Result<Samples, IngestError> {
    if samples.ndim() < 2 {
        dic.insert("FDTRANSPOSED", 0.0);
        return Ok(samples);
    }
    let udic = guess_udic(dic, &samples)?;
    let (samples, _) = TaggedArray::new(samples, udic)?
        .transpose(TransposeMode::Auto, processor)?
        .into_parts();

    let mut order = dim_order(dic);
    if order.len() >= 2 {
        order.swap(0, 1);
    }
    dic.insert("FDDIMORDER", Value::from(order));
    dic.insert("FDTRANSPOSED", 0.0);
    Ok(samples)
}

/// Read and describe an NMRPipe file
pub(super) fn assemble(
    reader: &dyn PipeReader,
    path: &Path,
    processor: &dyn Processor,
) -> Result<(TaggedArray, CoordinateSystem), IngestError> {
    let raw = reader.read(path)?;
    let mut dic = raw.dic;
    let mut samples = raw.data;

    if dic.f64_at(&["FDTRANSPOSED"]) == Some(1.0) {
        info!("Data is stored transposed, transposing back");
        samples = untranspose(&mut dic, samples, processor)?;
    }

    let udic = guess_udic(&dic, &samples)?
        .with_provenance(OriginalFormat::Pipe, path.display().to_string());
    debug!("Guessed descriptor with sizes {:?}", udic.sizes());

    let coordinates = coordinate_system(&udic)?;
    let data = TaggedArray::new(samples, udic)?;
    Ok((data, coordinates))
}
