use log::{debug, info, warn};
use std::path::Path;

use super::{BrukerOptions, BrukerReader, FileFormat, IngestError, ParameterDictionary};
use crate::array::{Samples, TaggedArray};
use crate::processing::{ProcessingError, Processor};
use crate::udic::{DimensionInfo, Domain, OriginalFormat, Udic};
use crate::units::{CoordinateSystem, UnitConversion};

/// Parameter blocks, direct dimension first
const ACQ_BLOCKS: [&str; 4] = ["acqus", "acqu2s", "acqu3s", "acqu4s"];

/// FnMODE values with quadrature detection in the indirect dimension
/// (QSEQ, States, States-TPPI, Echo-Antiecho)
const QUADRATURE_FN_MODES: [i64; 4] = [2, 4, 5, 6];

/// Parameter block describing `axis` of `ndim`-dimensional data
fn acq_block(axis: usize, ndim: usize) -> Result<&'static str, IngestError> {
    ACQ_BLOCKS
        .get(ndim - 1 - axis)
        .copied()
        .ok_or(IngestError::UnsupportedDimensions {
            format: FileFormat::Bruker,
            ndim,
        })
}

fn required(dic: &ParameterDictionary, block: &str, key: &str) -> Result<f64, IngestError> {
    dic.f64_at(&[block, key])
        .ok_or_else(|| IngestError::MissingParameter(format!("{block}.{key}")))
}

/// Descriptor for raw Bruker data.
///
/// The last axis is complex when the samples are; indirect axes are complex
/// when their FnMODE records quadrature detection.
pub(super) fn guess_udic(dic: &ParameterDictionary, samples: &Samples) -> Result<Udic, IngestError> {
    let ndim = samples.ndim();
    let mut dims = Vec::with_capacity(ndim);
    for (axis, &size) in samples.shape().iter().enumerate() {
        let block = acq_block(axis, ndim)?;
        let sw = required(dic, block, "SW_h")?;
        let bf = required(dic, block, "BF1")?;
        let obs = dic.f64_at(&[block, "SFO1"]).unwrap_or(bf);
        let car = required(dic, block, "O1")?;

        let complex = if axis == ndim - 1 {
            samples.is_complex()
        } else {
            dic.f64_at(&[block, "FnMODE"])
                .map(|mode| QUADRATURE_FN_MODES.contains(&(mode as i64)))
                .unwrap_or(false)
        };
        let mut dim = DimensionInfo::new(size, complex, Domain::Time, sw, obs, car);
        if let Some(nucleus) = dic.str_at(&[block, "NUC1"]) {
            dim = dim.with_label(nucleus);
        }
        dims.push(dim);
    }
    Ok(Udic::new(dims)?)
}

/// One converter per axis from `(size, complex, SW_h, BF1, O1)`
pub(super) fn coordinate_system(dic: &ParameterDictionary, udic: &Udic) -> Result<CoordinateSystem, IngestError> {
    let ndim = udic.ndim();
    let dims = udic
        .dims()
        .iter()
        .enumerate()
        .map(|(axis, dim)| -> Result<UnitConversion, IngestError> {
            let block = acq_block(axis, ndim)?;
            Ok(UnitConversion::new(
                dim.size,
                dim.complex,
                required(dic, block, "SW_h")?,
                required(dic, block, "BF1")?,
                required(dic, block, "O1")?,
            )?)
        })
        .collect::<Result<Vec<_>, IngestError>>()?;
    Ok(CoordinateSystem::new(dims))
}

fn strip_filter(
    dic: &ParameterDictionary,
    samples: Samples,
    processor: &dyn Processor,
) -> Result<Samples, IngestError> {
    let Samples::Complex(fid) = &samples else {
        debug!("Raw data is real, skipping digital filter removal");
        return Ok(samples);
    };
    match processor.remove_digital_filter(dic, fid, true) {
        Ok(filtered) => Ok(Samples::Complex(filtered)),
        Err(ProcessingError::MissingFilterParameter(key)) => {
            warn!("Digital filter parameter {key} not found, keeping raw data");
            Ok(samples)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read, optionally substitute processed data, and describe a Bruker experiment
pub(super) fn assemble(
    reader: &dyn BrukerReader,
    path: &Path,
    options: &BrukerOptions,
    processor: &dyn Processor,
) -> Result<(TaggedArray, CoordinateSystem), IngestError> {
    let raw = reader.read(path)?;
    let ndim = raw.data.ndim();

    let pdata = if options.read_pdata {
        match reader.find_pdata(path, ndim) {
            Some(pdata_path) => {
                info!("Using processed data from {}", pdata_path.display());
                Some(reader.read_pdata(&pdata_path)?)
            }
            None if options.require_pdata => {
                return Err(IngestError::MissingProcessedData(path.to_path_buf()))
            }
            None => {
                debug!("No processed data found, using the raw FID");
                None
            }
        }
    } else {
        None
    };

    let (samples, processed) = match pdata {
        // processed data is real in every dimension
        Some(p) => (Samples::Real(p.data.real()), true),
        None if options.remove_filter => (strip_filter(&raw.dic, raw.data, processor)?, false),
        None => (raw.data, false),
    };

    let mut udic = guess_udic(&raw.dic, &samples)?;
    if processed {
        for axis in 0..udic.ndim() {
            udic = udic.with_complex(axis, false)?.with_domain(axis, Domain::Frequency)?;
        }
    }
    let udic = udic.with_provenance(OriginalFormat::Bruker, path.display().to_string());

    let coordinates = coordinate_system(&raw.dic, &udic)?;
    let data = TaggedArray::new(samples, udic)?;
    Ok((data, coordinates))
}
