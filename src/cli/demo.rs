use anyhow::{Context, Result};
use log::info;
use num_complex::Complex32;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use nmrpro::prelude::*;

use super::config::Config;

/// Resonances of the synthetic sample: offset from the carrier in Hz,
/// relative amplitude, decay rate in 1/s
const RESONANCES: [(f64, f64, f64); 3] = [(125.0, 1.0, 8.0), (-250.0, 0.6, 12.0), (312.5, 0.3, 20.0)];

/// Settings for one demo run, CLI flags over config file over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSettings {
    pub size: usize,
    pub sweep_width: f64,
    pub observe: f64,
    pub carrier: f64,
    pub recipe: Option<PathBuf>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            size: 256,
            sweep_width: 1000.0,
            observe: 500.0,
            carrier: 0.0,
            recipe: None,
        }
    }
}

/// Flag values given on the command line
#[derive(Debug, Default)]
pub struct DemoOverrides {
    pub size: Option<usize>,
    pub sweep_width: Option<f64>,
    pub observe: Option<f64>,
    pub carrier: Option<f64>,
    pub recipe: Option<PathBuf>,
}

impl DemoSettings {
    pub fn resolve(overrides: DemoOverrides, config: Option<&Path>) -> Result<Self> {
        let file = match config {
            Some(path) => Config::from_file(path)?.demo,
            None => Default::default(),
        };
        let defaults = Self::default();
        Ok(Self {
            size: overrides.size.or(file.size).unwrap_or(defaults.size),
            sweep_width: overrides
                .sweep_width
                .or(file.sweep_width)
                .unwrap_or(defaults.sweep_width),
            observe: overrides.observe.or(file.observe).unwrap_or(defaults.observe),
            carrier: overrides.carrier.or(file.carrier).unwrap_or(defaults.carrier),
            recipe: overrides.recipe.or(file.recipe),
        })
    }
}

/// Complex FID of the demo resonances.
///
/// Offsets are encoded with a negative phase rotation so that positive
/// offsets land at higher ppm after the forward transform.
pub fn synthesize_fid(size: usize, sweep_width: f64) -> Vec<Complex32> {
    let dwell = 1.0 / sweep_width;
    (0..size)
        .map(|k| {
            let t = k as f64 * dwell;
            RESONANCES
                .iter()
                .map(|&(offset, amplitude, decay)| {
                    let magnitude = amplitude * (-decay * t).exp();
                    let angle = -2.0 * PI * offset * t;
                    Complex32::new((magnitude * angle.cos()) as f32, (magnitude * angle.sin()) as f32)
                })
                .fold(Complex32::new(0.0, 0.0), |acc, v| acc + v)
        })
        .collect()
}

/// Recipe used when none is configured
pub fn default_recipe(size: usize) -> Recipe {
    Recipe::new()
        .with_step("apodize", Operation::ExponentialApodization { line_broadening: 2.0 })
        .with_step("zero_fill", Operation::ZeroFill { size: size * 2 })
        .with_step("ft", Operation::ForwardFourier)
}

/// Build the synthetic spectrum
pub fn build_spectrum(settings: &DemoSettings) -> Result<Spectrum> {
    let samples = Samples::complex_from_vec(&[settings.size], synthesize_fid(settings.size, settings.sweep_width))?;
    let dim = DimensionInfo::new(
        settings.size,
        true,
        Domain::Time,
        settings.sweep_width,
        settings.observe,
        settings.carrier,
    )
    .with_label("1H");
    let udic = Udic::new(vec![dim])?;
    Ok(Spectrum::new(TaggedArray::new(samples, udic)?, None)?)
}

/// Position of the tallest point, in ppm
pub fn tallest_peak_ppm(spectrum: &Spectrum) -> Result<f64> {
    let magnitudes = spectrum.data().samples().to_complex();
    let (index, _) = magnitudes
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.norm()))
        .fold((0, f32::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });
    // the stored coordinate system describes the original FID, so convert
    // with one built for the processed size
    let coordinates = CoordinateSystem::from_udic(spectrum.udic())?;
    Ok(coordinates.to_unit(index as f64, 0, Unit::Ppm)?)
}

/// Synthesize an FID, process it and print a JSON summary
pub fn run(settings: DemoSettings) -> Result<()> {
    info!(
        "Synthesizing {}-point FID (sw {} Hz, obs {} MHz)",
        settings.size, settings.sweep_width, settings.observe
    );
    let spectrum = build_spectrum(&settings)?;

    let recipe = match &settings.recipe {
        Some(path) => Recipe::from_file(path)
            .with_context(|| format!("Failed to load recipe: {}", path.display()))?,
        None => default_recipe(settings.size),
    };
    let processed = recipe
        .apply_to(&spectrum)
        .context("Failed to apply processing recipe")?;

    info!("Processed shape: {:?}", processed.shape());
    for step in processed.history().describe() {
        info!("  {}: {}", step.name, step.transform);
    }

    let freq = processed.freq_domain()?;
    let peak = tallest_peak_ppm(freq)?;
    let summary = serde_json::json!({
        "shape": processed.shape(),
        "time_domain": processed.is_time_domain(),
        "history": processed.history().describe(),
        "tallest_peak_ppm": peak,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_recipe_finds_main_resonance() {
        let settings = DemoSettings {
            size: 64,
            ..DemoSettings::default()
        };
        let processed = default_recipe(settings.size)
            .apply_to(&build_spectrum(&settings).unwrap())
            .unwrap();
        assert_eq!(processed.shape(), &[128]);

        // 125 Hz at 500 MHz
        let ppm = tallest_peak_ppm(&processed).unwrap();
        assert!((ppm - 0.25).abs() < 1e-9, "peak at {ppm} ppm");
    }

    #[test]
    fn test_resolve_prefers_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[demo]\nsize = 32\nobserve = 600.0\n").unwrap();

        let settings = DemoSettings::resolve(
            DemoOverrides {
                size: Some(16),
                ..Default::default()
            },
            Some(file.path()),
        )
        .unwrap();
        assert_eq!(settings.size, 16);
        assert_eq!(settings.observe, 600.0);
        assert_eq!(settings.sweep_width, 1000.0);
    }
}
