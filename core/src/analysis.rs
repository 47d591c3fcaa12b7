use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::generator::{Generator, GeneratorConfig, Kernel, Point, SampleMode};
use crate::permutation::SplitMix64;
use crate::{NoiseError, NoiseField};

// Summary statistics over a batch of samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseAnalysis {
    pub samples: usize,
    // Samples dropped because the field reported a per-sample error
    pub failed_samples: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub range: f64,
    pub nominal: (f64, f64),
    pub config: Option<GeneratorConfig>,
    pub kernel: Option<Kernel>,
}

impl NoiseAnalysis {
    // Every observed sample lies inside the nominal range
    pub fn within_nominal(&self) -> bool {
        self.min >= self.nominal.0 && self.max <= self.nominal.1
    }

    pub fn is_normalized(&self) -> bool {
        self.min >= 0.0 && self.max <= 1.0
    }
}

// Deterministic points in the unit hypercube of `dims` dimensions
fn unit_point(rng: &mut SplitMix64, dims: usize) -> Option<Point> {
    let mut coords = [0.0; 4];
    for c in coords.iter_mut().take(dims) {
        *c = rng.next_f64();
    }
    Point::from_slice(&coords[..dims])
}

// Analyse `generator` in Fractal mode over `samples` points of the unit square.
// The point sequence is seeded from the generator's own seed.
pub fn analyze(generator: &Generator, samples: usize) -> Result<NoiseAnalysis, NoiseError> {
    let view = generator.in_mode(SampleMode::Fractal);
    let seed = u64::from(generator.config().seed);
    let mut report = analyze_field(&view, 2, samples, seed)?;
    report.nominal = generator.nominal_range();
    report.config = Some(*generator.config());
    report.kernel = Some(generator.kernel());
    Ok(report)
}

// Analyse any field over `samples` SplitMix64-driven points of the unit
// hypercube. The nominal range defaults to [-1, 1].
pub fn analyze_field<F: NoiseField + ?Sized>(
    field: &F,
    dims: usize,
    samples: usize,
    seed: u64,
) -> Result<NoiseAnalysis, NoiseError> {
    if !(1..=4).contains(&dims) {
        return Err(NoiseError::InvalidConfiguration {
            field: "dims",
            value: dims as f64,
        });
    }
    if samples == 0 {
        return Err(NoiseError::SamplerShape { axis: 0, len: 0 });
    }

    let mut rng = SplitMix64::new(seed);
    let mut count = 0usize;
    let mut failed = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    // Welford running mean / sum of squared deviations
    let mut mean = 0.0;
    let mut m2 = 0.0;

    for _ in 0..samples {
        let Some(p) = unit_point(&mut rng, dims) else {
            continue;
        };
        let v = match field.evaluate(p) {
            Ok(v) => v,
            Err(err) if err.is_per_sample() => {
                failed += 1;
                continue;
            }
            Err(err) => return Err(err),
        };
        count += 1;
        min = min.min(v);
        max = max.max(v);
        let delta = v - mean;
        mean += delta / count as f64;
        m2 += delta * (v - mean);
    }

    if count == 0 {
        min = 0.0;
        max = 0.0;
    }
    let variance = if count == 0 { 0.0 } else { m2 / count as f64 };
    debug!(samples, failed, min, max, mean, "analysed field");

    Ok(NoiseAnalysis {
        samples: count,
        failed_samples: failed,
        min,
        max,
        mean,
        variance,
        std_dev: variance.sqrt(),
        range: max - min,
        nominal: (-1.0, 1.0),
        config: None,
        kernel: None,
    })
}

const PROBES: usize = 10_000;

// Observed 2D output stays inside [expected.0 - tolerance, expected.1 + tolerance]
pub fn validate_range<F: NoiseField + ?Sized>(
    field: &F,
    expected: (f64, f64),
    tolerance: f64,
) -> Result<bool, NoiseError> {
    let report = analyze_field(field, 2, PROBES, 0)?;
    Ok(report.min >= expected.0 - tolerance && report.max <= expected.1 + tolerance)
}

// Lipschitz probe: |f(p + ε·d) − f(p)| ≤ lipschitz·ε at three step scales,
// from points in [0, 10]² along both axes
pub fn validate_continuity<F: NoiseField + ?Sized>(
    field: &F,
    lipschitz: f64,
) -> Result<bool, NoiseError> {
    let mut rng = SplitMix64::new(0x5EED);
    for _ in 0..PROBES / 10 {
        let x = rng.next_f64() * 10.0;
        let y = rng.next_f64() * 10.0;
        let here = field.evaluate(Point::D2(x, y))?;
        for eps in [1e-2, 1e-3, 1e-4] {
            let dx = field.evaluate(Point::D2(x + eps, y))?;
            let dy = field.evaluate(Point::D2(x, y + eps))?;
            let bound = lipschitz * eps;
            if (dx - here).abs() > bound || (dy - here).abs() > bound {
                debug!(x, y, eps, "continuity probe failed");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

// Perlin lattices repeat every 256 cells, i.e. every 256 / frequency in world
// space. Fractal modes keep the period when lacunarity is a whole number.
// Checks shifts along each axis and along the diagonal.
pub fn validate_periodicity(generator: &Generator, tolerance: f64) -> Result<bool, NoiseError> {
    let period = 256.0 / generator.config().frequency;
    let mut rng = SplitMix64::new(u64::from(generator.config().seed));
    for _ in 0..PROBES / 10 {
        let x = rng.next_f64() * 16.0;
        let y = rng.next_f64() * 16.0;
        let here = generator.evaluate(Point::D2(x, y))?;
        for (sx, sy) in [(period, 0.0), (0.0, period), (period, period)] {
            let there = generator.evaluate(Point::D2(x + sx, y + sy))?;
            if (there - here).abs() > tolerance {
                debug!(x, y, here, there, "periodicity probe failed");
                return Ok(false);
            }
        }
    }
    Ok(true)
}
