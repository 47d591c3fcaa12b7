use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::generator::Point;
use crate::{NoiseError, NoiseField};

// Axis-aligned box in world space, `min` and `max` per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain<const N: usize> {
    pub min: [f64; N],
    pub max: [f64; N],
}

impl<const N: usize> Domain<N> {
    pub fn new(min: [f64; N], max: [f64; N]) -> Self {
        Self { min, max }
    }

    // [0, 1] on every axis
    pub fn unit() -> Self {
        Self {
            min: [0.0; N],
            max: [1.0; N],
        }
    }

    // Centre of cell `i` out of `len` along `axis`
    fn coord(&self, axis: usize, i: usize, len: usize) -> f64 {
        let t = (i as f64 + 0.5) / len as f64;
        self.min[axis] + t * (self.max[axis] - self.min[axis])
    }
}

// Dense sample buffer, row-major with x fastest, then y, z, w
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<const N: usize> {
    pub shape: [usize; N],
    pub domain: Domain<N>,
    pub values: Vec<f64>,
    // Cells whose evaluation failed and hold 0.0 instead
    pub failed_cells: usize,
}

impl<const N: usize> Grid<N> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // Cell count implied by `shape`, checked against the stored values.
    // Fields are public, so a hand-built grid can disagree with itself.
    pub fn check_len(&self) -> Result<usize, NoiseError> {
        let cells = cell_count(&self.shape)?;
        if self.values.len() != cells {
            return Err(NoiseError::GridLength {
                expected: cells,
                found: self.values.len(),
            });
        }
        Ok(cells)
    }

    // Flat index of a cell, None when outside the grid
    pub fn index_of(&self, cell: [usize; N]) -> Option<usize> {
        let mut index: usize = 0;
        for axis in (0..N).rev() {
            if cell[axis] >= self.shape[axis] {
                return None;
            }
            index = index.checked_mul(self.shape[axis])?.checked_add(cell[axis])?;
        }
        Some(index)
    }

    // None outside the grid or when the values disagree with the shape
    pub fn get(&self, cell: [usize; N]) -> Option<f64> {
        self.check_len().ok()?;
        self.index_of(cell).map(|i| self.values[i])
    }

    // Per-axis cell coordinates of a flat index
    pub fn cell_of(&self, index: usize) -> Option<[usize; N]> {
        (index < self.values.len() && self.check_len().is_ok())
            .then(|| unflatten(&self.shape, index))
    }

    // World coordinate the cell at `index` was sampled at
    pub fn cell_center(&self, index: usize) -> Option<[f64; N]> {
        self.cell_of(index)
            .map(|cell| cell_center(&self.domain, &self.shape, cell))
    }

    // (min, max) over all values; (0, 0) for an empty grid
    pub fn min_max(&self) -> (f64, f64) {
        if self.values.is_empty() {
            return (0.0, 0.0);
        }
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

fn unflatten<const N: usize>(shape: &[usize; N], mut index: usize) -> [usize; N] {
    let mut cell = [0; N];
    for axis in 0..N {
        cell[axis] = index % shape[axis];
        index /= shape[axis];
    }
    cell
}

fn cell_center<const N: usize>(
    domain: &Domain<N>,
    shape: &[usize; N],
    cell: [usize; N],
) -> [f64; N] {
    let mut out = [0.0; N];
    for axis in 0..N {
        out[axis] = domain.coord(axis, cell[axis], shape[axis]);
    }
    out
}

// Number of cells in `shape`; zero-length axes and overflowing products are
// rejected with the offending axis
pub fn cell_count(shape: &[usize]) -> Result<usize, NoiseError> {
    let mut cells = 1usize;
    for (axis, &len) in shape.iter().enumerate() {
        if len == 0 {
            return Err(NoiseError::SamplerShape { axis, len });
        }
        cells = cells
            .checked_mul(len)
            .ok_or(NoiseError::SamplerShape { axis, len })?;
    }
    Ok(cells)
}

// Evaluate one cell. Per-sample failures become the 0.0 fallback and report
// `true`; structural errors (a misbuilt combiner) abort the whole grid.
fn fill<F: NoiseField + ?Sized>(
    field: &F,
    p: Point,
    slot: &mut f64,
) -> Result<bool, NoiseError> {
    match field.evaluate(p) {
        Ok(v) => {
            *slot = v;
            Ok(false)
        }
        Err(err) if err.is_per_sample() => {
            *slot = 0.0;
            Ok(true)
        }
        Err(err) => Err(err),
    }
}

// Common driver: `to_point` maps a cell to its query point
fn run<const N: usize, F, P>(
    field: &F,
    domain: Domain<N>,
    shape: [usize; N],
    parallel: bool,
    to_point: P,
) -> Result<Grid<N>, NoiseError>
where
    F: NoiseField + ?Sized,
    P: Fn([f64; N]) -> Point + Sync,
{
    let cells = cell_count(&shape)?;
    let span = debug_span!("sample_grid", dims = N, cells, parallel);
    let _enter = span.enter();

    let mut values = vec![0.0; cells];
    let eval = |index: usize, slot: &mut f64| {
        let cell = unflatten(&shape, index);
        fill(field, to_point(cell_center(&domain, &shape, cell)), slot)
    };

    let failed_cells = if parallel {
        // One task per x-row; each row is written only by its own task so the
        // layout matches the sequential pass exactly
        let row = shape[0];
        values
            .par_chunks_mut(row)
            .enumerate()
            .map(|(r, chunk)| -> Result<usize, NoiseError> {
                let mut failed = 0;
                for (i, slot) in chunk.iter_mut().enumerate() {
                    failed += usize::from(eval(r * row + i, slot)?);
                }
                Ok(failed)
            })
            .collect::<Result<Vec<usize>, NoiseError>>()?
            .into_iter()
            .sum()
    } else {
        let mut failed = 0;
        for (i, slot) in values.iter_mut().enumerate() {
            failed += usize::from(eval(i, slot)?);
        }
        failed
    };

    debug!(failed_cells, "grid sampled");
    Ok(Grid {
        shape,
        domain,
        values,
        failed_cells,
    })
}

fn p2(c: [f64; 2]) -> Point {
    Point::D2(c[0], c[1])
}

fn p3(c: [f64; 3]) -> Point {
    Point::D3(c[0], c[1], c[2])
}

fn p4(c: [f64; 4]) -> Point {
    Point::D4(c[0], c[1], c[2], c[3])
}

// `shape` is [width, height]
pub fn sample_grid2<F: NoiseField + ?Sized>(
    field: &F,
    domain: Domain<2>,
    shape: [usize; 2],
) -> Result<Grid<2>, NoiseError> {
    run(field, domain, shape, false, p2)
}

pub fn sample_grid3<F: NoiseField + ?Sized>(
    field: &F,
    domain: Domain<3>,
    shape: [usize; 3],
) -> Result<Grid<3>, NoiseError> {
    run(field, domain, shape, false, p3)
}

pub fn sample_grid4<F: NoiseField + ?Sized>(
    field: &F,
    domain: Domain<4>,
    shape: [usize; 4],
) -> Result<Grid<4>, NoiseError> {
    run(field, domain, shape, false, p4)
}

// 2D slice of a 4D field at fixed z and time
pub fn sample_time_slice<F: NoiseField + ?Sized>(
    field: &F,
    domain: Domain<2>,
    shape: [usize; 2],
    z: f64,
    time: f64,
) -> Result<Grid<2>, NoiseError> {
    run(field, domain, shape, false, |c| Point::D4(c[0], c[1], z, time))
}

pub fn sample_grid_par2<F: NoiseField + ?Sized>(
    field: &F,
    domain: Domain<2>,
    shape: [usize; 2],
) -> Result<Grid<2>, NoiseError> {
    run(field, domain, shape, true, p2)
}

pub fn sample_grid_par3<F: NoiseField + ?Sized>(
    field: &F,
    domain: Domain<3>,
    shape: [usize; 3],
) -> Result<Grid<3>, NoiseError> {
    run(field, domain, shape, true, p3)
}

pub fn sample_grid_par4<F: NoiseField + ?Sized>(
    field: &F,
    domain: Domain<4>,
    shape: [usize; 4],
) -> Result<Grid<4>, NoiseError> {
    run(field, domain, shape, true, p4)
}
