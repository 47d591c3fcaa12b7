use noise_core::sampler::{Domain, Grid, cell_count};
use noise_core::{Generator, GeneratorConfig, Kernel, Modifier, Preset};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

// Everything needed to rebuild a generator, including its modifier stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorDoc {
    pub name: String,
    pub kernel: Kernel,
    pub config: GeneratorConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl GeneratorDoc {
    pub fn from_generator(name: impl Into<String>, generator: &Generator) -> Self {
        Self {
            name: name.into(),
            kernel: generator.kernel(),
            config: *generator.config(),
            modifiers: generator.modifiers().to_vec(),
        }
    }

    // Named after the preset
    pub fn from_preset(preset: Preset, seed: u32) -> Self {
        Self {
            name: preset.name().to_string(),
            kernel: preset.kernel(),
            config: preset.config(seed),
            modifiers: Vec::new(),
        }
    }

    pub fn build(&self) -> Result<Generator, StorageError> {
        let base = Generator::new(self.config, self.kernel)?;
        Ok(self.modifiers.iter().fold(base, |g, m| g.modified(*m)))
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

// A sampled grid of any dimension, flattened row-major (x fastest)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDoc {
    pub shape: Vec<usize>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
    pub values: Vec<f64>,
    pub failed_cells: usize,
}

impl<const N: usize> From<&Grid<N>> for GridDoc {
    fn from(grid: &Grid<N>) -> Self {
        Self {
            shape: grid.shape.to_vec(),
            min: grid.domain.min.to_vec(),
            max: grid.domain.max.to_vec(),
            values: grid.values.clone(),
            failed_cells: grid.failed_cells,
        }
    }
}

fn fixed<T: Copy + Default, const N: usize>(v: &[T]) -> Result<[T; N], StorageError> {
    if v.len() != N {
        return Err(StorageError::Format {
            expected: N,
            found: v.len(),
        });
    }
    let mut out = [T::default(); N];
    out.copy_from_slice(v);
    Ok(out)
}

impl GridDoc {
    // Rebuild an N-dimensional grid; dimension count and value count must
    // both agree with the stored shape, and the shape must be one the sampler
    // could have produced
    pub fn to_grid<const N: usize>(&self) -> Result<Grid<N>, StorageError> {
        let shape: [usize; N] = fixed(&self.shape)?;
        let domain = Domain::new(fixed(&self.min)?, fixed(&self.max)?);
        let cells = cell_count(&shape)?;
        if self.values.len() != cells {
            return Err(StorageError::Format {
                expected: cells,
                found: self.values.len(),
            });
        }
        Ok(Grid {
            shape,
            domain,
            values: self.values.clone(),
            failed_cells: self.failed_cells,
        })
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}
