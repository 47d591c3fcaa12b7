// core holds the permutation lattice, the Perlin and Simplex kernels and
// everything composed on top of them: fractal modes, combiners, modifiers,
// grid sampling, analysis and presets
pub mod analysis;
pub mod combiner;
pub mod error;
pub mod fractal;
pub mod generator;
pub mod gradients;
pub mod modifier;
pub mod perlin;
pub mod permutation;
pub mod presets;
pub mod render;
pub mod sampler;
pub mod simplex;

pub use analysis::{NoiseAnalysis, analyze, analyze_field};
pub use combiner::{Combiner, Operation};
pub use error::NoiseError;
pub use fractal::Octaves;
pub use generator::{Generator, GeneratorConfig, Kernel, ModeView, Point, SampleMode};
pub use modifier::{Modifier, ModifierKind, bias, gain, normalized, scale};
pub use permutation::{Permutation, SplitMix64};
pub use presets::Preset;
pub use render::ColorRamp;
pub use sampler::{Domain, Grid};

// Anything that yields one value per point. Generators, mode views and
// combiners all implement it, so the sampler and the analysis work on any of
// them. Fields are shared across sampling threads, hence `Sync`.
pub trait NoiseField: Sync {
    fn evaluate(&self, p: Point) -> Result<f64, NoiseError>;
}

impl<T: NoiseField + ?Sized> NoiseField for &T {
    fn evaluate(&self, p: Point) -> Result<f64, NoiseError> {
        (**self).evaluate(p)
    }
}
