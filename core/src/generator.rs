use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::fractal::{self, Octaves};
use crate::modifier::Modifier;
use crate::permutation::Permutation;
use crate::{NoiseError, NoiseField, perlin, simplex};

// Base lattice construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Kernel {
    #[default]
    Perlin,
    Simplex,
}

// What a generator computes at a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SampleMode {
    Base,
    #[default]
    Fractal,
    Turbulence,
    Ridged,
    Billow,
    // sin(4x + 2π·fBm): veined bands along x
    Marble,
    // frac(20·fBm): concentric growth rings
    Wood,
}

// A query point of 1 to 4 coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Point {
    D1(f64),
    D2(f64, f64),
    D3(f64, f64, f64),
    D4(f64, f64, f64, f64),
}

impl Point {
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x] => Some(Point::D1(x)),
            [x, y] => Some(Point::D2(x, y)),
            [x, y, z] => Some(Point::D3(x, y, z)),
            [x, y, z, w] => Some(Point::D4(x, y, z, w)),
            _ => None,
        }
    }

    pub fn dims(&self) -> usize {
        match self {
            Point::D1(..) => 1,
            Point::D2(..) => 2,
            Point::D3(..) => 3,
            Point::D4(..) => 4,
        }
    }

    pub fn x(&self) -> f64 {
        match *self {
            Point::D1(x) | Point::D2(x, _) | Point::D3(x, _, _) | Point::D4(x, _, _, _) => x,
        }
    }

    pub fn scaled(&self, f: f64) -> Self {
        match *self {
            Point::D1(x) => Point::D1(x * f),
            Point::D2(x, y) => Point::D2(x * f, y * f),
            Point::D3(x, y, z) => Point::D3(x * f, y * f, z * f),
            Point::D4(x, y, z, w) => Point::D4(x * f, y * f, z * f, w * f),
        }
    }
}

// The six numbers that fully describe a generator apart from its kernel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u32,
    pub frequency: f64,
    pub amplitude: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
            amplitude: 1.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl GeneratorConfig {
    pub fn new(
        seed: u32,
        frequency: f64,
        amplitude: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> Self {
        Self {
            seed,
            frequency,
            amplitude,
            octaves,
            persistence,
            lacunarity,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    // Written as negated comparisons so NaN is rejected too
    pub fn validate(&self) -> Result<(), NoiseError> {
        let invalid = |field, value| Err(NoiseError::InvalidConfiguration { field, value });
        if self.octaves < 1 {
            return invalid("octaves", f64::from(self.octaves));
        }
        if !(self.frequency > 0.0 && self.frequency.is_finite()) {
            return invalid("frequency", self.frequency);
        }
        if !(self.amplitude >= 0.0 && self.amplitude.is_finite()) {
            return invalid("amplitude", self.amplitude);
        }
        if !(self.lacunarity >= 0.0 && self.lacunarity.is_finite()) {
            return invalid("lacunarity", self.lacunarity);
        }
        if !(self.persistence >= 0.0 && self.persistence.is_finite()) {
            return invalid("persistence", self.persistence);
        }
        Ok(())
    }

    pub fn octave_schedule(&self) -> Octaves {
        Octaves::new(self.octaves, self.persistence, self.lacunarity)
    }
}

// Bit-pattern hash, with -0.0 folded into 0.0 so it agrees with PartialEq
impl Hash for GeneratorConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let bits = |v: f64| (v + 0.0).to_bits();
        self.seed.hash(state);
        bits(self.frequency).hash(state);
        bits(self.amplitude).hash(state);
        self.octaves.hash(state);
        bits(self.persistence).hash(state);
        bits(self.lacunarity).hash(state);
    }
}

// A configured noise generator. Cloning is cheap: the permutation table is
// shared and never mutated after construction.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    kernel: Kernel,
    perm: Arc<Permutation>,
    modifiers: Vec<Modifier>,
}

impl PartialEq for Generator {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.kernel == other.kernel
            && self.modifiers == other.modifiers
            && (Arc::ptr_eq(&self.perm, &other.perm) || self.perm == other.perm)
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig, kernel: Kernel) -> Result<Self, NoiseError> {
        let perm = Permutation::from_seed(config.seed);
        Self::with_permutation(config, kernel, perm)
    }

    // Build around a caller-supplied table; `config.seed` is kept for the
    // record but does not influence the lattice
    pub fn with_permutation(
        config: GeneratorConfig,
        kernel: Kernel,
        perm: Permutation,
    ) -> Result<Self, NoiseError> {
        if let Err(err) = config.validate() {
            debug!(%err, "rejected generator configuration");
            return Err(err);
        }
        trace!(seed = config.seed, ?kernel, "built generator");
        Ok(Self {
            config,
            kernel,
            perm: Arc::new(perm),
            modifiers: Vec::new(),
        })
    }

    // Perlin generator from the six configuration numbers
    pub fn make(
        seed: u32,
        frequency: f64,
        amplitude: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> Result<Self, NoiseError> {
        Self::new(
            GeneratorConfig::new(seed, frequency, amplitude, octaves, persistence, lacunarity),
            Kernel::Perlin,
        )
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn permutation(&self) -> &Permutation {
        &self.perm
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    // Same lattice, other kernel
    pub fn with_kernel(&self, kernel: Kernel) -> Self {
        Self {
            kernel,
            ..self.clone()
        }
    }

    // Apply a new configuration. The permutation is rebuilt only when the seed
    // changes; modifiers are carried over.
    pub fn reconfigured(&self, config: GeneratorConfig) -> Result<Self, NoiseError> {
        config.validate()?;
        let perm = if config.seed == self.config.seed {
            Arc::clone(&self.perm)
        } else {
            Arc::new(Permutation::from_seed(config.seed))
        };
        Ok(Self {
            config,
            kernel: self.kernel,
            perm,
            modifiers: self.modifiers.clone(),
        })
    }

    // New generator that post-processes every output with `modifier`, sharing
    // this generator's permutation
    pub fn modified(&self, modifier: Modifier) -> Self {
        let mut out = self.clone();
        out.modifiers.push(modifier);
        out
    }

    pub fn in_mode(&self, mode: SampleMode) -> ModeView<'_> {
        ModeView {
            generator: self,
            mode,
        }
    }

    // Single base-kernel evaluation, no frequency or amplitude applied
    pub fn base(&self, p: Point) -> f64 {
        let perm = &self.perm;
        match (self.kernel, p) {
            (Kernel::Perlin, Point::D1(x)) => perlin::perlin1(perm, x),
            (Kernel::Perlin, Point::D2(x, y)) => perlin::perlin2(perm, x, y),
            (Kernel::Perlin, Point::D3(x, y, z)) => perlin::perlin3(perm, x, y, z),
            (Kernel::Perlin, Point::D4(x, y, z, w)) => perlin::perlin4(perm, x, y, z, w),
            (Kernel::Simplex, Point::D1(x)) => simplex::simplex1(perm, x),
            (Kernel::Simplex, Point::D2(x, y)) => simplex::simplex2(perm, x, y),
            (Kernel::Simplex, Point::D3(x, y, z)) => simplex::simplex3(perm, x, y, z),
            (Kernel::Simplex, Point::D4(x, y, z, w)) => simplex::simplex4(perm, x, y, z, w),
        }
    }

    pub fn sample(&self, mode: SampleMode, p: Point) -> f64 {
        let freq = self.config.frequency;
        let octaves = self.config.octave_schedule();
        let layer = |scale: f64| self.base(p.scaled(freq * scale));

        let raw = match mode {
            SampleMode::Base => layer(1.0),
            SampleMode::Fractal => fractal::fbm(&octaves, layer),
            SampleMode::Turbulence => fractal::turbulence(&octaves, layer),
            SampleMode::Ridged => fractal::ridged(&octaves, layer),
            SampleMode::Billow => fractal::billow(&octaves, layer),
            SampleMode::Marble => (p.x() * 4.0 + fractal::fbm(&octaves, layer) * TAU).sin(),
            SampleMode::Wood => {
                let rings = fractal::fbm(&octaves, layer) * 20.0;
                // tiny negative inputs round up to exactly 1.0
                let frac = rings - rings.floor();
                if frac >= 1.0 { 0.0 } else { frac }
            }
        };

        self.modifiers
            .iter()
            .fold(raw * self.config.amplitude, |v, m| m.apply(v))
    }

    pub fn noise1(&self, x: f64) -> f64 {
        self.sample(SampleMode::Base, Point::D1(x))
    }

    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        self.sample(SampleMode::Base, Point::D2(x, y))
    }

    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(SampleMode::Base, Point::D3(x, y, z))
    }

    pub fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.sample(SampleMode::Base, Point::D4(x, y, z, w))
    }

    pub fn fractal1(&self, x: f64) -> f64 {
        self.sample(SampleMode::Fractal, Point::D1(x))
    }

    pub fn fractal2(&self, x: f64, y: f64) -> f64 {
        self.sample(SampleMode::Fractal, Point::D2(x, y))
    }

    pub fn fractal3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(SampleMode::Fractal, Point::D3(x, y, z))
    }

    pub fn fractal4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.sample(SampleMode::Fractal, Point::D4(x, y, z, w))
    }

    pub fn turbulence1(&self, x: f64) -> f64 {
        self.sample(SampleMode::Turbulence, Point::D1(x))
    }

    pub fn turbulence2(&self, x: f64, y: f64) -> f64 {
        self.sample(SampleMode::Turbulence, Point::D2(x, y))
    }

    pub fn turbulence3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(SampleMode::Turbulence, Point::D3(x, y, z))
    }

    pub fn turbulence4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.sample(SampleMode::Turbulence, Point::D4(x, y, z, w))
    }

    pub fn ridged1(&self, x: f64) -> f64 {
        self.sample(SampleMode::Ridged, Point::D1(x))
    }

    pub fn ridged2(&self, x: f64, y: f64) -> f64 {
        self.sample(SampleMode::Ridged, Point::D2(x, y))
    }

    pub fn ridged3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(SampleMode::Ridged, Point::D3(x, y, z))
    }

    pub fn ridged4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.sample(SampleMode::Ridged, Point::D4(x, y, z, w))
    }

    pub fn billow1(&self, x: f64) -> f64 {
        self.sample(SampleMode::Billow, Point::D1(x))
    }

    pub fn billow2(&self, x: f64, y: f64) -> f64 {
        self.sample(SampleMode::Billow, Point::D2(x, y))
    }

    pub fn billow3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(SampleMode::Billow, Point::D3(x, y, z))
    }

    pub fn billow4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.sample(SampleMode::Billow, Point::D4(x, y, z, w))
    }

    pub fn marble2(&self, x: f64, y: f64) -> f64 {
        self.sample(SampleMode::Marble, Point::D2(x, y))
    }

    pub fn marble3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(SampleMode::Marble, Point::D3(x, y, z))
    }

    pub fn wood2(&self, x: f64, y: f64) -> f64 {
        self.sample(SampleMode::Wood, Point::D2(x, y))
    }

    pub fn wood3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.sample(SampleMode::Wood, Point::D3(x, y, z))
    }

    // Nominal output range [-amplitude, +amplitude]
    pub fn nominal_range(&self) -> (f64, f64) {
        (-self.config.amplitude, self.config.amplitude)
    }
}

// A generator used as a field: contributes its fBm output
impl NoiseField for Generator {
    fn evaluate(&self, p: Point) -> Result<f64, NoiseError> {
        Ok(self.sample(SampleMode::Fractal, p))
    }
}

// Borrowed generator pinned to a sampling mode
#[derive(Debug, Clone, Copy)]
pub struct ModeView<'a> {
    generator: &'a Generator,
    mode: SampleMode,
}

impl NoiseField for ModeView<'_> {
    fn evaluate(&self, p: Point) -> Result<f64, NoiseError> {
        Ok(self.generator.sample(self.mode, p))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::{Generator, GeneratorConfig, Kernel, Point, SampleMode};
    use crate::modifier::{Modifier, ModifierKind};
    use crate::{NoiseError, NoiseField};

    fn hash_of(c: &GeneratorConfig) -> u64 {
        let mut h = DefaultHasher::new();
        c.hash(&mut h);
        h.finish()
    }

    #[test]
    fn determinism_across_instances() {
        let g1 = Generator::make(1234, 0.01, 1.0, 4, 0.5, 2.0).unwrap();
        let g2 = Generator::make(1234, 0.01, 1.0, 4, 0.5, 2.0).unwrap();
        assert_eq!(g1.permutation(), g2.permutation());
        assert_eq!(g1.fractal2(10.5, -3.7), g2.fractal2(10.5, -3.7));
        assert_eq!(g1, g2);
    }

    #[test]
    fn validation_rejects_bad_numbers() {
        let base = GeneratorConfig::default();
        let cases = [
            (base.with_octaves(0), "octaves"),
            (base.with_frequency(0.0), "frequency"),
            (base.with_frequency(-1.0), "frequency"),
            (base.with_frequency(f64::NAN), "frequency"),
            (base.with_amplitude(-0.5), "amplitude"),
            (base.with_lacunarity(-2.0), "lacunarity"),
            (base.with_persistence(-0.1), "persistence"),
        ];
        for (config, name) in cases {
            match Generator::new(config, Kernel::Perlin) {
                Err(NoiseError::InvalidConfiguration { field, .. }) => assert_eq!(field, name),
                other => panic!("expected {name} rejection, got {other:?}"),
            }
        }
        assert!(base.with_amplitude(0.0).validate().is_ok());
    }

    #[test]
    fn config_hash_agrees_with_eq() {
        let a = GeneratorConfig::default().with_persistence(0.0);
        let b = GeneratorConfig::default().with_persistence(-0.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&a.with_seed(1)));
    }

    #[test]
    fn amplitude_scales_output() {
        let one = Generator::make(5, 1.0, 1.0, 3, 0.5, 2.0).unwrap();
        let three = Generator::make(5, 1.0, 3.0, 3, 0.5, 2.0).unwrap();
        let (a, b) = (one.noise2(0.3, 0.6), three.noise2(0.3, 0.6));
        assert!((a * 3.0 - b).abs() < 1e-12);
        assert_eq!(three.nominal_range(), (-3.0, 3.0));
    }

    #[test]
    fn frequency_scales_input() {
        let slow = Generator::make(5, 0.5, 1.0, 1, 0.5, 2.0).unwrap();
        let fast = Generator::make(5, 1.0, 1.0, 1, 0.5, 2.0).unwrap();
        assert_eq!(slow.noise2(1.3, 2.2), fast.noise2(0.65, 1.1));
    }

    #[test]
    fn reconfigure_keeps_table_for_same_seed() {
        let g = Generator::make(8, 1.0, 1.0, 4, 0.5, 2.0).unwrap();
        let g2 = g.reconfigured(g.config().with_octaves(6)).unwrap();
        assert!(std::ptr::eq(g.permutation(), g2.permutation()));
        let g3 = g.reconfigured(g.config().with_seed(9)).unwrap();
        assert_ne!(g.permutation(), g3.permutation());
        assert!(g.reconfigured(g.config().with_octaves(0)).is_err());
    }

    #[test]
    fn modifier_shares_permutation() {
        let g = Generator::make(8, 1.0, 1.0, 4, 0.5, 2.0).unwrap();
        let inv = g.modified(Modifier::new(ModifierKind::Invert, 0.0));
        assert!(std::ptr::eq(g.permutation(), inv.permutation()));
        assert_eq!(inv.noise2(0.4, 0.9), -g.noise2(0.4, 0.9));
        assert!(g.modifiers().is_empty());
    }

    #[test]
    fn kernels_differ() {
        let p = Generator::make(77, 1.0, 1.0, 1, 0.5, 2.0).unwrap();
        let s = p.with_kernel(Kernel::Simplex);
        assert_eq!(s.kernel(), Kernel::Simplex);
        assert_ne!(p.noise2(0.3, 0.3), s.noise2(0.3, 0.3));
    }

    #[test]
    fn wood_stays_in_unit_interval() {
        let g = Generator::make(3, 1.0, 1.0, 3, 0.5, 2.0).unwrap();
        for i in 0..200 {
            let t = i as f64 * 0.173;
            let w = g.wood2(t, t * 0.7);
            assert!((0.0..1.0).contains(&w));
            assert!(g.marble3(t, 0.5, -t).abs() <= 1.0);
        }
    }

    #[test]
    fn field_views_select_the_mode() {
        let g = Generator::make(13, 1.0, 1.0, 4, 0.5, 2.0).unwrap();
        let p = Point::D3(0.2, 0.4, 0.6);
        assert_eq!(g.evaluate(p).unwrap(), g.fractal3(0.2, 0.4, 0.6));
        assert_eq!(
            g.in_mode(SampleMode::Ridged).evaluate(p).unwrap(),
            g.ridged3(0.2, 0.4, 0.6)
        );
    }

    #[test]
    fn point_helpers() {
        assert_eq!(Point::from_slice(&[1.0, 2.0]), Some(Point::D2(1.0, 2.0)));
        assert_eq!(Point::from_slice(&[]), None);
        assert_eq!(Point::from_slice(&[0.0; 5]), None);
        assert_eq!(Point::D4(1.0, 2.0, 3.0, 4.0).scaled(2.0).x(), 2.0);
        assert_eq!(Point::D3(0.0, 0.0, 0.0).dims(), 3);
    }
}
