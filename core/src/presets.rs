use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::NoiseError;
use crate::generator::{Generator, GeneratorConfig, Kernel, SampleMode};

// Named material looks. Each pins frequency, amplitude, octaves, persistence
// and lacunarity plus the kernel and mode it reads best in; the seed is left
// to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Terrain,
    Marble,
    Wood,
    Cloud,
    Fire,
    Water,
    Lava,
    Ice,
    Sand,
    Grass,
    Rock,
    Metal,
    Fabric,
    Paper,
    Concrete,
    Brick,
    Stone,
    Dirt,
    Snow,
    Mud,
    Gravel,
}

// frequency, amplitude, octaves, persistence, lacunarity
type Params = (f64, f64, u32, f64, f64);

impl Preset {
    pub const ALL: [Preset; 21] = [
        Preset::Terrain,
        Preset::Marble,
        Preset::Wood,
        Preset::Cloud,
        Preset::Fire,
        Preset::Water,
        Preset::Lava,
        Preset::Ice,
        Preset::Sand,
        Preset::Grass,
        Preset::Rock,
        Preset::Metal,
        Preset::Fabric,
        Preset::Paper,
        Preset::Concrete,
        Preset::Brick,
        Preset::Stone,
        Preset::Dirt,
        Preset::Snow,
        Preset::Mud,
        Preset::Gravel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Terrain => "terrain",
            Preset::Marble => "marble",
            Preset::Wood => "wood",
            Preset::Cloud => "cloud",
            Preset::Fire => "fire",
            Preset::Water => "water",
            Preset::Lava => "lava",
            Preset::Ice => "ice",
            Preset::Sand => "sand",
            Preset::Grass => "grass",
            Preset::Rock => "rock",
            Preset::Metal => "metal",
            Preset::Fabric => "fabric",
            Preset::Paper => "paper",
            Preset::Concrete => "concrete",
            Preset::Brick => "brick",
            Preset::Stone => "stone",
            Preset::Dirt => "dirt",
            Preset::Snow => "snow",
            Preset::Mud => "mud",
            Preset::Gravel => "gravel",
        }
    }

    pub fn params(self) -> Params {
        match self {
            Preset::Terrain => (1.0, 1.0, 6, 0.5, 2.0),
            Preset::Marble => (2.0, 1.0, 4, 0.5, 2.0),
            Preset::Wood => (0.5, 1.0, 3, 0.4, 2.0),
            Preset::Cloud => (0.8, 1.0, 5, 0.55, 2.0),
            Preset::Fire => (3.0, 1.0, 4, 0.6, 2.2),
            Preset::Water => (1.5, 0.8, 3, 0.45, 1.8),
            Preset::Lava => (1.2, 1.0, 4, 0.65, 2.0),
            Preset::Ice => (2.5, 0.6, 5, 0.35, 2.5),
            Preset::Sand => (8.0, 0.3, 2, 0.3, 2.0),
            Preset::Grass => (6.0, 0.5, 3, 0.5, 2.0),
            Preset::Rock => (2.0, 1.0, 6, 0.55, 2.1),
            Preset::Metal => (10.0, 0.2, 2, 0.25, 3.0),
            Preset::Fabric => (16.0, 0.25, 2, 0.3, 2.0),
            Preset::Paper => (12.0, 0.15, 3, 0.35, 2.0),
            Preset::Concrete => (5.0, 0.4, 4, 0.5, 2.0),
            Preset::Brick => (4.0, 0.5, 3, 0.45, 2.0),
            Preset::Stone => (3.0, 0.8, 5, 0.5, 2.0),
            Preset::Dirt => (4.0, 0.7, 4, 0.55, 2.0),
            Preset::Snow => (1.0, 0.4, 3, 0.35, 2.0),
            Preset::Mud => (2.0, 0.6, 4, 0.6, 1.9),
            Preset::Gravel => (20.0, 0.5, 2, 0.4, 2.5),
        }
    }

    pub fn kernel(self) -> Kernel {
        match self {
            Preset::Cloud
            | Preset::Fire
            | Preset::Water
            | Preset::Lava
            | Preset::Grass
            | Preset::Paper
            | Preset::Concrete
            | Preset::Dirt
            | Preset::Snow
            | Preset::Mud => Kernel::Simplex,
            _ => Kernel::Perlin,
        }
    }

    // Mode the preset is meant to be sampled in
    pub fn mode(self) -> SampleMode {
        match self {
            Preset::Marble => SampleMode::Marble,
            Preset::Wood => SampleMode::Wood,
            Preset::Cloud | Preset::Snow => SampleMode::Billow,
            Preset::Fire | Preset::Lava | Preset::Gravel => SampleMode::Turbulence,
            Preset::Ice | Preset::Rock | Preset::Stone => SampleMode::Ridged,
            _ => SampleMode::Fractal,
        }
    }

    pub fn config(self, seed: u32) -> GeneratorConfig {
        let (frequency, amplitude, octaves, persistence, lacunarity) = self.params();
        GeneratorConfig::new(seed, frequency, amplitude, octaves, persistence, lacunarity)
    }

    pub fn generator(self, seed: u32) -> Result<Generator, NoiseError> {
        Generator::new(self.config(seed), self.kernel())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = NoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| NoiseError::UnknownPreset {
                name: wanted.to_string(),
            })
    }
}
