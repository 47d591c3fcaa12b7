use noise_core::GeneratorConfig;
use tracing::debug;

use crate::error::StorageError;

// seed u32 | frequency f64 | amplitude f64 | octaves u32 | persistence f64 |
// lacunarity f64, all little-endian, no header
pub const CONFIG_BLOB_LEN: usize = 40;

pub fn encode_config(config: &GeneratorConfig) -> [u8; CONFIG_BLOB_LEN] {
    let mut out = [0u8; CONFIG_BLOB_LEN];
    let mut at = 0;
    let mut put = |bytes: &[u8]| {
        out[at..at + bytes.len()].copy_from_slice(bytes);
        at += bytes.len();
    };
    put(&config.seed.to_le_bytes());
    put(&config.frequency.to_le_bytes());
    put(&config.amplitude.to_le_bytes());
    put(&config.octaves.to_le_bytes());
    put(&config.persistence.to_le_bytes());
    put(&config.lacunarity.to_le_bytes());
    out
}

// Reads fixed-width fields off the front of a slice already checked for length
struct Fields<'a> {
    rest: &'a [u8],
}

impl Fields<'_> {
    fn take<const W: usize>(&mut self) -> [u8; W] {
        let (head, tail) = self.rest.split_at(W);
        self.rest = tail;
        let mut out = [0u8; W];
        out.copy_from_slice(head);
        out
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn f64(&mut self) -> f64 {
        f64::from_le_bytes(self.take())
    }
}

// Inverse of `encode_config`. The decoded configuration is validated, so a
// blob that round-trips is always buildable.
pub fn decode_config(bytes: &[u8]) -> Result<GeneratorConfig, StorageError> {
    if bytes.len() != CONFIG_BLOB_LEN {
        debug!(len = bytes.len(), "rejected config blob");
        return Err(StorageError::Format {
            expected: CONFIG_BLOB_LEN,
            found: bytes.len(),
        });
    }
    let mut f = Fields { rest: bytes };
    let config = GeneratorConfig {
        seed: f.u32(),
        frequency: f.f64(),
        amplitude: f.f64(),
        octaves: f.u32(),
        persistence: f.f64(),
        lacunarity: f.f64(),
    };
    config.validate()?;
    Ok(config)
}
