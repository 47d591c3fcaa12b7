use std::fmt;

use crate::NoiseError;

// Ken Perlin's reference permutation from the improved-noise paper
const CLASSIC: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

// SplitMix64: a counter-based generator with a fixed, published output sequence.
// The permutation shuffle is pinned to it so equal seeds give equal tables on
// every platform and in every port that follows the same recipe.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    // Uniform integer in [0, bound) by multiply-shift; bound must be non-zero
    pub fn below(&mut self, bound: usize) -> usize {
        ((u128::from(self.next_u64()) * bound as u128) >> 64) as usize
    }

    // Uniform real in [0, 1) built from the top 53 bits
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

// 256-entry bijection of 0..=255, stored twice so lattice hashing can index
// up to 511 without wrapping.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    table: [u8; 512],
}

impl Permutation {
    // Fisher–Yates over the identity sequence, driven by SplitMix64(seed)
    pub fn from_seed(seed: u32) -> Self {
        let mut p = [0u8; 256];
        for (i, slot) in p.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut rng = SplitMix64::new(u64::from(seed));
        for i in (1..256).rev() {
            let j = rng.below(i + 1);
            p.swap(i, j);
        }
        Self::doubled(&p)
    }

    // Inject a precomputed table, e.g. one produced by another implementation
    pub fn from_table(table: &[u8; 256]) -> Result<Self, NoiseError> {
        let mut seen = [false; 256];
        for &value in table {
            if seen[value as usize] {
                return Err(NoiseError::InvalidPermutation { value });
            }
            seen[value as usize] = true;
        }
        Ok(Self::doubled(table))
    }

    pub fn classic() -> Self {
        Self::doubled(&CLASSIC)
    }

    fn doubled(p: &[u8; 256]) -> Self {
        let mut table = [0u8; 512];
        table[..256].copy_from_slice(p);
        table[256..].copy_from_slice(p);
        Self { table }
    }

    #[inline]
    pub fn hash(&self, index: usize) -> usize {
        self.table[index] as usize
    }

    pub fn as_slice(&self) -> &[u8; 512] {
        &self.table
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permutation")
            .field("head", &&self.table[..8])
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Permutation, SplitMix64};

    fn is_bijection(p: &Permutation) -> bool {
        let mut seen = [false; 256];
        for &v in &p.as_slice()[..256] {
            if seen[v as usize] {
                return false;
            }
            seen[v as usize] = true;
        }
        true
    }

    #[test]
    fn splitmix_reference_outputs() {
        // Published SplitMix64 sequence for state 0
        let mut rng = SplitMix64::new(0);
        assert_eq!(rng.next_u64(), 0xE220_A839_7B1D_CDAF);
        assert_eq!(rng.next_u64(), 0x6E78_9E6A_A1B9_65F4);
        assert_eq!(rng.next_u64(), 0x06C4_5D18_8009_454F);
    }

    #[test]
    fn doubled_halves_match() {
        for seed in [0, 1, 1337, u32::MAX] {
            let p = Permutation::from_seed(seed);
            let t = p.as_slice();
            for i in 0..256 {
                assert_eq!(t[i], t[i + 256]);
            }
            assert!(is_bijection(&p));
        }
    }

    #[test]
    fn seed_vectors_are_pinned() {
        let p = Permutation::from_seed(0);
        assert_eq!(&p.as_slice()[..8], &SEED_0_HEAD);
        let p = Permutation::from_seed(1337);
        assert_eq!(&p.as_slice()[..8], &SEED_1337_HEAD);
    }

    #[test]
    fn equal_seeds_equal_tables() {
        assert_eq!(Permutation::from_seed(42), Permutation::from_seed(42));
        assert_ne!(Permutation::from_seed(42), Permutation::from_seed(43));
    }

    #[test]
    fn injected_table_is_checked() {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = 255 - i as u8;
        }
        let p = Permutation::from_table(&table).unwrap();
        assert_eq!(p.hash(0), 255);
        assert_eq!(p.hash(256), 255);

        table[10] = table[11];
        assert!(Permutation::from_table(&table).is_err());
    }

    #[test]
    fn classic_starts_with_reference_values() {
        let p = Permutation::classic();
        assert_eq!(&p.as_slice()[..4], &[151, 160, 137, 91]);
        assert!(is_bijection(&p));
    }

    #[test]
    fn below_stays_in_bounds() {
        let mut rng = SplitMix64::new(7);
        for bound in 1..300 {
            assert!(rng.below(bound) < bound);
        }
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    const SEED_0_HEAD: [u8; 8] = [130, 157, 1, 180, 243, 154, 40, 111];
    const SEED_1337_HEAD: [u8; 8] = [231, 122, 210, 246, 113, 211, 90, 15];
}
