// Fixed gradient sets shared by both kernels

pub const GRAD1: [f64; 2] = [1.0, -1.0];

// Four axis vectors followed by the four diagonals
pub const GRAD2: [[f64; 2]; 8] = [
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
];

// Midpoints of the twelve edges of the cube [-1, 1]^3
pub const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

// Midpoints of the 32 edges of the 4D hypercube: one zero coordinate, three ±1
pub const GRAD4: [[f64; 4]; 32] = [
    [0.0, 1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, -1.0],
    [0.0, 1.0, -1.0, 1.0],
    [0.0, 1.0, -1.0, -1.0],
    [0.0, -1.0, 1.0, 1.0],
    [0.0, -1.0, 1.0, -1.0],
    [0.0, -1.0, -1.0, 1.0],
    [0.0, -1.0, -1.0, -1.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, -1.0],
    [1.0, 0.0, -1.0, 1.0],
    [1.0, 0.0, -1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0, 1.0],
    [-1.0, 0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, -1.0],
    [1.0, -1.0, 0.0, 1.0],
    [1.0, -1.0, 0.0, -1.0],
    [-1.0, 1.0, 0.0, 1.0],
    [-1.0, 1.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0, 1.0],
    [-1.0, -1.0, 0.0, -1.0],
    [1.0, 1.0, 1.0, 0.0],
    [1.0, 1.0, -1.0, 0.0],
    [1.0, -1.0, 1.0, 0.0],
    [1.0, -1.0, -1.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0],
    [-1.0, 1.0, -1.0, 0.0],
    [-1.0, -1.0, 1.0, 0.0],
    [-1.0, -1.0, -1.0, 0.0],
];

#[inline]
pub fn dot1(hash: usize, x: f64) -> f64 {
    GRAD1[hash & 1] * x
}

#[inline]
pub fn dot2(hash: usize, x: f64, y: f64) -> f64 {
    let g = &GRAD2[hash & 7];
    g[0] * x + g[1] * y
}

#[inline]
pub fn dot3(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let g = &GRAD3[hash % 12];
    g[0] * x + g[1] * y + g[2] * z
}

#[inline]
pub fn dot4(hash: usize, x: f64, y: f64, z: f64, w: f64) -> f64 {
    let g = &GRAD4[hash & 31];
    g[0] * x + g[1] * y + g[2] * z + g[3] * w
}

#[cfg(test)]
mod tests {
    use super::{GRAD3, GRAD4};

    #[test]
    fn edge_gradients_have_one_zero() {
        for g in GRAD3 {
            assert_eq!(g.iter().filter(|c| **c == 0.0).count(), 1);
        }
        for g in GRAD4 {
            assert_eq!(g.iter().filter(|c| **c == 0.0).count(), 1);
        }
    }

    #[test]
    fn four_d_set_has_no_duplicates() {
        for (i, a) in GRAD4.iter().enumerate() {
            for b in &GRAD4[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
