use crate::gradients::{GRAD3, GRAD4, dot1};
use crate::permutation::Permutation;

// Approximate value of sqrt(3) and sqrt(5)
const SQRT_3: f64 = 1.732_050_807_568_877_2;
const SQRT_5: f64 = 2.236_067_977_499_79;

// Skewing / unskewing factors per dimension
const F2: f64 = 0.5 * (SQRT_3 - 1.0);
const G2: f64 = (3.0 - SQRT_3) / 6.0;
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;
const F4: f64 = (SQRT_5 - 1.0) / 4.0;
const G4: f64 = (5.0 - SQRT_5) / 20.0;

// Output normalisation so the nominal range is about [-1, 1].
// 1D peaks at 2 * 0.5 * 0.75^4 = 0.31640625 halfway between lattice points.
const NORM_1D: f64 = 1.0 / 0.316_406_25;
const NORM_2D: f64 = 70.0;
const NORM_3D: f64 = 32.0;
const NORM_4D: f64 = 27.0;

// Radial falloff (r² − d²)^4 · (g · d), zero outside the kernel radius
#[inline]
fn falloff(r2: f64, d2: f64, dot: f64) -> f64 {
    let t = r2 - d2;
    if t <= 0.0 {
        0.0
    } else {
        let t2 = t * t;
        t2 * t2 * dot
    }
}

// Cell floor kept as a float, plus the index wrapped into the permutation
// domain. Huge or infinite coordinates never reach integer arithmetic.
#[inline]
fn lattice(v: f64) -> (f64, usize) {
    let f = v.floor();
    (f, f.rem_euclid(256.0) as usize)
}

pub fn simplex1(perm: &Permutation, x: f64) -> f64 {
    let (i, ii) = lattice(x);
    let x0 = x - i;
    let x1 = x0 - 1.0;

    let n0 = falloff(1.0, x0 * x0, dot1(perm.hash(ii), x0));
    let n1 = falloff(1.0, x1 * x1, dot1(perm.hash(ii + 1), x1));
    (NORM_1D * (n0 + n1)).clamp(-1.0, 1.0)
}

pub fn simplex2(perm: &Permutation, xin: f64, yin: f64) -> f64 {
    // Skew input space to find the rhombus cell we are in
    let s = (xin + yin) * F2;
    let (i, ii) = lattice(xin + s);
    let (j, jj) = lattice(yin + s);

    // Unskew the cell origin back and take the offset from it
    let t = (i + j) * G2;
    let x0 = xin - (i - t);
    let y0 = yin - (j - t);

    // Lower or upper triangle of the rhombus
    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f64 + G2;
    let y1 = y0 - j1 as f64 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let g0 = &GRAD3[perm.hash(ii + perm.hash(jj)) % 12];
    let g1 = &GRAD3[perm.hash(ii + i1 + perm.hash(jj + j1)) % 12];
    let g2 = &GRAD3[perm.hash(ii + 1 + perm.hash(jj + 1)) % 12];

    let n0 = falloff(0.5, x0 * x0 + y0 * y0, g0[0] * x0 + g0[1] * y0);
    let n1 = falloff(0.5, x1 * x1 + y1 * y1, g1[0] * x1 + g1[1] * y1);
    let n2 = falloff(0.5, x2 * x2 + y2 * y2, g2[0] * x2 + g2[1] * y2);

    (NORM_2D * (n0 + n1 + n2)).clamp(-1.0, 1.0)
}

pub fn simplex3(perm: &Permutation, xin: f64, yin: f64, zin: f64) -> f64 {
    let s = (xin + yin + zin) * F3;
    let (i, ii) = lattice(xin + s);
    let (j, jj) = lattice(yin + s);
    let (k, kk) = lattice(zin + s);

    let t = (i + j + k) * G3;
    let x0 = xin - (i - t);
    let y0 = yin - (j - t);
    let z0 = zin - (k - t);

    // Pick one of the six tetrahedra by ordering the offsets
    let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
        if y0 >= z0 {
            ((1, 0, 0), (1, 1, 0))
        } else if x0 >= z0 {
            ((1, 0, 0), (1, 0, 1))
        } else {
            ((0, 0, 1), (1, 0, 1))
        }
    } else if y0 < z0 {
        ((0, 0, 1), (0, 1, 1))
    } else if x0 < z0 {
        ((0, 1, 0), (0, 1, 1))
    } else {
        ((0, 1, 0), (1, 1, 0))
    };

    let x1 = x0 - i1 as f64 + G3;
    let y1 = y0 - j1 as f64 + G3;
    let z1 = z0 - k1 as f64 + G3;
    let x2 = x0 - i2 as f64 + 2.0 * G3;
    let y2 = y0 - j2 as f64 + 2.0 * G3;
    let z2 = z0 - k2 as f64 + 2.0 * G3;
    let x3 = x0 - 1.0 + 3.0 * G3;
    let y3 = y0 - 1.0 + 3.0 * G3;
    let z3 = z0 - 1.0 + 3.0 * G3;

    let hash = |a: usize, b: usize, c: usize| {
        perm.hash(ii + a + perm.hash(jj + b + perm.hash(kk + c))) % 12
    };

    let corner = |h: usize, x: f64, y: f64, z: f64| {
        let g = &GRAD3[h];
        falloff(0.6, x * x + y * y + z * z, g[0] * x + g[1] * y + g[2] * z)
    };

    let n0 = corner(hash(0, 0, 0), x0, y0, z0);
    let n1 = corner(hash(i1, j1, k1), x1, y1, z1);
    let n2 = corner(hash(i2, j2, k2), x2, y2, z2);
    let n3 = corner(hash(1, 1, 1), x3, y3, z3);

    (NORM_3D * (n0 + n1 + n2 + n3)).clamp(-1.0, 1.0)
}

pub fn simplex4(perm: &Permutation, x: f64, y: f64, z: f64, w: f64) -> f64 {
    let s = (x + y + z + w) * F4;
    let (i, ii) = lattice(x + s);
    let (j, jj) = lattice(y + s);
    let (k, kk) = lattice(z + s);
    let (l, ll) = lattice(w + s);

    let t = (i + j + k + l) * G4;
    let x0 = x - (i - t);
    let y0 = y - (j - t);
    let z0 = z - (k - t);
    let w0 = w - (l - t);

    // Rank each offset against the other three; the ranks select which of the
    // 24 simplices inside the skewed hypercube contains the point
    let mut rank = [0usize; 4];
    let offsets = [x0, y0, z0, w0];
    for a in 0..4 {
        for b in (a + 1)..4 {
            if offsets[a] > offsets[b] {
                rank[a] += 1;
            } else {
                rank[b] += 1;
            }
        }
    }
    let step = |threshold: usize| {
        [
            usize::from(rank[0] >= threshold),
            usize::from(rank[1] >= threshold),
            usize::from(rank[2] >= threshold),
            usize::from(rank[3] >= threshold),
        ]
    };
    let c1 = step(3);
    let c2 = step(2);
    let c3 = step(1);

    let hash = |c: [usize; 4]| {
        let h = perm.hash(kk + c[2] + perm.hash(ll + c[3]));
        perm.hash(ii + c[0] + perm.hash(jj + c[1] + h)) & 31
    };

    let corner = |c: [usize; 4], offset: f64| {
        let dx = x0 - c[0] as f64 + offset;
        let dy = y0 - c[1] as f64 + offset;
        let dz = z0 - c[2] as f64 + offset;
        let dw = w0 - c[3] as f64 + offset;
        let g = &GRAD4[hash(c)];
        falloff(
            0.6,
            dx * dx + dy * dy + dz * dz + dw * dw,
            g[0] * dx + g[1] * dy + g[2] * dz + g[3] * dw,
        )
    };

    let n0 = corner([0, 0, 0, 0], 0.0);
    let n1 = corner(c1, G4);
    let n2 = corner(c2, 2.0 * G4);
    let n3 = corner(c3, 3.0 * G4);
    let n4 = corner([1, 1, 1, 1], 4.0 * G4);

    (NORM_4D * (n0 + n1 + n2 + n3 + n4)).clamp(-1.0, 1.0)
}
