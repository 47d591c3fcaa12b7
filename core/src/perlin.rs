use crate::gradients::{dot1, dot2, dot3, dot4};
use crate::permutation::Permutation;

// Per-dimension output scale. The raw 1D kernel peaks at 0.5 and the 4D one
// at 1.5 in the middle of a cell; 2D and 3D already peak near 1.
const SCALE_1D: f64 = 2.0;
const SCALE_4D: f64 = 2.0 / 3.0;

// Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
// First and second derivatives vanish at t=0 and t=1, so cells join C2-smooth
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// Lattice cell index wrapped into the permutation domain, plus the offset
// inside the cell
#[inline]
fn cell(v: f64) -> (usize, f64) {
    let f = v.floor();
    ((f as i64 & 255) as usize, v - f)
}

pub fn perlin1(perm: &Permutation, x: f64) -> f64 {
    let (xi, xf) = cell(x);
    let u = fade(xf);

    let a = dot1(perm.hash(xi), xf);
    let b = dot1(perm.hash(xi + 1), xf - 1.0);
    (lerp(a, b, u) * SCALE_1D).clamp(-1.0, 1.0)
}

pub fn perlin2(perm: &Permutation, x: f64, y: f64) -> f64 {
    // Which square, and where within it
    let (xi, xf) = cell(x);
    let (yi, yf) = cell(y);
    let u = fade(xf);
    let v = fade(yf);

    // Hash the four corners; indices stay below 512 thanks to the doubled table
    let a = perm.hash(xi) + yi;
    let b = perm.hash(xi + 1) + yi;
    let aa = perm.hash(a);
    let ab = perm.hash(a + 1);
    let ba = perm.hash(b);
    let bb = perm.hash(b + 1);

    let x1 = lerp(dot2(aa, xf, yf), dot2(ba, xf - 1.0, yf), u);
    let x2 = lerp(dot2(ab, xf, yf - 1.0), dot2(bb, xf - 1.0, yf - 1.0), u);
    lerp(x1, x2, v).clamp(-1.0, 1.0)
}

pub fn perlin3(perm: &Permutation, x: f64, y: f64, z: f64) -> f64 {
    let (xi, xf) = cell(x);
    let (yi, yf) = cell(y);
    let (zi, zf) = cell(z);
    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let a = perm.hash(xi) + yi;
    let aa = perm.hash(a) + zi;
    let ab = perm.hash(a + 1) + zi;
    let b = perm.hash(xi + 1) + yi;
    let ba = perm.hash(b) + zi;
    let bb = perm.hash(b + 1) + zi;

    let x1 = lerp(
        dot3(perm.hash(aa), xf, yf, zf),
        dot3(perm.hash(ba), xf - 1.0, yf, zf),
        u,
    );
    let x2 = lerp(
        dot3(perm.hash(ab), xf, yf - 1.0, zf),
        dot3(perm.hash(bb), xf - 1.0, yf - 1.0, zf),
        u,
    );
    let y1 = lerp(x1, x2, v);

    let x3 = lerp(
        dot3(perm.hash(aa + 1), xf, yf, zf - 1.0),
        dot3(perm.hash(ba + 1), xf - 1.0, yf, zf - 1.0),
        u,
    );
    let x4 = lerp(
        dot3(perm.hash(ab + 1), xf, yf - 1.0, zf - 1.0),
        dot3(perm.hash(bb + 1), xf - 1.0, yf - 1.0, zf - 1.0),
        u,
    );
    let y2 = lerp(x3, x4, v);

    lerp(y1, y2, w).clamp(-1.0, 1.0)
}

pub fn perlin4(perm: &Permutation, x: f64, y: f64, z: f64, w: f64) -> f64 {
    let (xi, xf) = cell(x);
    let (yi, yf) = cell(y);
    let (zi, zf) = cell(z);
    let (wi, wf) = cell(w);
    let u = fade(xf);
    let v = fade(yf);
    let s = fade(zf);
    let t = fade(wf);

    let a = perm.hash(xi) + yi;
    let b = perm.hash(xi + 1) + yi;
    let aa = perm.hash(a) + zi;
    let ab = perm.hash(a + 1) + zi;
    let ba = perm.hash(b) + zi;
    let bb = perm.hash(b + 1) + zi;

    let aaa = perm.hash(aa) + wi;
    let aab = perm.hash(aa + 1) + wi;
    let aba = perm.hash(ab) + wi;
    let abb = perm.hash(ab + 1) + wi;
    let baa = perm.hash(ba) + wi;
    let bab = perm.hash(ba + 1) + wi;
    let bba = perm.hash(bb) + wi;
    let bbb = perm.hash(bb + 1) + wi;

    let (x0, x1) = (xf, xf - 1.0);
    let (y0, y1) = (yf, yf - 1.0);
    let (z0, z1) = (zf, zf - 1.0);
    let (w0, w1) = (wf, wf - 1.0);

    // Corner naming: n<x><y><z><w>, 1 meaning the far side of that axis
    let n0000 = dot4(perm.hash(aaa), x0, y0, z0, w0);
    let n1000 = dot4(perm.hash(baa), x1, y0, z0, w0);
    let n0100 = dot4(perm.hash(aba), x0, y1, z0, w0);
    let n1100 = dot4(perm.hash(bba), x1, y1, z0, w0);
    let n0010 = dot4(perm.hash(aab), x0, y0, z1, w0);
    let n1010 = dot4(perm.hash(bab), x1, y0, z1, w0);
    let n0110 = dot4(perm.hash(abb), x0, y1, z1, w0);
    let n1110 = dot4(perm.hash(bbb), x1, y1, z1, w0);
    let n0001 = dot4(perm.hash(aaa + 1), x0, y0, z0, w1);
    let n1001 = dot4(perm.hash(baa + 1), x1, y0, z0, w1);
    let n0101 = dot4(perm.hash(aba + 1), x0, y1, z0, w1);
    let n1101 = dot4(perm.hash(bba + 1), x1, y1, z0, w1);
    let n0011 = dot4(perm.hash(aab + 1), x0, y0, z1, w1);
    let n1011 = dot4(perm.hash(bab + 1), x1, y0, z1, w1);
    let n0111 = dot4(perm.hash(abb + 1), x0, y1, z1, w1);
    let n1111 = dot4(perm.hash(bbb + 1), x1, y1, z1, w1);

    // One axis at a time: x, then y, z, w
    let y00 = lerp(lerp(n0000, n1000, u), lerp(n0100, n1100, u), v);
    let y10 = lerp(lerp(n0010, n1010, u), lerp(n0110, n1110, u), v);
    let y01 = lerp(lerp(n0001, n1001, u), lerp(n0101, n1101, u), v);
    let y11 = lerp(lerp(n0011, n1011, u), lerp(n0111, n1111, u), v);

    let z0 = lerp(y00, y10, s);
    let z1 = lerp(y01, y11, s);
    (lerp(z0, z1, t) * SCALE_4D).clamp(-1.0, 1.0)
}
