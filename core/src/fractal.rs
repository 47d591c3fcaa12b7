use serde::{Deserialize, Serialize};

// Octave schedule shared by every fractal derivative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octaves {
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Octaves {
    pub fn new(octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            octaves,
            persistence,
            lacunarity,
        }
    }

    // (frequency multiplier, amplitude) of each octave, first octave at (1, 1)
    pub fn layers(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let mut freq = 1.0;
        let mut amp = 1.0;
        (0..self.octaves).map(move |_| {
            let layer = (freq, amp);
            freq *= self.lacunarity;
            amp *= self.persistence;
            layer
        })
    }

    // Sum of the per-octave amplitudes; the bound for unnormalised sums
    pub fn amplitude_sum(&self) -> f64 {
        self.layers().map(|(_, amp)| amp).sum()
    }
}

// The functions below take the base noise as a closure `base(freq)` that
// evaluates the kernel at the query point scaled by `freq`. They are generic
// over dimension and kernel.

// Fractal Brownian motion, normalised by the amplitude sum
pub fn fbm(octaves: &Octaves, base: impl Fn(f64) -> f64) -> f64 {
    let mut total = 0.0;
    let mut max_amp = 0.0;
    for (freq, amp) in octaves.layers() {
        total += base(freq) * amp;
        max_amp += amp;
    }
    if max_amp == 0.0 { 0.0 } else { total / max_amp }
}

// Sum of |base| per octave, left unnormalised
pub fn turbulence(octaves: &Octaves, base: impl Fn(f64) -> f64) -> f64 {
    octaves
        .layers()
        .map(|(freq, amp)| base(freq).abs() * amp)
        .sum()
}

// Turbulence divided by the amplitude sum, so it stays in [0, 1]
pub fn turbulence_normalized(octaves: &Octaves, base: impl Fn(f64) -> f64) -> f64 {
    let sum = octaves.amplitude_sum();
    if sum == 0.0 {
        0.0
    } else {
        turbulence(octaves, base) / sum
    }
}

// Ridged multifractal: each octave's ridge signal is damped by the previous
// octaves, which keeps valleys smooth and ridges sharp
pub fn ridged(octaves: &Octaves, base: impl Fn(f64) -> f64) -> f64 {
    let mut total = 0.0;
    let mut weight = 1.0;
    for (freq, amp) in octaves.layers() {
        let signal = 1.0 - base(freq).abs();
        total += signal * amp * weight;
        weight = (signal * weight).clamp(0.0, 1.0);
    }
    total
}

// fBm over 2|base| − 1
pub fn billow(octaves: &Octaves, base: impl Fn(f64) -> f64) -> f64 {
    fbm(octaves, |freq| 2.0 * base(freq).abs() - 1.0)
}
