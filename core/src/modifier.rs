use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Normalize,
    Clamp,
    Bias,
    Gain,
    Curve,
    Invert,
    Abs,
    Power,
    Sqrt,
    Log,
    Exp,
    Sin,
    Cos,
    Tan,
    Wrap,
    Mirror,
    Quantize,
    Threshold,
    Smoothstep,
    Smootherstep,
}

impl ModifierKind {
    // Parameter used by `Modifier::of`; identity-like where one exists
    pub fn default_param(self) -> f64 {
        match self {
            ModifierKind::Bias | ModifierKind::Gain => 0.5,
            ModifierKind::Wrap => 2.0,
            ModifierKind::Quantize => 0.1,
            ModifierKind::Threshold => 0.0,
            _ => 1.0,
        }
    }
}

// Stateless scalar post-processor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub param: f64,
}

impl Modifier {
    pub fn new(kind: ModifierKind, param: f64) -> Self {
        Self { kind, param }
    }

    pub fn of(kind: ModifierKind) -> Self {
        Self::new(kind, kind.default_param())
    }

    pub fn apply(&self, v: f64) -> f64 {
        let p = self.param;
        match self.kind {
            ModifierKind::Normalize => normalized(v).clamp(0.0, 1.0),
            ModifierKind::Clamp => v.max(-p.abs()).min(p.abs()),
            ModifierKind::Bias => bias(v.clamp(0.0, 1.0), p),
            ModifierKind::Gain => gain(v.clamp(0.0, 1.0), p),
            ModifierKind::Curve => smoothstep(0.0, 1.0, v),
            ModifierKind::Invert => -v,
            ModifierKind::Abs => v.abs(),
            ModifierKind::Power => v.signum() * v.abs().powf(p),
            ModifierKind::Sqrt => v.signum() * v.abs().sqrt(),
            ModifierKind::Log => v.signum() * v.abs().ln_1p(),
            ModifierKind::Exp => v.signum() * v.abs().exp_m1(),
            ModifierKind::Sin => (v * p).sin(),
            ModifierKind::Cos => (v * p).cos(),
            ModifierKind::Tan => (v * p).tan(),
            ModifierKind::Wrap => wrap(v, p.abs()),
            ModifierKind::Mirror => mirror(v, p.abs()),
            ModifierKind::Quantize => {
                if p == 0.0 {
                    v
                } else {
                    (v / p).round() * p
                }
            }
            ModifierKind::Threshold => {
                if v >= p {
                    1.0
                } else {
                    0.0
                }
            }
            ModifierKind::Smoothstep => smoothstep(0.0, p, v),
            ModifierKind::Smootherstep => smootherstep(0.0, p, v),
        }
    }
}

// Map [-1, 1] onto [0, 1]
pub fn normalized(v: f64) -> f64 {
    (v + 1.0) * 0.5
}

// Lerp between `min` and `max` by `v` clamped into [0, 1]
pub fn scale(v: f64, min: f64, max: f64) -> f64 {
    min + v.clamp(0.0, 1.0) * (max - min)
}

// Perlin's bias curve: bias(0.5, b) == b
pub fn bias(v: f64, b: f64) -> f64 {
    v.powf(b.ln() / 0.5f64.ln())
}

// Bias mirrored around 0.5
pub fn gain(v: f64, g: f64) -> f64 {
    if v < 0.5 {
        bias(v * 2.0, g) / 2.0
    } else {
        1.0 - bias((1.0 - v) * 2.0, g) / 2.0
    }
}

pub fn smoothstep(edge0: f64, edge1: f64, v: f64) -> f64 {
    if edge1 == edge0 {
        return if v < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((v - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn smootherstep(edge0: f64, edge1: f64, v: f64) -> f64 {
    if edge1 == edge0 {
        return if v < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((v - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// v mod period, recentred on [-period/2, period/2)
fn wrap(v: f64, period: f64) -> f64 {
    if period == 0.0 {
        return v;
    }
    let half = period * 0.5;
    (v + half).rem_euclid(period) - half
}

// Triangle wave that follows v on [-amp, amp] and folds back beyond it
fn mirror(v: f64, amp: f64) -> f64 {
    if amp == 0.0 {
        return 0.0;
    }
    let t = (v + amp).rem_euclid(4.0 * amp);
    if t < 2.0 * amp { t - amp } else { 3.0 * amp - t }
}
