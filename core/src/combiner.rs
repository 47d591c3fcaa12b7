use serde::{Deserialize, Serialize};

use crate::generator::{Generator, Point, SampleMode};
use crate::modifier::smoothstep;
use crate::perlin::lerp;
use crate::{NoiseError, NoiseField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Min,
    Max,
    Average,
    WeightedAverage,
    Blend,
    Select,
}

// Ordered (generator, weight) children merged by one operation.
// Weights only matter for Add, Subtract and WeightedAverage.
#[derive(Debug, Clone)]
pub struct Combiner {
    op: Operation,
    threshold: f64,
    // Width of the smooth transition around `threshold` for Select; 0 is a hard switch
    falloff: f64,
    mode: SampleMode,
    children: Vec<(Generator, f64)>,
}

impl Combiner {
    pub fn new(op: Operation) -> Self {
        Self {
            op,
            threshold: 0.0,
            falloff: 0.0,
            mode: SampleMode::Fractal,
            children: Vec::new(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_falloff(mut self, falloff: f64) -> Self {
        self.falloff = falloff.abs();
        self
    }

    // Mode the children are sampled in
    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn operation(&self) -> Operation {
        self.op
    }

    pub fn set_operation(&mut self, op: Operation) {
        self.op = op;
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn add(&mut self, generator: Generator, weight: f64) {
        self.children.push((generator, weight));
    }

    // Order-preserving removal, O(n) in the children after `index`. Order
    // matters for Subtract, Divide, Blend and Select.
    pub fn remove(&mut self, index: usize) -> Option<(Generator, f64)> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn generator(&self, index: usize) -> Option<&Generator> {
        self.children.get(index).map(|(g, _)| g)
    }

    pub fn weight(&self, index: usize) -> Option<f64> {
        self.children.get(index).map(|(_, w)| *w)
    }

    // Returns false when `index` is out of range
    pub fn set_weight(&mut self, index: usize, weight: f64) -> bool {
        match self.children.get_mut(index) {
            Some(child) => {
                child.1 = weight;
                true
            }
            None => false,
        }
    }

    pub fn evaluate2(&self, x: f64, y: f64) -> Result<f64, NoiseError> {
        self.evaluate(Point::D2(x, y))
    }

    pub fn evaluate3(&self, x: f64, y: f64, z: f64) -> Result<f64, NoiseError> {
        self.evaluate(Point::D3(x, y, z))
    }

    pub fn evaluate4(&self, x: f64, y: f64, z: f64, w: f64) -> Result<f64, NoiseError> {
        self.evaluate(Point::D4(x, y, z, w))
    }

    fn value(&self, index: usize, p: Point) -> f64 {
        self.children[index].0.sample(self.mode, p)
    }

    fn select(&self, p: Point) -> f64 {
        let control = self.value(2, p);
        let (low, high) = (self.value(0, p), self.value(1, p));
        if self.falloff == 0.0 {
            return if control >= self.threshold { high } else { low };
        }
        let t = smoothstep(
            self.threshold - self.falloff,
            self.threshold + self.falloff,
            control,
        );
        lerp(low, high, t)
    }
}

impl NoiseField for Combiner {
    fn evaluate(&self, p: Point) -> Result<f64, NoiseError> {
        let n = self.children.len();
        if n == 0 {
            return Ok(0.0);
        }
        let values = move || (0..n).map(move |i| (self.value(i, p), self.children[i].1));

        let out: f64 = match self.op {
            Operation::Add => values().map(|(v, w)| v * w).sum(),
            Operation::Subtract => {
                let first = self.value(0, p);
                first - values().skip(1).map(|(v, w)| v * w).sum::<f64>()
            }
            Operation::Multiply => values().map(|(v, _)| v).product(),
            Operation::Divide => {
                let mut out = self.value(0, p);
                for (index, (v, _)) in values().enumerate().skip(1) {
                    if v == 0.0 {
                        return Err(NoiseError::DivisionByZero { index });
                    }
                    out /= v;
                }
                out
            }
            Operation::Min => values().map(|(v, _)| v).fold(f64::INFINITY, f64::min),
            Operation::Max => values().map(|(v, _)| v).fold(f64::NEG_INFINITY, f64::max),
            Operation::Average => values().map(|(v, _)| v).sum::<f64>() / n as f64,
            Operation::WeightedAverage => {
                let weight_sum: f64 = self.children.iter().map(|(_, w)| w).sum();
                if weight_sum == 0.0 {
                    return Err(NoiseError::WeightSumZero);
                }
                values().map(|(v, w)| v * w).sum::<f64>() / weight_sum
            }
            Operation::Blend | Operation::Select if n < 3 => {
                return Err(NoiseError::EmptyCombiner {
                    op: self.op,
                    children: n,
                });
            }
            Operation::Blend => {
                let t = (self.value(2, p) + 1.0) * 0.5;
                lerp(self.value(0, p), self.value(1, p), t)
            }
            Operation::Select => self.select(p),
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{Combiner, Operation};
    use crate::generator::{Generator, Point, SampleMode};
    use crate::modifier::{Modifier, ModifierKind};
    use crate::{NoiseError, NoiseField};

    fn gen_with(seed: u32) -> Generator {
        Generator::make(seed, 1.0, 1.0, 3, 0.5, 2.0).unwrap()
    }

    // Generator whose output is pinned to `value` everywhere
    fn constant(value: f64) -> Generator {
        gen_with(1)
            .modified(Modifier::new(ModifierKind::Threshold, f64::NEG_INFINITY))
            .modified(Modifier::new(ModifierKind::Clamp, value.abs()))
            .modified(Modifier::new(
                if value < 0.0 {
                    ModifierKind::Invert
                } else {
                    ModifierKind::Abs
                },
                0.0,
            ))
    }

    fn with_children(op: Operation, children: &[(Generator, f64)]) -> Combiner {
        let mut c = Combiner::new(op);
        for (g, w) in children {
            c.add(g.clone(), *w);
        }
        c
    }

    const P: Point = Point::D2(0.37, 0.71);

    #[test]
    fn constants_are_constant() {
        assert_eq!(constant(0.5).fractal2(3.3, 1.1), 0.5);
        assert_eq!(constant(-0.25).fractal2(0.3, 9.1), -0.25);
        assert_eq!(constant(0.0).fractal2(0.3, 9.1), 0.0);
    }

    #[test]
    fn empty_combiner_is_zero_for_every_op() {
        for op in [
            Operation::Add,
            Operation::Divide,
            Operation::WeightedAverage,
            Operation::Blend,
            Operation::Select,
        ] {
            assert_eq!(Combiner::new(op).evaluate(P).unwrap(), 0.0);
        }
    }

    #[test]
    fn arithmetic_ops() {
        let kids = [(constant(0.5), 2.0), (constant(0.25), 4.0)];
        let eval = |op| with_children(op, &kids).evaluate(P).unwrap();
        assert_eq!(eval(Operation::Add), 2.0);
        assert_eq!(eval(Operation::Subtract), -0.5);
        assert_eq!(eval(Operation::Multiply), 0.125);
        assert_eq!(eval(Operation::Divide), 2.0);
        assert_eq!(eval(Operation::Min), 0.25);
        assert_eq!(eval(Operation::Max), 0.5);
        assert_eq!(eval(Operation::Average), 0.375);
        assert!((eval(Operation::WeightedAverage) - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn divide_by_zero_is_reported() {
        let c = with_children(
            Operation::Divide,
            &[(constant(0.5), 1.0), (constant(0.0), 1.0)],
        );
        assert_eq!(c.evaluate(P), Err(NoiseError::DivisionByZero { index: 1 }));
    }

    #[test]
    fn zero_weight_sum_is_reported() {
        let c = with_children(
            Operation::WeightedAverage,
            &[(gen_with(1), 1.0), (gen_with(2), -1.0)],
        );
        assert_eq!(c.evaluate(P), Err(NoiseError::WeightSumZero));
    }

    #[test]
    fn blend_and_select_need_three() {
        for op in [Operation::Blend, Operation::Select] {
            let c = with_children(op, &[(gen_with(1), 1.0), (gen_with(2), 1.0)]);
            assert_eq!(
                c.evaluate(P),
                Err(NoiseError::EmptyCombiner { op, children: 2 })
            );
        }
    }

    #[test]
    fn blend_uses_third_child_as_mix() {
        let kids = [
            (constant(-0.5), 1.0),
            (constant(0.5), 1.0),
            (constant(0.0), 1.0),
        ];
        assert_eq!(with_children(Operation::Blend, &kids).evaluate(P), Ok(0.0));
    }

    #[test]
    fn select_switches_on_threshold() {
        let kids = [
            (constant(-0.5), 1.0),
            (constant(0.5), 1.0),
            (constant(0.25), 1.0),
        ];
        let mut c = with_children(Operation::Select, &kids).with_threshold(0.2);
        assert_eq!(c.evaluate(P), Ok(0.5));
        c = c.with_threshold(0.3);
        assert_eq!(c.evaluate(P), Ok(-0.5));
        // control sits exactly in the middle of the transition band
        let soft = c.with_threshold(0.25).with_falloff(0.1);
        assert!(soft.evaluate(P).unwrap().abs() < 1e-12);
    }

    #[test]
    fn average_of_identical_children_is_the_child() {
        let g = gen_with(1337);
        let c = with_children(
            Operation::Average,
            &[(g.clone(), 1.0), (g.clone(), 1.0), (g.clone(), 1.0)],
        );
        let v = c.evaluate2(0.123, 0.456).unwrap();
        assert!((v - g.fractal2(0.123, 0.456)).abs() < 1e-12);
    }

    #[test]
    fn remove_and_weights() {
        let mut c = with_children(
            Operation::Add,
            &[(gen_with(1), 1.0), (gen_with(2), 2.0), (gen_with(3), 3.0)],
        );
        let (removed, w) = c.remove(1).unwrap();
        assert_eq!(removed.config().seed, 2);
        assert_eq!(w, 2.0);
        assert_eq!(c.len(), 2);
        assert_eq!(c.generator(1).map(|g| g.config().seed), Some(3));
        assert!(c.remove(5).is_none());
        assert!(c.set_weight(0, 0.5));
        assert!(!c.set_weight(9, 0.5));
        assert_eq!(c.weight(0), Some(0.5));
        c.clear();
        assert!(c.is_empty());
    }

    #[test]
    fn children_follow_the_combiner_mode() {
        let g = gen_with(4);
        let c = with_children(Operation::Add, &[(g.clone(), 1.0)]).with_mode(SampleMode::Ridged);
        assert_eq!(c.evaluate3(0.1, 0.2, 0.3), Ok(g.ridged3(0.1, 0.2, 0.3)));
    }
}
