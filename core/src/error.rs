use thiserror::Error;

use crate::combiner::Operation;

// Every failure the noise core can report. Nothing in the crate prints these;
// callers decide what to do with them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("invalid configuration: {field} = {value}")]
    InvalidConfiguration { field: &'static str, value: f64 },

    #[error("permutation table is not a bijection of 0..=255 (value {value} repeats)")]
    InvalidPermutation { value: u8 },

    #[error("division by zero: child {index} evaluated to 0")]
    DivisionByZero { index: usize },

    #[error("weighted average with a zero weight sum")]
    WeightSumZero,

    #[error("{op:?} needs 3 children, combiner has {children}")]
    EmptyCombiner { op: Operation, children: usize },

    #[error("sampler axis {axis} has unusable length {len}")]
    SamplerShape { axis: usize, len: usize },

    #[error("grid holds {found} values but its shape needs {expected}")]
    GridLength { expected: usize, found: usize },

    #[error("unknown preset {name:?}")]
    UnknownPreset { name: String },
}

impl NoiseError {
    // Errors that the sampler replaces with a fallback cell instead of aborting
    pub fn is_per_sample(&self) -> bool {
        matches!(
            self,
            NoiseError::DivisionByZero { .. } | NoiseError::WeightSumZero
        )
    }
}
