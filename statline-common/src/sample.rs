//! Fixed-arity stat line vector
//!
//! A [`Sample`] is one game's worth of box-score numbers. It is never
//! mutated after construction: every arithmetic operation returns a new
//! value, which is what lets an aggregate swap its running mean in a
//! single assignment.

use serde::{Deserialize, Serialize};

/// Number of numeric fields carried by every sample
pub const FIELD_COUNT: usize = 8;

/// Field names in storage order
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "points",
    "rebounds",
    "assists",
    "steals",
    "blocks",
    "fouls",
    "turnovers",
    "minutesPlayed",
];

/// Immutable vector of per-game statistics
///
/// Serialized as an object with one named field per component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub fouls: f64,
    pub turnovers: f64,
    pub minutes_played: f64,
}

impl Sample {
    /// The all-zero sample, used as the mean of an empty aggregate
    pub const ZERO: Sample = Sample::from_array([0.0; FIELD_COUNT]);

    /// Build a sample from values in [`FIELD_NAMES`] order
    pub const fn from_array(values: [f64; FIELD_COUNT]) -> Self {
        Self {
            points: values[0],
            rebounds: values[1],
            assists: values[2],
            steals: values[3],
            blocks: values[4],
            fouls: values[5],
            turnovers: values[6],
            minutes_played: values[7],
        }
    }

    /// Values in [`FIELD_NAMES`] order
    pub fn to_array(&self) -> [f64; FIELD_COUNT] {
        [
            self.points,
            self.rebounds,
            self.assists,
            self.steals,
            self.blocks,
            self.fouls,
            self.turnovers,
            self.minutes_played,
        ]
    }

    /// Multiply every field by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Divide every field by `divisor`
    pub fn divide(&self, divisor: f64) -> Self {
        self.map(|v| v / divisor)
    }

    /// Field-wise sum
    pub fn add(&self, other: &Sample) -> Self {
        let lhs = self.to_array();
        let rhs = other.to_array();
        Self::from_array(std::array::from_fn(|i| lhs[i] + rhs[i]))
    }

    /// Fold `sample` into a mean that currently covers `count` samples
    ///
    /// Returns `(mean * count + sample) / (count + 1)`.
    pub fn merge_mean(&self, count: u64, sample: &Sample) -> Self {
        let count = count as f64;
        self.scale(count).add(sample).divide(count + 1.0)
    }

    /// True when every field is a finite number
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let values = self.to_array();
        Self::from_array(std::array::from_fn(|i| f(values[i])))
    }
}

impl From<[f64; FIELD_COUNT]> for Sample {
    fn from(values: [f64; FIELD_COUNT]) -> Self {
        Self::from_array(values)
    }
}
