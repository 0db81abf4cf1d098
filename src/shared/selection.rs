//! Turn the probability vector of one segment type into a ranked list of
//! allele calls.
//!
//! Two selection rules are available, both walk the classes from the most
//! to the least probable and differ only in when they stop:
//! - `CumulativeMass` keeps classes until their summed probability reaches a
//!   fraction of the total mass, without ever keeping more than `cap` of them.
//! - `LogRatio` keeps classes as long as the log-ratio between two adjacent
//!   probabilities stays below a threshold (no cap).
use crate::shared::allele_table::AlleleIndexTable;
use crate::shared::errors::{AlleleCallError, AlleleCallResult};
use crate::shared::gene::Segment;
use enum_dispatch::enum_dispatch;
use itertools::Itertools;
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// A called allele and the probability the model gave to it
#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlleleCall {
    pub name: String,
    pub probability: f64,
}

#[cfg(all(feature = "py_binds", feature = "pyo3"))]
#[pymethods]
impl AlleleCall {
    fn __repr__(&self) -> String {
        format!("AlleleCall({}, {:.4})", self.name, self.probability)
    }
}

#[enum_dispatch]
pub trait AlleleSelector {
    /// Reject the parameters outside of their domain
    fn validate(&self) -> AlleleCallResult<()>;
    /// Indices of the kept classes, most probable first
    fn select_indices(&self, probabilities: &[f64]) -> Vec<usize>;
}

#[enum_dispatch(AlleleSelector)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPolicy {
    CumulativeMass(CumulativeMass),
    LogRatio(LogRatio),
}

impl Default for SelectionPolicy {
    fn default() -> SelectionPolicy {
        SelectionPolicy::CumulativeMass(CumulativeMass::default())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CumulativeMass {
    // fraction of the total probability mass to cover, in [0, 1]
    pub confidence: f64,
    // maximal number of calls
    pub cap: usize,
}

impl Default for CumulativeMass {
    fn default() -> CumulativeMass {
        CumulativeMass {
            confidence: 0.9,
            cap: 3,
        }
    }
}

impl CumulativeMass {
    pub fn new(confidence: f64, cap: usize) -> CumulativeMass {
        CumulativeMass { confidence, cap }
    }
}

impl AlleleSelector for CumulativeMass {
    fn validate(&self) -> AlleleCallResult<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(AlleleCallError::InvalidPolicy(format!(
                "confidence must be in [0, 1], got {}",
                self.confidence
            )));
        }
        if self.cap < 1 {
            return Err(AlleleCallError::InvalidPolicy(
                "cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn select_indices(&self, probabilities: &[f64]) -> Vec<usize> {
        // the vector is not assumed to be normalized
        let total: f64 = probabilities.iter().sum();
        let threshold = self.confidence * total;

        let mut selected = Vec::new();
        let mut cumulative = 0.0;
        for index in ranked_indices(probabilities) {
            cumulative += probabilities[index];
            selected.push(index);
            // checked after the push: at least one class is always kept.
            // Without any mass there is nothing to reach, only the cap stops.
            if (total > 0.0 && cumulative >= threshold) || selected.len() >= self.cap {
                break;
            }
        }
        selected
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRatio {
    // maximal value of ln(p_previous / p_current) between two kept classes
    pub threshold: f64,
}

impl LogRatio {
    pub fn new(threshold: f64) -> LogRatio {
        LogRatio { threshold }
    }
}

impl AlleleSelector for LogRatio {
    fn validate(&self) -> AlleleCallResult<()> {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(AlleleCallError::InvalidPolicy(format!(
                "log-ratio threshold must be non-negative, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    fn select_indices(&self, probabilities: &[f64]) -> Vec<usize> {
        let ranked = ranked_indices(probabilities);
        let mut selected: Vec<usize> = ranked.first().copied().into_iter().collect();
        for (&previous, &current) in ranked.iter().tuple_windows() {
            let diff = (probabilities[previous] / probabilities[current]).ln();
            // a NaN ratio (0/0) also stops the walk
            if diff < self.threshold {
                selected.push(current);
            } else {
                break;
            }
        }
        selected
    }
}

/// Class indices sorted by decreasing probability, ties broken by
/// increasing index
pub fn ranked_indices(probabilities: &[f64]) -> Vec<usize> {
    (0..probabilities.len())
        .sorted_by(|&a, &b| {
            probabilities[b]
                .total_cmp(&probabilities[a])
                .then(a.cmp(&b))
        })
        .collect()
}

/// Probability vector of one segment type, checked against the allele
/// table it is read with
#[derive(Clone, Debug)]
pub struct SegmentPrediction<'a> {
    probabilities: Vec<f64>,
    table: &'a AlleleIndexTable,
}

impl<'a> SegmentPrediction<'a> {
    pub fn new(
        probabilities: Vec<f64>,
        table: &'a AlleleIndexTable,
    ) -> AlleleCallResult<SegmentPrediction<'a>> {
        if probabilities.len() != table.len() {
            log::warn!(
                "{} output has {} classes, allele table has {}",
                table.segment(),
                probabilities.len(),
                table.len()
            );
            return Err(AlleleCallError::ShapeMismatch {
                segment: table.segment(),
                probabilities: probabilities.len(),
                table: table.len(),
            });
        }
        Ok(SegmentPrediction {
            probabilities,
            table,
        })
    }

    pub fn segment(&self) -> Segment {
        self.table.segment()
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn select(&self, policy: &SelectionPolicy) -> AlleleCallResult<Vec<AlleleCall>> {
        policy.validate()?;
        let names = self.table.names();
        Ok(policy
            .select_indices(&self.probabilities)
            .into_iter()
            .map(|index| AlleleCall {
                name: names[index].clone(),
                probability: self.probabilities[index],
            })
            .collect())
    }
}

/// Ranked allele calls of a probability vector, read with its allele table
pub fn select_alleles(
    probabilities: &[f64],
    table: &AlleleIndexTable,
    policy: &SelectionPolicy,
) -> AlleleCallResult<Vec<AlleleCall>> {
    SegmentPrediction::new(probabilities.to_vec(), table)?.select(policy)
}
