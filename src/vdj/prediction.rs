use crate::shared::gene::{gene_of_allele, Segment};
use crate::shared::AlleleCall;
use itertools::Itertools;
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Allele calls of one sequence, most probable first for each segment
#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VdjPrediction {
    pub sequence: String,
    pub v_alleles: Vec<AlleleCall>,
    pub d_alleles: Vec<AlleleCall>,
    pub j_alleles: Vec<AlleleCall>,
}

impl VdjPrediction {
    pub fn calls(&self, segment: Segment) -> &[AlleleCall] {
        match segment {
            Segment::V => &self.v_alleles,
            Segment::D => &self.d_alleles,
            Segment::J => &self.j_alleles,
        }
    }

    pub(crate) fn set_calls(&mut self, segment: Segment, calls: Vec<AlleleCall>) {
        match segment {
            Segment::V => self.v_alleles = calls,
            Segment::D => self.d_alleles = calls,
            Segment::J => self.j_alleles = calls,
        }
    }

    pub fn best_call(&self, segment: Segment) -> Option<&AlleleCall> {
        self.calls(segment).first()
    }

    /// Called alleles as a comma separated list, e.g. "IGHV3-23*01, IGHV3-23*04"
    pub fn names(&self, segment: Segment) -> String {
        self.calls(segment).iter().map(|c| c.name.as_str()).join(", ")
    }

    /// Genes of the called alleles, without repetition, in order of first call
    pub fn genes(&self, segment: Segment) -> Vec<String> {
        self.calls(segment)
            .iter()
            .map(|c| gene_of_allele(&c.name).to_string())
            .unique()
            .collect()
    }
}

#[cfg(all(feature = "py_binds", feature = "pyo3"))]
#[pymethods]
impl VdjPrediction {
    fn __repr__(&self) -> String {
        format!(
            "VdjPrediction(V: [{}], D: [{}], J: [{}])",
            self.names(Segment::V),
            self.names(Segment::D),
            self.names(Segment::J)
        )
    }
}
