//! Python entry points for the tokenizer and the allele selection
use crate::shared::selection::{self, CumulativeMass, LogRatio, SelectionPolicy};
use crate::shared::tokenizer::{self, DEFAULT_MAX_LENGTH};
use crate::shared::{AlleleCall, AlleleIndexTable, Segment};
use anyhow::Result;
use ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::prelude::*;

/// Encode a sequence as the [1, max_length] input of the classifier
#[pyfunction]
#[pyo3(signature = (sequence, max_length = DEFAULT_MAX_LENGTH))]
pub fn tokenize(py: Python, sequence: &str, max_length: usize) -> Result<Py<PyArray2<i32>>> {
    let tokens = tokenizer::encode(sequence, max_length)?;
    let tensor = Array2::from_shape_vec((1, max_length), tokens)?;
    Ok(tensor.into_pyarray_bound(py).into())
}

/// Keep the most probable alleles until `confidence` of the total mass is
/// reached (at most `cap` of them). `allele_names` is in class order.
#[pyfunction]
#[pyo3(signature = (probabilities, allele_names, segment, confidence = 0.9, cap = 3))]
pub fn select_alleles(
    probabilities: Vec<f64>,
    allele_names: Vec<String>,
    segment: Segment,
    confidence: f64,
    cap: usize,
) -> Result<Vec<AlleleCall>> {
    let table = AlleleIndexTable::from_ordered(segment, allele_names);
    let policy: SelectionPolicy = CumulativeMass::new(confidence, cap).into();
    Ok(selection::select_alleles(&probabilities, &table, &policy)?)
}

/// Keep the most probable alleles while ln(p_previous / p_current) < threshold
#[pyfunction]
#[pyo3(signature = (probabilities, allele_names, segment, threshold = 0.4))]
pub fn select_alleles_log_ratio(
    probabilities: Vec<f64>,
    allele_names: Vec<String>,
    segment: Segment,
    threshold: f64,
) -> Result<Vec<AlleleCall>> {
    let table = AlleleIndexTable::from_ordered(segment, allele_names);
    let policy: SelectionPolicy = LogRatio::new(threshold).into();
    Ok(selection::select_alleles(&probabilities, &table, &policy)?)
}
