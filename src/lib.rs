#![warn(clippy::large_types_passed_by_value)]

pub mod shared;
pub mod vdj;

pub use crate::shared::{
    decode, encode, select_alleles, AlleleCall, AlleleCallError, AlleleClassifier,
    AlleleIndexTable, AlleleSelector, CumulativeMass, LogRatio, ModelParameters,
    NucleotideSequence, ReferenceTables, Segment, SelectionParameters, SelectionPolicy,
    SequenceTokenizer, TokenizedSequence, TokenizerParameters,
};
pub use crate::vdj::{Session, VdjPrediction};

#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;

#[cfg(all(feature = "py_binds", feature = "pyo3"))]
#[pymodule]
#[pyo3(name = "_alignair")]
fn alignair_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<crate::shared::gene::Segment>()?;
    m.add_class::<crate::shared::selection::AlleleCall>()?;
    m.add_class::<crate::shared::parameters::TokenizerParameters>()?;
    m.add_class::<crate::vdj::VdjPrediction>()?;
    m.add_function(wrap_pyfunction!(crate::shared::py_binding::tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(crate::shared::py_binding::select_alleles, m)?)?;
    m.add_function(wrap_pyfunction!(
        crate::shared::py_binding::select_alleles_log_ratio,
        m
    )?)?;
    Ok(())
}
