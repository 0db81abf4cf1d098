//! Shared functionalities: tokenization, allele tables and allele selection
pub mod allele_table;
pub mod errors;
pub mod gene;
pub mod model;
pub mod parameters;
pub mod parser;
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
pub mod py_binding;
pub mod selection;
pub mod sequence;
pub mod tokenizer;

pub use allele_table::{AlleleIndexTable, ReferenceTables};
pub use errors::{AlleleCallError, AlleleCallResult};
pub use gene::{get_imgt_representation, ImgtRepresentation, Segment, SHORT_D};
pub use model::{AlleleClassifier, OutputPositions};
pub use parameters::{ModelParameters, SelectionParameters, TokenizerParameters};
pub use parser::ParserReference;
pub use selection::{
    select_alleles, AlleleCall, AlleleSelector, CumulativeMass, LogRatio, SegmentPrediction,
    SelectionPolicy,
};
pub use sequence::NucleotideSequence;
pub use tokenizer::{decode, encode, SequenceTokenizer, TokenizedSequence};
