//! Errors raised while tokenizing sequences and calling alleles
use crate::shared::gene::Segment;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlleleCallError {
    #[error("Unknown nucleotide '{symbol}' at position {position} (allowed: A, T, G, C, N)")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("Unknown token code {code} at position {position}")]
    UnknownToken { code: i32, position: usize },
    #[error("Sequence of length {length} is longer than the maximal length {max_length}")]
    SequenceTooLong { length: usize, max_length: usize },
    #[error(
        "The {segment} probability vector has {probabilities} entries but its allele table has {table}"
    )]
    ShapeMismatch {
        segment: Segment,
        probabilities: usize,
        table: usize,
    },
    #[error("A {found} allele table was given for the {expected} segment")]
    WrongTable { expected: Segment, found: Segment },
    #[error("Invalid selection policy: {0}")]
    InvalidPolicy(String),
    #[error("The model does not expose the output `{0}`")]
    MissingOutput(String),
    #[error("Allele {name} not found in the {segment} table")]
    UnknownAllele { segment: Segment, name: String },
    #[error("Model invocation failed: {0:#}")]
    ModelInvocation(anyhow::Error),
}

pub type AlleleCallResult<T> = std::result::Result<T, AlleleCallError>;
