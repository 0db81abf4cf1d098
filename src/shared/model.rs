//! Boundary with the pretrained classifier.
//!
//! The classifier itself (weights, runtime, device) lives outside of this
//! crate. It takes one tokenized sequence and returns one probability vector
//! per named output; only the `v_allele`, `d_allele` and `j_allele` outputs
//! are read here.
use crate::shared::errors::{AlleleCallError, AlleleCallResult};
use crate::shared::gene::Segment;
use crate::shared::tokenizer::TokenizedSequence;
use anyhow::Result;
use ndarray::Array1;

/// A loaded classifier. `Send + Sync` is a promise from the implementer
/// that concurrent forward passes on the same instance are safe.
pub trait AlleleClassifier: Send + Sync {
    /// Names of the outputs, in the order `predict` returns them
    fn output_names(&self) -> Vec<String>;

    /// Number of classes of an output, if the model metadata exposes it
    fn class_count(&self, _output_name: &str) -> Option<usize> {
        None
    }

    /// One forward pass, one vector per output
    fn predict(&self, input: &TokenizedSequence) -> Result<Vec<Array1<f64>>>;
}

/// Position of the V, D and J outputs among the model outputs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPositions {
    pub v: usize,
    pub d: usize,
    pub j: usize,
}

impl OutputPositions {
    pub fn resolve(output_names: &[String]) -> AlleleCallResult<OutputPositions> {
        let find = |segment: Segment| {
            output_names
                .iter()
                .position(|name| name == segment.output_name())
                .ok_or_else(|| AlleleCallError::MissingOutput(segment.output_name().to_string()))
        };
        Ok(OutputPositions {
            v: find(Segment::V)?,
            d: find(Segment::D)?,
            j: find(Segment::J)?,
        })
    }

    pub fn get(&self, segment: Segment) -> usize {
        match segment {
            Segment::V => self.v,
            Segment::D => self.d,
            Segment::J => self.j,
        }
    }
}

/// Run the classifier, failures of the collaborator are wrapped as they are
pub fn invoke(
    model: &dyn AlleleClassifier,
    input: &TokenizedSequence,
) -> AlleleCallResult<Vec<Array1<f64>>> {
    model.predict(input).map_err(AlleleCallError::ModelInvocation)
}
