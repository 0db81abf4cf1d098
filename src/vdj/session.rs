//! Everything needed to call the V, D and J alleles of heavy-chain sequences:
//! the loaded classifier, the allele tables, and the selection parameters.
use crate::shared::errors::{AlleleCallError, AlleleCallResult};
use crate::shared::gene::Segment;
use crate::shared::model::{self, AlleleClassifier, OutputPositions};
use crate::shared::{
    ModelParameters, NucleotideSequence, ReferenceTables, SegmentPrediction, SelectionParameters,
    SequenceTokenizer,
};
use crate::vdj::prediction::VdjPrediction;
use rayon::prelude::*;
use std::sync::Arc;

pub struct Session {
    model: Arc<dyn AlleleClassifier>,
    tables: ReferenceTables,
    positions: OutputPositions,
    tokenizer: SequenceTokenizer,
    selection: SelectionParameters,
}

impl Session {
    /// Check that the classifier and the tables agree before any call:
    /// every segment output exists, every table is of the right segment,
    /// and, when the classifier exposes it, the number of classes of each
    /// output matches the table length.
    pub fn new(
        model: Arc<dyn AlleleClassifier>,
        tables: ReferenceTables,
        params: ModelParameters,
    ) -> AlleleCallResult<Session> {
        params.selection.validate()?;

        let positions = OutputPositions::resolve(&model.output_names())?;
        log::debug!(
            "Output positions: v_allele={}, d_allele={}, j_allele={}",
            positions.v,
            positions.d,
            positions.j
        );

        for segment in Segment::ALL {
            let table = tables.table(segment);
            if table.segment() != segment {
                return Err(AlleleCallError::WrongTable {
                    expected: segment,
                    found: table.segment(),
                });
            }
            match model.class_count(segment.output_name()) {
                Some(count) if count != table.len() => {
                    return Err(AlleleCallError::ShapeMismatch {
                        segment,
                        probabilities: count,
                        table: table.len(),
                    });
                }
                Some(_) => {}
                None => log::debug!(
                    "The model does not expose the size of {}, checked at prediction time",
                    segment.output_name()
                ),
            }
        }

        log::info!(
            "Session ready: {} V, {} D and {} J classes, input length {}",
            tables.v.len(),
            tables.d.len(),
            tables.j.len(),
            params.tokenizer.max_length
        );

        Ok(Session {
            model,
            tables,
            positions,
            tokenizer: SequenceTokenizer::new(params.tokenizer),
            selection: params.selection,
        })
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn positions(&self) -> OutputPositions {
        self.positions
    }

    pub fn tokenizer(&self) -> &SequenceTokenizer {
        &self.tokenizer
    }

    pub fn selection(&self) -> &SelectionParameters {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: SelectionParameters) -> AlleleCallResult<()> {
        selection.validate()?;
        self.selection = selection;
        Ok(())
    }

    /// Call the alleles of a (possibly multi-line, lowercase) sequence with
    /// the session selection parameters
    pub fn predict(&self, sequence: &str) -> AlleleCallResult<VdjPrediction> {
        self.predict_with(sequence, &self.selection)
    }

    /// Same as `predict`, with other selection parameters for this call only
    pub fn predict_with(
        &self,
        sequence: &str,
        selection: &SelectionParameters,
    ) -> AlleleCallResult<VdjPrediction> {
        selection.validate()?;
        let sequence = NucleotideSequence::from_raw(sequence)?;
        let input = self.tokenizer.tokenize(&sequence)?;
        // a single forward pass gives the three segments
        let outputs = model::invoke(self.model.as_ref(), &input)?;

        let mut prediction = VdjPrediction {
            sequence: sequence.to_string(),
            ..Default::default()
        };
        for segment in Segment::ALL {
            let output = outputs
                .get(self.positions.get(segment))
                .ok_or_else(|| AlleleCallError::MissingOutput(segment.output_name().to_string()))?;
            let calls = SegmentPrediction::new(output.to_vec(), self.tables.table(segment))?
                .select(selection.policy(segment))?;
            prediction.set_calls(segment, calls);
        }
        Ok(prediction)
    }

    /// Predict many sequences in parallel. Each sequence gets its own
    /// result, a failing sequence does not affect the others.
    pub fn predict_batch<S>(&self, sequences: &[S]) -> Vec<AlleleCallResult<VdjPrediction>>
    where
        S: AsRef<str> + Sync,
    {
        sequences
            .par_iter()
            .enumerate()
            .map(|(index, sequence)| {
                let result = self.predict(sequence.as_ref());
                if let Err(e) = &result {
                    log::warn!("Sequence {} could not be processed: {}", index, e);
                }
                result
            })
            .collect()
    }
}
