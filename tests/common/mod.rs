use alignair::{AlleleClassifier, ReferenceTables, TokenizedSequence};
use anyhow::{anyhow, Result};
use ndarray::{array, Array1};
use std::path::Path;

pub const SAMPLE_SEQUENCE: &str = "GAAGTGCAGCTGGTGGAGTCTGGGGGAGNCTTGGTACAGCCTGGNAGGTCCCTGAGACTCTCCTGTGCAGCCTCNNGNTNCACCTTTGATGATTNTGCCATGCACTGGGTCCGNCAAGCTCCAGGGAAGGGCCTGGAGTGGGTCTCAGGTATTAGTTGGAATAGTGGTATCATAGTCTATGCGGACTCTGTGAAGGGNCGATTCACCATCTCCAGAGACAACGCCAAGAACTCCCTGTATCTGCAAATGAACAGTCTGAGAGCTGAGGACACGGCCTTGTATTACTGTGCAAAAGATATGACGGGCGGGGCGCCCCACCCATTTGATGCTTTTGATATCTGGGGCCTAGGGACAATGGTCACCGTCTCTTCAG";

/// Classifier returning the same outputs whatever the input
#[allow(dead_code)]
pub struct FixedClassifier {
    pub names: Vec<String>,
    pub outputs: Vec<Array1<f64>>,
    pub expose_class_counts: bool,
}

impl AlleleClassifier for FixedClassifier {
    fn output_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn class_count(&self, output_name: &str) -> Option<usize> {
        if !self.expose_class_counts {
            return None;
        }
        self.names
            .iter()
            .position(|n| n == output_name)
            .map(|i| self.outputs[i].len())
    }

    fn predict(&self, input: &TokenizedSequence) -> Result<Vec<Array1<f64>>> {
        if input.tokens().iter().all(|&t| t == 0) {
            return Err(anyhow!("empty input"));
        }
        Ok(self.outputs.clone())
    }
}

#[allow(dead_code)]
pub fn reference_tables() -> Result<ReferenceTables> {
    ReferenceTables::from_fasta_files(
        Path::new("tests/data/IGHV.fasta"),
        Path::new("tests/data/IGHD.fasta"),
        Path::new("tests/data/IGHJ.fasta"),
    )
}

/// Outputs matching the test references, in a non-trivial order
/// (the model exposes extra outputs around the allele ones)
/// V: IGHV1-2*02, IGHV3-23*01, IGHV3-23*04, IGHV4-34*01
/// D: IGHD2-2*01, IGHD3-10*01, IGHD6-19*01, Short-D
/// J: IGHJ3*02, IGHJ4*02, IGHJ6*02
#[allow(dead_code)]
pub fn simple_classifier(expose_class_counts: bool) -> FixedClassifier {
    FixedClassifier {
        names: vec![
            "v_start".to_string(),
            "j_allele".to_string(),
            "v_allele".to_string(),
            "mutation_rate".to_string(),
            "d_allele".to_string(),
        ],
        outputs: vec![
            array![0.12],
            array![0.875, 0.0625, 0.0625],
            array![0.0625, 0.5, 0.375, 0.0625],
            array![0.03],
            array![0.125, 0.25, 0.125, 0.5],
        ],
        expose_class_counts,
    }
}
