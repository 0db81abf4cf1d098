//! The structs used for specifying the parameters of the allele calling
use crate::shared::errors::AlleleCallResult;
use crate::shared::gene::Segment;
use crate::shared::selection::{AlleleSelector, CumulativeMass, SelectionPolicy};
use crate::shared::tokenizer::DEFAULT_MAX_LENGTH;
use anyhow::{Context, Result};
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerParameters {
    // length of the classifier input, shorter sequences are zero-padded
    pub max_length: usize,
}

impl Default for TokenizerParameters {
    fn default() -> TokenizerParameters {
        TokenizerParameters {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// How many alleles are kept for each segment type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionParameters {
    pub v: SelectionPolicy,
    pub d: SelectionPolicy,
    pub j: SelectionPolicy,
}

impl Default for SelectionParameters {
    fn default() -> SelectionParameters {
        // D calls are much less certain than V and J calls, hence the
        // lower mass asked for
        SelectionParameters {
            v: CumulativeMass::new(0.9, 3).into(),
            d: CumulativeMass::new(0.2, 3).into(),
            j: CumulativeMass::new(0.8, 3).into(),
        }
    }
}

impl SelectionParameters {
    pub fn new(v: SelectionPolicy, d: SelectionPolicy, j: SelectionPolicy) -> Self {
        Self { v, d, j }
    }

    pub fn policy(&self, segment: Segment) -> &SelectionPolicy {
        match segment {
            Segment::V => &self.v,
            Segment::D => &self.d,
            Segment::J => &self.j,
        }
    }

    pub fn set_policy(&mut self, segment: Segment, policy: SelectionPolicy) {
        match segment {
            Segment::V => self.v = policy,
            Segment::D => self.d = policy,
            Segment::J => self.j = policy,
        }
    }

    pub fn validate(&self) -> AlleleCallResult<()> {
        Segment::ALL
            .iter()
            .try_for_each(|&segment| self.policy(segment).validate())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    #[serde(default)]
    pub tokenizer: TokenizerParameters,
    #[serde(default)]
    pub selection: SelectionParameters,
}

impl ModelParameters {
    pub fn load_from_str(data: &str) -> Result<ModelParameters> {
        let params: ModelParameters =
            serde_json::from_str(data).context("Invalid parameters file format")?;
        params.selection.validate()?;
        Ok(params)
    }

    pub fn load_from_file(path: &Path) -> Result<ModelParameters> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Unable to open the parameters file {}", path.display()))?;
        ModelParameters::load_from_str(&data)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Unable to write the parameters file {}", path.display()))?;
        Ok(())
    }
}
