//! Deal with V/D/J segment types and allele names
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
#[cfg(all(feature = "py_binds", feature = "pyo3"))]
use pyo3::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to the extra D class (no D segment, or a D segment too short
/// to be told apart from the others)
pub const SHORT_D: &str = "Short-D";

/// The three gene segment categories, each one classified independently
#[cfg_attr(all(feature = "py_binds", feature = "pyo3"), pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    V,
    D,
    J,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::V, Segment::D, Segment::J];

    /// Name of the model output carrying the probabilities of this segment
    pub fn output_name(&self) -> &'static str {
        match self {
            Segment::V => "v_allele",
            Segment::D => "d_allele",
            Segment::J => "j_allele",
        }
    }

    pub fn from_output_name(name: &str) -> Option<Segment> {
        Segment::ALL
            .into_iter()
            .find(|segment| segment.output_name() == name)
    }

    /// Only the D table gets the extra "Short-D" class
    pub fn has_short_class(&self) -> bool {
        matches!(self, Segment::D)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Segment::V => "V",
            Segment::D => "D",
            Segment::J => "J",
        };
        write!(f, "{}", letter)
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImgtRepresentation {
    // chain (IGH) and gene type (V) are mandatory
    pub chain: String,
    pub gene_type: String,
    // "family" of the gene, e.g. "3" in IGHV3-23*01
    pub gene_id: Option<String>,
    // position of the gene, "23" in IGHV3-23*01, can also be "30-3"
    // or "1D" for a duplicated gene
    pub gene_position: Option<String>,
    // two figure number
    pub allele_index: Option<i32>,
}

impl ImgtRepresentation {
    pub fn segment(&self) -> Option<Segment> {
        match self.gene_type.as_str() {
            "V" => Some(Segment::V),
            "D" => Some(Segment::D),
            "J" => Some(Segment::J),
            _ => None,
        }
    }
}

static IMGT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(IGH|IGK|IGL|TRB|TRA|TRG|TRD)(V|D|J)([\w/]+)?(?:-([\w/-]*))?(?:\*(\d*))?")
        .expect("valid IMGT regex")
});

/// Decompose an IMGT allele name, e.g. "IGHV1-69*02" or "IGHD3-10*01"
pub fn get_imgt_representation(name: &str) -> Result<ImgtRepresentation> {
    let g = IMGT_REGEX
        .captures(name.trim())
        .ok_or(anyhow!("Allele {} does not have a valid IMGT name", name))?;

    let chain = g.get(1).map_or("".to_string(), |m| m.as_str().to_string());
    let gene_type = g.get(2).map_or("".to_string(), |m| m.as_str().to_string());
    let gene_id = g.get(3).map(|m| m.as_str().to_string());
    let gene_position = g
        .get(4)
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty());
    let allele_index = g.get(5).and_then(|m| m.as_str().parse::<i32>().ok());

    Ok(ImgtRepresentation {
        chain,
        gene_type,
        gene_id,
        gene_position,
        allele_index,
    })
}

/// Reference name of the gene an allele belongs to ("IGHV1-69*02" -> "IGHV1-69")
pub fn gene_of_allele(name: &str) -> &str {
    name.split('*').next().unwrap_or(name)
}
