//! Correspondence between the class indices of the classifier and the
//! allele names.
//!
//! The classes of each output are the reference alleles sorted by name,
//! and for the D segment an extra last class ("Short-D") stands for a
//! missing, or too short to be identified, D segment. The order must be the
//! one the classifier was trained with.
use crate::shared::errors::{AlleleCallError, AlleleCallResult};
use crate::shared::gene::{get_imgt_representation, Segment, SHORT_D};
use crate::shared::parser::ParserReference;
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlleleIndexTable {
    segment: Segment,
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl AlleleIndexTable {
    /// Sort the reference names and index them by position. The D table
    /// gets "Short-D" as its last entry.
    pub fn from_names<I, S>(segment: Segment, names: I) -> AlleleIndexTable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();

        for name in &names {
            match get_imgt_representation(name).map(|imgt| imgt.segment()) {
                Ok(Some(s)) if s != segment => {
                    log::warn!("Allele {} found in the {} reference", name, segment)
                }
                Err(_) => log::debug!("Allele {} does not follow IMGT conventions", name),
                _ => {}
            }
        }

        if segment.has_short_class() {
            if let Some(position) = names.iter().position(|name| name == SHORT_D) {
                log::warn!(
                    "Reference record {} clashes with the short D class, ignored",
                    SHORT_D
                );
                names.remove(position);
            }
            names.push(SHORT_D.to_string());
        }
        AlleleIndexTable::from_ordered(segment, names)
    }

    /// Keep the names in the given order (index = position), for tables
    /// exported alongside a classifier
    pub fn from_ordered(segment: Segment, names: Vec<String>) -> AlleleIndexTable {
        let positions = names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        AlleleIndexTable {
            segment,
            names,
            positions,
        }
    }

    pub fn from_reference(segment: Segment, reference: &ParserReference) -> AlleleIndexTable {
        AlleleIndexTable::from_names(segment, reference.alleles.keys().cloned())
    }

    pub fn from_fasta_str(segment: Segment, data: &str) -> Result<AlleleIndexTable> {
        let reference = ParserReference::parse_str(data)?;
        Ok(AlleleIndexTable::from_reference(segment, &reference))
    }

    pub fn from_fasta_file(segment: Segment, path: &Path) -> Result<AlleleIndexTable> {
        let reference = ParserReference::parse_file(path)?;
        Ok(AlleleIndexTable::from_reference(segment, &reference))
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> AlleleCallResult<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| AlleleCallError::UnknownAllele {
                segment: self.segment,
                name: name.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}

/// The V, D and J tables of a session, shared between all the calls
#[derive(Clone, Debug)]
pub struct ReferenceTables {
    pub v: Arc<AlleleIndexTable>,
    pub d: Arc<AlleleIndexTable>,
    pub j: Arc<AlleleIndexTable>,
}

impl ReferenceTables {
    pub fn new(v: AlleleIndexTable, d: AlleleIndexTable, j: AlleleIndexTable) -> ReferenceTables {
        ReferenceTables {
            v: Arc::new(v),
            d: Arc::new(d),
            j: Arc::new(j),
        }
    }

    pub fn from_fasta_strs(v: &str, d: &str, j: &str) -> Result<ReferenceTables> {
        Ok(ReferenceTables::new(
            AlleleIndexTable::from_fasta_str(Segment::V, v)?,
            AlleleIndexTable::from_fasta_str(Segment::D, d)?,
            AlleleIndexTable::from_fasta_str(Segment::J, j)?,
        ))
    }

    pub fn from_fasta_files(v: &Path, d: &Path, j: &Path) -> Result<ReferenceTables> {
        Ok(ReferenceTables::new(
            AlleleIndexTable::from_fasta_file(Segment::V, v)?,
            AlleleIndexTable::from_fasta_file(Segment::D, d)?,
            AlleleIndexTable::from_fasta_file(Segment::J, j)?,
        ))
    }

    pub fn table(&self, segment: Segment) -> &Arc<AlleleIndexTable> {
        match segment {
            Segment::V => &self.v,
            Segment::D => &self.d,
            Segment::J => &self.j,
        }
    }
}
