//! Nucleotide sequences as they are submitted for allele calling
use crate::shared::errors::{AlleleCallError, AlleleCallResult};
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alphabet accepted by the classifier, with the token code of each letter.
/// 0 is reserved for padding.
pub static NUCLEOTIDE_CODES: phf::Map<u8, i32> = phf_map! {
    b'A' => 1, b'T' => 2, b'G' => 3, b'C' => 4, b'N' => 5,
};

pub const PAD_CODE: i32 = 0;

/// Letter of a (non-padding) token code
pub fn nucleotide_of_code(code: i32) -> Option<u8> {
    match code {
        1 => Some(b'A'),
        2 => Some(b'T'),
        3 => Some(b'G'),
        4 => Some(b'C'),
        5 => Some(b'N'),
        _ => None,
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NucleotideSequence {
    seq: Vec<u8>,
}

impl NucleotideSequence {
    pub fn new() -> NucleotideSequence {
        NucleotideSequence { seq: Vec::new() }
    }

    /// Check that every letter belongs to {A, T, G, C, N}
    pub fn from_string(s: &str) -> AlleleCallResult<NucleotideSequence> {
        if let Some((position, symbol)) = s
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii() || !NUCLEOTIDE_CODES.contains_key(&(*c as u8)))
        {
            return Err(AlleleCallError::UnknownSymbol { symbol, position });
        }
        Ok(NucleotideSequence {
            seq: s.as_bytes().to_vec(),
        })
    }

    /// Clean up a user submitted sequence (pasted text, possibly over
    /// several lines, possibly lowercase) before validating it.
    pub fn from_raw(raw: &str) -> AlleleCallResult<NucleotideSequence> {
        NucleotideSequence::from_string(&sanitize(raw))
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    pub fn as_str(&self) -> &str {
        // only built through from_string, so always ascii
        std::str::from_utf8(&self.seq).unwrap_or_default()
    }
}

impl TryFrom<String> for NucleotideSequence {
    type Error = AlleleCallError;

    fn try_from(s: String) -> AlleleCallResult<NucleotideSequence> {
        NucleotideSequence::from_string(&s)
    }
}

impl From<NucleotideSequence> for String {
    fn from(sequence: NucleotideSequence) -> String {
        sequence.to_string()
    }
}

impl fmt::Display for NucleotideSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remove line breaks and surrounding blanks, upper-case the letters
pub fn sanitize(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .collect::<String>()
        .to_ascii_uppercase()
}
