//! Turn nucleotide sequences into the fixed-length integer input of the classifier
use crate::shared::errors::{AlleleCallError, AlleleCallResult};
use crate::shared::parameters::TokenizerParameters;
use crate::shared::sequence::{nucleotide_of_code, NucleotideSequence, NUCLEOTIDE_CODES, PAD_CODE};
use ndarray::Array2;

/// Name of the input slot of the classifier
pub const INPUT_SLOT: &str = "tokenized_sequence";

pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Encode a sequence and pad it with zeros on both sides so that the
/// result has exactly `max_length` entries. When the total padding is odd,
/// the extra zero goes to the right (3') side.
///```
/// use alignair::shared::tokenizer::encode;
/// assert_eq!(encode("ACGT", 8).unwrap(), vec![0, 0, 1, 4, 3, 2, 0, 0]);
/// assert_eq!(encode("ACGTA", 8).unwrap(), vec![0, 1, 4, 3, 2, 1, 0, 0]);
/// assert!(encode("ACGTN", 4).is_err());
///```
pub fn encode(sequence: &str, max_length: usize) -> AlleleCallResult<Vec<i32>> {
    let codes = sequence
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            if !symbol.is_ascii() {
                return Err(AlleleCallError::UnknownSymbol { symbol, position });
            }
            NUCLEOTIDE_CODES
                .get(&(symbol as u8))
                .copied()
                .ok_or(AlleleCallError::UnknownSymbol { symbol, position })
        })
        .collect::<AlleleCallResult<Vec<i32>>>()?;

    if codes.len() > max_length {
        return Err(AlleleCallError::SequenceTooLong {
            length: codes.len(),
            max_length,
        });
    }

    let padding = max_length - codes.len();
    let left = padding / 2;
    let right = padding - left;

    let mut encoded = Vec::with_capacity(max_length);
    encoded.extend(std::iter::repeat(PAD_CODE).take(left));
    encoded.extend(codes);
    encoded.extend(std::iter::repeat(PAD_CODE).take(right));
    Ok(encoded)
}

/// Inverse of `encode`, padding codes are dropped
pub fn decode(tokens: &[i32]) -> AlleleCallResult<String> {
    tokens
        .iter()
        .enumerate()
        .filter(|&(_, &code)| code != PAD_CODE)
        .map(|(position, &code)| {
            nucleotide_of_code(code)
                .map(char::from)
                .ok_or(AlleleCallError::UnknownToken { code, position })
        })
        .collect()
}

/// Fixed-length encoded sequence, read once by the classifier
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizedSequence {
    tokens: Vec<i32>,
}

impl TokenizedSequence {
    pub fn tokens(&self) -> &[i32] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn slot_name(&self) -> &'static str {
        INPUT_SLOT
    }

    /// Tensor of logical shape [1, max_length], as the classifier expects it
    pub fn to_tensor(&self) -> Array2<i32> {
        Array2::from_shape_fn((1, self.tokens.len()), |(_, j)| self.tokens[j])
    }
}

#[derive(Clone, Debug, Default)]
pub struct SequenceTokenizer {
    pub params: TokenizerParameters,
}

impl SequenceTokenizer {
    pub fn new(params: TokenizerParameters) -> SequenceTokenizer {
        SequenceTokenizer { params }
    }

    pub fn max_length(&self) -> usize {
        self.params.max_length
    }

    pub fn encode(&self, sequence: &str) -> AlleleCallResult<Vec<i32>> {
        encode(sequence, self.params.max_length)
    }

    pub fn tokenize(&self, sequence: &NucleotideSequence) -> AlleleCallResult<TokenizedSequence> {
        Ok(TokenizedSequence {
            tokens: self.encode(sequence.as_str())?,
        })
    }
}
