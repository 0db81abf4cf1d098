mod common;
use alignair::shared::sequence::sanitize;
use alignair::shared::tokenizer::{decode, encode, INPUT_SLOT};
use alignair::{
    AlleleCallError, NucleotideSequence, SequenceTokenizer, TokenizerParameters,
};
use anyhow::Result;

fn count_padding(tokens: &[i32]) -> (usize, usize) {
    let left = tokens.iter().take_while(|&&t| t == 0).count();
    let right = tokens.iter().rev().take_while(|&&t| t == 0).count();
    (left, right)
}

#[test]
fn encode_even_padding() -> Result<()> {
    assert_eq!(encode("ACGT", 8)?, vec![0, 0, 1, 4, 3, 2, 0, 0]);
    Ok(())
}

#[test]
fn encode_odd_padding_goes_right() -> Result<()> {
    assert_eq!(encode("ACGTA", 8)?, vec![0, 1, 4, 3, 2, 1, 0, 0]);
    Ok(())
}

#[test]
fn encode_too_long() {
    let result = encode("ACGTN", 4);
    assert!(matches!(
        result,
        Err(AlleleCallError::SequenceTooLong {
            length: 5,
            max_length: 4
        })
    ));
}

#[test]
fn encode_exact_length_has_no_padding() -> Result<()> {
    assert_eq!(encode("NACGT", 5)?, vec![5, 1, 4, 3, 2]);
    Ok(())
}

#[test]
fn encode_empty_sequence() -> Result<()> {
    assert_eq!(encode("", 3)?, vec![0, 0, 0]);
    assert!(encode("", 0)?.is_empty());
    Ok(())
}

#[test]
fn encode_unknown_symbol() {
    match encode("ACXGT", 16) {
        Err(AlleleCallError::UnknownSymbol { symbol, position }) => {
            assert_eq!(symbol, 'X');
            assert_eq!(position, 2);
        }
        other => panic!("unexpected result {:?}", other),
    }
    // lowercase letters are only accepted after sanitation
    assert!(matches!(
        encode("acgt", 16),
        Err(AlleleCallError::UnknownSymbol { symbol: 'a', .. })
    ));
    assert!(matches!(
        encode("ACGÉ", 16),
        Err(AlleleCallError::UnknownSymbol { symbol: 'É', .. })
    ));
}

#[test]
fn encode_always_returns_max_length() -> Result<()> {
    let max_length = 64;
    for length in 0..=max_length {
        let sequence: String = "ATGCN".chars().cycle().take(length).collect();
        let tokens = encode(&sequence, max_length)?;
        assert_eq!(tokens.len(), max_length);

        let (left, right) = count_padding(&tokens);
        let padding = max_length - length;
        assert_eq!(left + right, padding);
        if padding % 2 == 0 {
            assert_eq!(left, right);
        } else {
            assert_eq!(right, left + 1);
        }
    }
    Ok(())
}

#[test]
fn encode_is_deterministic_and_injective() -> Result<()> {
    let a = encode("ACGTTGCA", 16)?;
    let b = encode("ACGTTGCA", 16)?;
    let c = encode("ACGTTGCN", 16)?;
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(decode(&a)?, "ACGTTGCA");
    Ok(())
}

#[test]
fn decode_rejects_unknown_codes() {
    assert!(matches!(
        decode(&[0, 1, 7, 0]),
        Err(AlleleCallError::UnknownToken {
            code: 7,
            position: 2
        })
    ));
}

#[test]
fn tokenizer_produces_model_input() -> Result<()> {
    let tokenizer = SequenceTokenizer::default();
    assert_eq!(tokenizer.max_length(), 512);

    let sequence = NucleotideSequence::from_raw(common::SAMPLE_SEQUENCE)?;
    let tokenized = tokenizer.tokenize(&sequence)?;
    assert_eq!(tokenized.len(), 512);
    assert_eq!(tokenized.slot_name(), INPUT_SLOT);
    assert!(tokenized.tokens().iter().all(|&t| (0..=5).contains(&t)));

    let tensor = tokenized.to_tensor();
    assert_eq!(tensor.shape(), &[1, 512]);
    assert_eq!(tensor.row(0).to_vec(), tokenized.tokens().to_vec());
    Ok(())
}

#[test]
fn tokenizer_custom_length() -> Result<()> {
    let tokenizer = SequenceTokenizer::new(TokenizerParameters { max_length: 6 });
    let sequence = NucleotideSequence::from_string("GGG")?;
    assert_eq!(tokenizer.tokenize(&sequence)?.tokens(), &[0, 3, 3, 3, 0, 0]);
    assert!(tokenizer.encode("GGGGGGG").is_err());
    Ok(())
}

#[test]
fn sanitize_user_input() -> Result<()> {
    assert_eq!(sanitize("acgt\nNNAC \r\n  ttg\n"), "ACGTNNACTTG");
    let sequence = NucleotideSequence::from_raw("gaag\ntgca\n")?;
    assert_eq!(sequence.to_string(), "GAAGTGCA");
    assert_eq!(sequence.len(), 8);
    assert!(NucleotideSequence::from_raw("ACG-T").is_err());
    Ok(())
}

#[test]
fn deserialized_sequence_is_validated() -> Result<()> {
    let sequence: NucleotideSequence = serde_json::from_str(r#""ACGTN""#)?;
    assert_eq!(sequence.as_bytes(), b"ACGTN");
    assert_eq!(serde_json::to_string(&sequence)?, r#""ACGTN""#);
    assert!(serde_json::from_str::<NucleotideSequence>(r#""ACéT""#).is_err());
    assert!(serde_json::from_str::<NucleotideSequence>(r#""acgt""#).is_err());
    Ok(())
}
