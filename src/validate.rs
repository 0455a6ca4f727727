use crate::error::{Error, Field, Result};

/// Symbols accepted from callers.
const ALPHABET: [char; 4] = ['A', 'T', 'G', 'C'];

/// Check a caller-supplied sequence before it reaches the engine.
///
/// The sequence must be non-empty, at most `max_length` symbols long,
/// and contain only uppercase A, T, G, C.
pub fn check_sequence(field: Field, seq: &str, max_length: usize) -> Result<()> {
    if seq.is_empty() {
        return Err(Error::EmptySequence(field));
    }

    if let Some((position, symbol)) = seq.chars().enumerate().find(|&(_, c)| !ALPHABET.contains(&c)) {
        return Err(Error::InvalidSymbol { field: field, symbol: symbol, position: position + 1 });
    }

    let length = seq.len();
    if length > max_length {
        return Err(Error::SequenceTooLong { field: field, length: length, max: max_length });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_sequence_accepts_dna() {
        assert!(check_sequence(Field::Input, "GATTACA", 100).is_ok());
        assert!(check_sequence(Field::Input, "ACGT", 4).is_ok());
    }

    #[test]
    fn test_check_sequence_empty() {
        match check_sequence(Field::Sample, "", 100) {
            Err(Error::EmptySequence(Field::Sample)) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_check_sequence_invalid_symbol() {
        let err = check_sequence(Field::Reference, "ACGUA", 100).unwrap_err();
        match err {
            Error::InvalidSymbol { field, symbol, position } => {
                assert_eq!(field, Field::Reference);
                assert_eq!(symbol, 'U');
                assert_eq!(position, 4);
            },
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Reference sequence contains invalid characters. Only A, T, G, C are allowed."
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_check_sequence_rejects_lowercase() {
        assert!(check_sequence(Field::Input, "acgt", 100).is_err());
        assert!(check_sequence(Field::Input, "ACNT", 100).is_err());
    }

    #[test]
    fn test_check_sequence_too_long() {
        match check_sequence(Field::Input, "ACGTA", 4) {
            Err(Error::SequenceTooLong { length: 5, max: 4, .. }) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
