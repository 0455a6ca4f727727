use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::align::{align, Alignment};
use crate::constants::*;
use crate::seq::Nucleotide;

/// Difference between reference and sample at one aligned column.
/// Positions are 1-based and count gap columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Variant {
    Substitution {
        position: usize,
        reference_base: Nucleotide,
        sample_base: Nucleotide,
    },
    /// Gap in the reference
    Insertion {
        position: usize,
        inserted_base: Nucleotide,
    },
    /// Gap in the sample
    Deletion {
        position: usize,
        deleted_base: Nucleotide,
    },
}

impl Variant {
    /// Classify an aligned column; identical symbols are not a variant.
    pub fn from_column(position: usize, nt_ref: Nucleotide, nt_alt: Nucleotide) -> Option<Variant> {
        if nt_ref == nt_alt {
            None
        } else if nt_ref == GAP {
            Some(Variant::Insertion { position: position, inserted_base: nt_alt })
        } else if nt_alt == GAP {
            Some(Variant::Deletion { position: position, deleted_base: nt_ref })
        } else {
            Some(Variant::Substitution {
                position: position,
                reference_base: nt_ref,
                sample_base: nt_alt,
            })
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        match *self {
            Variant::Substitution { position, .. } |
            Variant::Insertion { position, .. } |
            Variant::Deletion { position, .. } => position,
        }
    }

    pub fn kind(&self) -> &'static str {
        match *self {
            Variant::Substitution { .. } => "substitution",
            Variant::Insertion { .. } => "insertion",
            Variant::Deletion { .. } => "deletion",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Variant::Substitution { position, reference_base, sample_base } => {
                write!(f, "{}{}>{}", position, reference_base, sample_base)
            },
            Variant::Insertion { position, inserted_base } => {
                write!(f, "{}ins{}", position, inserted_base)
            },
            Variant::Deletion { position, deleted_base } => {
                write!(f, "{}del{}", position, deleted_base)
            },
        }
    }
}

/// Variants of a sample against a reference, with the alignment they were read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCall {
    pub aligned_reference: String,
    pub aligned_sample: String,
    pub variants: Vec<Variant>,
}

impl VariantCall {
    /// Read variants column by column from an alignment of reference (first)
    /// against sample (second).
    pub fn from_alignment(alignment: Alignment) -> VariantCall {
        let variants: Vec<Variant> = alignment.columns()
            .enumerate()
            .filter_map(|(i, (nt_ref, nt_alt))| Variant::from_column(i + 1, nt_ref, nt_alt))
            .collect();

        VariantCall {
            aligned_reference: alignment.aligned_sequence_1,
            aligned_sample: alignment.aligned_sequence_2,
            variants: variants,
        }
    }
}

/// Align sample to reference with the default scoring and call variants.
pub fn call_variants(reference: &str, sample: &str) -> VariantCall {
    let call = VariantCall::from_alignment(align(reference, sample));
    debug!(n_variants = call.variants.len(), "called variants");
    call
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_variants_substitution() {
        let call = call_variants("ACGT", "ACCT");
        assert_eq!(call.aligned_reference, "ACGT");
        assert_eq!(call.aligned_sample, "ACCT");
        assert_eq!(call.variants, vec![
            Variant::Substitution { position: 3, reference_base: 'G', sample_base: 'C' },
        ]);
    }

    #[test]
    fn test_call_variants_self() {
        for s in &["", "A", "GATTACA", "CCATGGCTAGCTTAACAT"] {
            let call = call_variants(s, s);
            assert!(call.variants.is_empty());
            assert_eq!(call.aligned_reference, *s);
            assert_eq!(call.aligned_sample, *s);
        }
    }

    #[test]
    fn test_call_variants_deletion() {
        let call = call_variants("ACGTACGT", "ACGACGT");
        assert_eq!(call.aligned_sample, "ACG-ACGT");
        assert_eq!(call.variants, vec![Variant::Deletion { position: 4, deleted_base: 'T' }]);
    }

    #[test]
    fn test_call_variants_insertion() {
        let call = call_variants("ACGT", "ACGGT");
        assert_eq!(call.aligned_reference, "AC-GT");
        assert_eq!(call.variants, vec![Variant::Insertion { position: 3, inserted_base: 'G' }]);
    }

    #[test]
    fn test_call_variants_ordered_by_position() {
        let call = call_variants("GATTACA", "GCATGCT");
        let positions: Vec<usize> = call.variants.iter().map(|v| v.position()).collect();
        assert_eq!(positions, vec![2, 3, 5, 7]);
        assert!(call.variants.iter().all(|v| v.kind() == "substitution"));
    }

    #[test]
    fn test_call_variants_empty_sample() {
        let call = call_variants("AC", "");
        assert_eq!(call.aligned_sample, "--");
        assert_eq!(call.variants, vec![
            Variant::Deletion { position: 1, deleted_base: 'A' },
            Variant::Deletion { position: 2, deleted_base: 'C' },
        ]);
    }

    #[test]
    fn test_variant_display() {
        let v = Variant::Substitution { position: 3, reference_base: 'G', sample_base: 'C' };
        assert_eq!(v.to_string(), "3G>C");
        assert_eq!(Variant::Insertion { position: 3, inserted_base: 'G' }.to_string(), "3insG");
        assert_eq!(Variant::Deletion { position: 4, deleted_base: 'T' }.to_string(), "4delT");
    }

    #[test]
    fn test_variant_json() {
        let v = Variant::Substitution { position: 3, reference_base: 'G', sample_base: 'C' };
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"type":"substitution","position":3,"reference_base":"G","sample_base":"C"}"#
        );
        let v: Variant = serde_json::from_str(r#"{"type":"deletion","position":4,"deleted_base":"T"}"#).unwrap();
        assert_eq!(v, Variant::Deletion { position: 4, deleted_base: 'T' });
    }
}
