use std::ops;

use crate::constants::*;
use crate::seq::{codon_of, Codon, Nucleotide, Residue};

/// Genetic code mapping each of the 64 codons to a single-letter amino acid
/// or the stop residue.
///
/// Codons are indexed by factors: first, second, and third nucleotide,
/// each in the order A, C, G, T; later factors vary faster than early factors.
pub struct CodonTable([u8; N_CODONS]);

static STANDARD: CodonTable =
    CodonTable(*b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF");

impl CodonTable {
    /// The standard genetic code.
    #[inline]
    pub fn standard() -> &'static CodonTable {
        &STANDARD
    }

    /// Index of a codon into the table, or None if it contains a symbol
    /// other than A, C, G, T.
    pub fn index(codon: &Codon) -> Option<usize> {
        let mut idx = 0;
        for &nt in codon.iter() {
            let k = NUCLEOTIDES.iter().position(|&x| x == nt)?;
            idx = idx * N_NUCLEOTIDES + k;
        }
        Some(idx)
    }

    /// Amino acid encoded by an uppercase codon.
    pub fn get(&self, codon: &Codon) -> Option<Residue> {
        CodonTable::index(codon).map(|i| self[i] as char)
    }

    /// Amino acid encoded by a triplet of symbols in any case.
    /// Triplets that are absent from the table translate to the unknown residue.
    pub fn lookup(&self, symbols: &[Nucleotide]) -> Residue {
        codon_of(symbols)
            .and_then(|codon| self.get(&codon))
            .unwrap_or(UNKNOWN_RESIDUE)
    }

    #[inline]
    pub fn is_start(codon: &Codon) -> bool {
        *codon == START_CODON
    }

    #[inline]
    pub fn is_stop(codon: &Codon) -> bool {
        STOP_CODONS.contains(codon)
    }
}

impl ops::Index<usize> for CodonTable {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}
