pub mod codon;
pub mod translate;

use crate::constants::*;

pub use self::codon::CodonTable;
pub use self::translate::translate;

pub type Nucleotide = char;
pub type Residue = char;

/// Codon key: three uppercase ASCII nucleotides.
pub type Codon = [u8; 3];

pub type DnaSeq = Vec<Nucleotide>;

/// Watson-Crick complement, preserving case.
/// Anything outside {A, C, G, T, N} complements to the unknown nucleotide.
pub fn complement(x: Nucleotide) -> Nucleotide {
    match x {
        'A' => 'T',
        'C' => 'G',
        'G' => 'C',
        'T' => 'A',
        'N' => 'N',
        'a' => 't',
        'c' => 'g',
        'g' => 'c',
        't' => 'a',
        'n' => 'n',
        _ => UNKNOWN_NUCLEOTIDE,
    }
}

/// Reverse complement a sequence in place.
pub fn reverse_complement_in_place(seq: &mut [Nucleotide]) {
    let n = seq.len();
    // iterate from 0 to floor(n / 2) - 1
    for i in 0 .. (n / 2) {
        let j = n - 1 - i;
        // complement nucleotide and reverse order in-place
        let x = complement(seq[i]);
        seq[i] = complement(seq[j]);
        seq[j] = x;
    }
    if n % 2 == 1 {
        // if sequence length is odd, then the lone middle element has not been touched
        let j = n / 2;
        seq[j] = complement(seq[j]);
    }
}

/// Reverse complement of a sequence, read 5' to 3' on the opposite strand.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement).collect()
}

/// Uppercased codon key for a triplet of symbols.
/// Returns None unless `symbols` holds exactly three ASCII characters.
pub fn codon_of(symbols: &[Nucleotide]) -> Option<Codon> {
    match *symbols {
        [a, b, c] if a.is_ascii() && b.is_ascii() && c.is_ascii() => Some([
            (a as u8).to_ascii_uppercase(),
            (b as u8).to_ascii_uppercase(),
            (c as u8).to_ascii_uppercase(),
        ]),
        _ => None,
    }
}
