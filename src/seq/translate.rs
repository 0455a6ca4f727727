use crate::constants::*;
use crate::seq::{CodonTable, Nucleotide};

/// Translate a nucleotide sequence into a protein sequence.
///
/// Codons are read from offset 0 without overlap; an incomplete trailing
/// codon is dropped. Translation stops after the first stop codon, whose
/// stop residue is kept.
pub fn translate(seq: &str) -> String {
    let symbols: Vec<Nucleotide> = seq.chars().collect();
    translate_symbols(&symbols)
}

pub(crate) fn translate_symbols(symbols: &[Nucleotide]) -> String {
    let table = CodonTable::standard();
    let mut protein = String::with_capacity(symbols.len() / 3);
    for triplet in symbols.chunks_exact(3) {
        let aa = table.lookup(triplet);
        protein.push(aa);
        if aa == STOP_RESIDUE {
            break;
        }
    }
    protein
}
