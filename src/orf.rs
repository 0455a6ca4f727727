//! Open reading frames across the six reading frames of a sequence.
//!
//! An ORF opens at an in-frame ATG and closes at the next in-frame stop codon
//! (TAA, TAG, TGA), or at the end of the sequence if none follows.
//! All coordinates are 0-based, half-open, on the forward strand.

use bio_types::strand::Strand;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::seq::{self, codon_of, CodonTable, DnaSeq, Nucleotide};
use crate::seq::translate::translate_symbols;

/// Open reading frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Orf {
    /// Strand the ORF is read from (forward or reverse)
    #[serde(serialize_with = "serialize_strand")]
    pub strand: Strand,
    /// Reading frame within its strand (1, 2, or 3)
    pub frame: u8,
    /// Forward-strand start position
    pub start: usize,
    /// Forward-strand end position (exclusive)
    pub end: usize,
    pub length: usize,
    /// Nucleotides from the start codon through the stop codon, read on `strand`
    pub nucleotide_seq: String,
    pub protein_seq: String,
}

fn serialize_strand<S: Serializer>(strand: &Strand, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(strand.strand_symbol())
}

/// Find ORFs in the three forward frames, then the three reverse frames.
/// Overlapping and nested ORFs are all reported.
pub fn find_orfs(seq: &str) -> Vec<Orf> {
    let mut symbols: DnaSeq = seq.chars().collect();

    let mut orfs = scan(&symbols, Strand::Forward);
    seq::reverse_complement_in_place(&mut symbols);
    orfs.extend(scan(&symbols, Strand::Reverse));

    debug!(n_orfs = orfs.len(), "found open reading frames");
    orfs
}

/// Scan one strand; `symbols` is already read 5' to 3' on `strand`.
fn scan(symbols: &[Nucleotide], strand: Strand) -> Vec<Orf> {
    let n = symbols.len();
    let mut orfs = Vec::new();

    for offset in 0 .. 3 {
        let frame = offset as u8 + 1;
        let mut start_pos: Option<usize> = None;

        let mut pos = offset;
        while pos + 3 <= n {
            if let Some(codon) = codon_of(&symbols[pos .. pos + 3]) {
                match start_pos {
                    None if CodonTable::is_start(&codon) => {
                        start_pos = Some(pos);
                    },
                    Some(start) if CodonTable::is_stop(&codon) => {
                        orfs.push(make_orf(symbols, strand, frame, start, pos + 3));
                        start_pos = None;
                    },
                    _ => {},
                }
            }
            pos += 3;
        }

        // no stop codon before the sequence ended: run to the end,
        // including any trailing partial codon
        if let Some(start) = start_pos {
            orfs.push(make_orf(symbols, strand, frame, start, n));
        }

        trace!(strand = strand.strand_symbol(), frame, n_orfs = orfs.len(), "scanned frame");
    }

    orfs
}

/// Build an ORF from strand-local coordinates [start, end).
fn make_orf(symbols: &[Nucleotide], strand: Strand, frame: u8, start: usize, end: usize) -> Orf {
    let span = &symbols[start .. end];
    let (fwd_start, fwd_end) = match strand {
        Strand::Reverse => {
            let n = symbols.len();
            (n - end, n - start)
        },
        _ => (start, end),
    };

    Orf {
        strand: strand,
        frame: frame,
        start: fwd_start,
        end: fwd_end,
        length: fwd_end - fwd_start,
        nucleotide_seq: span.iter().collect(),
        protein_seq: translate_symbols(span),
    }
}
