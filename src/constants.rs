pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];
pub const N_NUCLEOTIDES: usize = 4;

pub const N_CODONS: usize = N_NUCLEOTIDES * N_NUCLEOTIDES * N_NUCLEOTIDES;

pub const GAP: char = '-';
pub const UNKNOWN_NUCLEOTIDE: char = 'N';
pub const UNKNOWN_RESIDUE: char = 'X';
pub const STOP_RESIDUE: char = '*';

pub const START_CODON: [u8; 3] = *b"ATG";
pub const STOP_CODONS: [[u8; 3]; 3] = [*b"TAA", *b"TAG", *b"TGA"];

pub const DEFAULT_MATCH_SCORE: i32 = 1;
pub const DEFAULT_MISMATCH_SCORE: i32 = -1;
pub const DEFAULT_GAP_SCORE: i32 = -2;

/// Longest sequence accepted from a caller before the O(n m) aligner runs.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 10_000;
