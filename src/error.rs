use std::io;
use std::result;

use thiserror::Error;

/// Sequence field named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Reference,
    Sample,
    Input,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match *self {
            Field::Reference => "Reference",
            Field::Sample => "Sample",
            Field::Input => "Input",
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sql(#[from] rusqlite::Error),

    #[error("invalid FASTA input: {0}")]
    Fasta(String),

    #[error("no FASTA record named '{0}'")]
    MissingRecord(String),

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error("{} sequence must not be empty.", .0.label())]
    EmptySequence(Field),

    #[error("{} sequence contains invalid characters. Only A, T, G, C are allowed.", .field.label())]
    InvalidSymbol { field: Field, symbol: char, position: usize },

    #[error("{} sequence is {length} long; at most {max} is allowed.", .field.label())]
    SequenceTooLong { field: Field, length: usize, max: usize },

    #[error("unknown analysis type '{0}'")]
    UnknownAnalysisType(String),
}

impl Error {
    /// True for errors caused by caller input rather than by the environment.
    pub fn is_validation(&self) -> bool {
        match *self {
            Error::EmptySequence(_) |
            Error::InvalidSymbol { .. } |
            Error::SequenceTooLong { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
