//! Analysis requests as a host receives them, and the engine results they produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::align::{align_with, Alignment, Scoring};
use crate::error::{Error, Field, Result};
use crate::orf::{find_orfs, Orf};
use crate::validate::check_sequence;
use crate::variant::{call_variants, VariantCall};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    VariantDetection,
    SequenceAlignment,
    OrfDetection,
}

impl AnalysisType {
    pub fn all() -> [AnalysisType; 3] {
        [AnalysisType::VariantDetection, AnalysisType::SequenceAlignment, AnalysisType::OrfDetection]
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            AnalysisType::VariantDetection => "variant_detection",
            AnalysisType::SequenceAlignment => "sequence_alignment",
            AnalysisType::OrfDetection => "orf_detection",
        }
    }

    /// Human-readable name.
    pub fn title(&self) -> &'static str {
        match *self {
            AnalysisType::VariantDetection => "Variant Detection",
            AnalysisType::SequenceAlignment => "Sequence Alignment",
            AnalysisType::OrfDetection => "ORF Detection",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AnalysisType::all().iter()
            .find(|t| t.as_str() == s)
            .cloned()
            .ok_or_else(|| Error::UnknownAnalysisType(s.to_owned()))
    }
}

/// Request body for one analysis, tagged by `analysis_type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "analysis_type", rename_all = "snake_case")]
pub enum AnalysisRequest {
    VariantDetection {
        reference_sequence: String,
        sample_sequence: String,
    },
    SequenceAlignment {
        reference_sequence: String,
        sample_sequence: String,
    },
    OrfDetection {
        input_sequence: String,
    },
}

/// Response body of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    Variants(VariantCall),
    Alignment(Alignment),
    Orfs(Vec<Orf>),
}

impl AnalysisRequest {
    pub fn analysis_type(&self) -> AnalysisType {
        match *self {
            AnalysisRequest::VariantDetection { .. } => AnalysisType::VariantDetection,
            AnalysisRequest::SequenceAlignment { .. } => AnalysisType::SequenceAlignment,
            AnalysisRequest::OrfDetection { .. } => AnalysisType::OrfDetection,
        }
    }

    /// Input sequences paired with the field they came from.
    pub fn sequences(&self) -> Vec<(Field, &str)> {
        match *self {
            AnalysisRequest::VariantDetection { ref reference_sequence, ref sample_sequence } |
            AnalysisRequest::SequenceAlignment { ref reference_sequence, ref sample_sequence } => {
                vec![(Field::Reference, reference_sequence.as_str()), (Field::Sample, sample_sequence.as_str())]
            },
            AnalysisRequest::OrfDetection { ref input_sequence } => {
                vec![(Field::Input, input_sequence.as_str())]
            },
        }
    }

    /// Check every input sequence; the first failure is returned.
    pub fn validate(&self, max_length: usize) -> Result<()> {
        for (field, seq) in self.sequences() {
            if let Err(err) = check_sequence(field, seq, max_length) {
                warn!(analysis = %self.analysis_type(), error = %err, "rejected request");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Run the engine on unchecked input.
    pub fn run(&self, scoring: &Scoring) -> AnalysisOutput {
        info!(analysis = %self.analysis_type(), "running analysis");
        match *self {
            AnalysisRequest::VariantDetection { ref reference_sequence, ref sample_sequence } => {
                AnalysisOutput::Variants(call_variants(reference_sequence, sample_sequence))
            },
            AnalysisRequest::SequenceAlignment { ref reference_sequence, ref sample_sequence } => {
                AnalysisOutput::Alignment(align_with(reference_sequence, sample_sequence, scoring))
            },
            AnalysisRequest::OrfDetection { ref input_sequence } => {
                AnalysisOutput::Orfs(find_orfs(input_sequence))
            },
        }
    }

    /// Validate, then run.
    pub fn execute(&self, scoring: &Scoring, max_length: usize) -> Result<AnalysisOutput> {
        self.validate(max_length)?;
        Ok(self.run(scoring))
    }
}
