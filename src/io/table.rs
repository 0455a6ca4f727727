//! Tab-separated output of analysis results and history.

use std::io;

use crate::align::Alignment;
use crate::constants::GAP;
use crate::error::Result;
use crate::history::{DailyCounts, Entry, TypeCount};
use crate::orf::Orf;
use crate::variant::{Variant, VariantCall};

/// A tab-separated table writer.
pub struct Writer<W: io::Write> {
    inner: csv::Writer<W>,
}

impl<W: io::Write> Writer<W> {
    /// Write to a given writer.
    pub fn new(writer: W) -> Self {
        Writer {
            inner: csv::WriterBuilder::new()
                .delimiter(b'\t')
                .has_headers(true)
                .from_writer(writer),
        }
    }

    pub fn write_alignment(&mut self, alignment: &Alignment) -> Result<()> {
        self.inner.serialize(alignment)?;
        self.flush()
    }

    /// One row per variant; the absent base of an indel is shown as a gap.
    pub fn write_variants(&mut self, call: &VariantCall) -> Result<()> {
        self.inner.write_record(&["position", "type", "reference_base", "sample_base", "notation"])?;
        for v in call.variants.iter() {
            let (nt_ref, nt_alt) = match *v {
                Variant::Substitution { reference_base, sample_base, .. } => (reference_base, sample_base),
                Variant::Insertion { inserted_base, .. } => (GAP, inserted_base),
                Variant::Deletion { deleted_base, .. } => (deleted_base, GAP),
            };
            self.inner.write_record(&[
                v.position().to_string(),
                v.kind().to_owned(),
                nt_ref.to_string(),
                nt_alt.to_string(),
                v.to_string(),
            ])?;
        }
        self.flush()
    }

    pub fn write_orfs(&mut self, orfs: &[Orf]) -> Result<()> {
        if orfs.is_empty() {
            self.inner.write_record(&[
                "strand", "frame", "start", "end", "length", "nucleotide_seq", "protein_seq",
            ])?;
        }
        for orf in orfs {
            self.inner.serialize(orf)?;
        }
        self.flush()
    }

    pub fn write_entries(&mut self, entries: &[Entry]) -> Result<()> {
        if entries.is_empty() {
            self.inner.write_record(&["id", "analysis_type", "fingerprint", "created_at"])?;
        }
        for entry in entries {
            self.inner.serialize(entry)?;
        }
        self.flush()
    }

    pub fn write_type_counts(&mut self, counts: &[TypeCount]) -> Result<()> {
        if counts.is_empty() {
            self.inner.write_record(&["analysis_type", "analysis_count"])?;
        }
        for count in counts {
            self.inner.serialize(count)?;
        }
        self.flush()
    }

    /// Long format: one row per date and analysis type.
    pub fn write_daily_counts(&mut self, daily: &DailyCounts) -> Result<()> {
        self.inner.write_record(&["date", "analysis_type", "analysis_count"])?;
        for (day, by_type) in daily.iter() {
            for (analysis_type, count) in by_type.iter() {
                self.inner.write_record(&[day.as_str(), analysis_type.as_str(), count.to_string().as_str()])?;
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::orf::find_orfs;
    use crate::variant::call_variants;

    fn written<F: FnOnce(&mut Writer<&mut Vec<u8>>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        {
            let mut writer = Writer::new(&mut buf);
            f(&mut writer).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_alignment() {
        let out = written(|w| w.write_alignment(&align("ACGT", "AGT")));
        assert_eq!(out, "aligned_sequence_1\taligned_sequence_2\talignment_score\nACGT\tA-GT\t1\n");
    }

    #[test]
    fn test_write_variants() {
        let out = written(|w| w.write_variants(&call_variants("ACGTACGT", "ACCACGT")));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "position\ttype\treference_base\tsample_base\tnotation");
        assert!(lines.len() >= 2);
        assert!(lines[1..].iter().all(|l| l.split('\t').count() == 5));
    }

    #[test]
    fn test_write_variants_deletion() {
        let out = written(|w| w.write_variants(&call_variants("ACGTACGT", "ACGACGT")));
        assert_eq!(out.lines().nth(1), Some("4\tdeletion\tT\t-\t4delT"));
    }

    #[test]
    fn test_write_orfs() {
        let out = written(|w| w.write_orfs(&find_orfs("ATGAAATAG")));
        assert_eq!(
            out,
            "strand\tframe\tstart\tend\tlength\tnucleotide_seq\tprotein_seq\n+\t1\t0\t9\t9\tATGAAATAG\tMK*\n"
        );

        let out = written(|w| w.write_orfs(&[]));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_write_daily_counts() {
        let mut daily = DailyCounts::new();
        let mut by_type = linked_hash_map::LinkedHashMap::new();
        by_type.insert("orf_detection".to_owned(), 2);
        daily.insert("2024-11-01".to_owned(), by_type);
        let out = written(|w| w.write_daily_counts(&daily));
        assert_eq!(out, "date\tanalysis_type\tanalysis_count\n2024-11-01\torf_detection\t2\n");
    }
}
