//! Core types for **barcodes** and the immutable **barcode panel**.
//!
//! A [`BarcodePanel`] is built once per run from an ordered barcode set and is
//! read-only afterwards. Besides the sequences as given it carries two derived
//! views used by the scorers:
//!
//! - the reverse-complemented panel (legacy workflow, reverse scorer);
//! - the *oriented* panel: even-indexed entries forward, odd-indexed entries
//!   reverse-complemented (paired scoring in the current workflow).
//!
//! The panel also fixes the length of every score vector, so callers ask it
//! for a zero vector instead of sizing one per call.
//!
//! # Examples
//! ```
//! use flankcall::barcode::{Barcode, BarcodePanel};
//! let panel = BarcodePanel::new(vec![
//!     Barcode::new("bc1", "AAAACCCC"),
//!     Barcode::new("bc2", "GGGGTTTT"),
//! ]).unwrap();
//! assert_eq!(panel.barcode_length(), 8);
//! assert_eq!(panel.oriented()[1], b"AAAACCCC".to_vec());
//! ```
use core::fmt;

use bio::alphabets::dna;

use crate::error::LabelError;

/// Separator between the two barcode names of a label (`"bc1--bc2"`).
pub const LABEL_SEPARATOR: &str = "--";

/// A named barcode sequence over `A|C|G|T`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Barcode {
    /// Name from the reference set (e.g. FASTA identifier).
    pub name: String,
    /// Uppercase nucleotide sequence.
    pub sequence: String,
}

impl Barcode {
    /// Build a barcode, upper-casing the sequence.
    pub fn new(name: impl Into<String>, sequence: impl AsRef<str>) -> Self {
        Self { name: name.into(), sequence: sequence.as_ref().to_ascii_uppercase() }
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}:{}", self.name, self.sequence) }
}

/// Join two barcode names into a call label.
pub fn make_barcode_label(first: &str, second: &str) -> String {
    format!("{first}{LABEL_SEPARATOR}{second}")
}

/// Ordered barcode set plus its derived orientations.
#[derive(Clone, Debug)]
pub struct BarcodePanel {
    barcodes: Vec<Barcode>,
    forward: Vec<Vec<u8>>,
    reverse: Vec<Vec<u8>>,
    oriented: Vec<Vec<u8>>,
    barcode_length: usize,
}

impl BarcodePanel {
    /// Validate and build a panel.
    ///
    /// Fails if the set or any barcode is empty, if any barcode contains a
    /// base outside `A|C|G|T`, or if the barcodes do not all share one length.
    pub fn new(barcodes: Vec<Barcode>) -> Result<Self, LabelError> {
        let first = barcodes.first().ok_or(LabelError::EmptyPanel)?;
        let barcode_length = first.sequence.len();

        for bc in &barcodes {
            if bc.sequence.is_empty() {
                return Err(LabelError::EmptyBarcode { name: bc.name.clone() });
            }
            if let Some(base) = bc.sequence.chars().find(|c| !matches!(c, 'A' | 'C' | 'G' | 'T')) {
                return Err(LabelError::InvalidBase { name: bc.name.clone(), base });
            }
            if bc.sequence.len() != barcode_length {
                return Err(LabelError::NonUniformLength {
                    expected: barcode_length,
                    name: bc.name.clone(),
                    found: bc.sequence.len(),
                });
            }
        }

        let forward: Vec<Vec<u8>> = barcodes.iter().map(|b| b.sequence.as_bytes().to_vec()).collect();
        let reverse: Vec<Vec<u8>> = forward.iter().map(|s| dna::revcomp(s)).collect();
        let oriented = forward
            .iter()
            .zip(&reverse)
            .enumerate()
            .map(|(i, (f, r))| if i % 2 == 0 { f.clone() } else { r.clone() })
            .collect();

        Ok(Self { barcodes, forward, reverse, oriented, barcode_length })
    }

    /// Number of barcodes (and the length of every score vector).
    pub fn len(&self) -> usize { self.barcodes.len() }

    /// Always `false` for a constructed panel.
    pub fn is_empty(&self) -> bool { self.barcodes.is_empty() }

    /// Shared length `L` of every barcode.
    pub fn barcode_length(&self) -> usize { self.barcode_length }

    pub fn barcodes(&self) -> &[Barcode] { &self.barcodes }

    /// Sequences as given.
    pub fn forward(&self) -> &[Vec<u8>] { &self.forward }

    /// Reverse complement of every sequence, same order.
    pub fn reverse(&self) -> &[Vec<u8>] { &self.reverse }

    /// Even entries forward, odd entries reverse-complemented.
    pub fn oriented(&self) -> &[Vec<u8>] { &self.oriented }

    /// Zero score vector sized to this panel.
    pub fn zero_scores(&self) -> Vec<f64> { vec![0.0; self.len()] }

    /// Number of adjacent (2k, 2k+1) mate pairs.
    pub fn pair_count(&self) -> usize { self.len() / 2 }

    /// One `"bc--bc"` label per barcode.
    pub fn symmetric_labels(&self) -> Vec<String> {
        self.barcodes.iter().map(|b| make_barcode_label(&b.name, &b.name)).collect()
    }

    /// One `"bc[2k]--bc[2k+1]"` label per mate pair; a trailing unpaired barcode is ignored.
    pub fn paired_labels(&self) -> Vec<String> {
        self.barcodes
            .chunks_exact(2)
            .map(|p| make_barcode_label(&p[0].name, &p[1].name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel4() -> BarcodePanel {
        BarcodePanel::new(vec![
            Barcode::new("bc1", "acgtac"),
            Barcode::new("bc2", "AAACCC"),
            Barcode::new("bc3", "GGGTTT"),
            Barcode::new("bc4", "ACACAC"),
        ])
        .unwrap()
    }

    #[test]
    fn sequences_are_uppercased_and_length_recorded() {
        let p = panel4();
        assert_eq!(p.barcodes()[0].sequence, "ACGTAC");
        assert_eq!(p.barcode_length(), 6);
        assert_eq!(p.len(), 4);
        assert!(!p.is_empty());
        assert_eq!(p.zero_scores(), vec![0.0; 4]);
    }

    #[test]
    fn reverse_and_oriented_views() {
        let p = panel4();
        assert_eq!(p.reverse()[1], b"GGGTTT".to_vec());
        assert_eq!(p.oriented()[0], p.forward()[0]);
        assert_eq!(p.oriented()[1], p.reverse()[1]);
        assert_eq!(p.oriented()[2], p.forward()[2]);
        assert_eq!(p.oriented()[3], b"GTGTGT".to_vec());
    }

    #[test]
    fn non_uniform_lengths_are_rejected() {
        let err = BarcodePanel::new(vec![Barcode::new("a", "ACGT"), Barcode::new("b", "ACG")]).unwrap_err();
        assert_eq!(err, LabelError::NonUniformLength { expected: 4, name: "b".into(), found: 3 });
    }

    #[test]
    fn empty_and_non_acgt_are_rejected() {
        assert_eq!(BarcodePanel::new(vec![]).unwrap_err(), LabelError::EmptyPanel);
        let err = BarcodePanel::new(vec![Barcode::new("n", "ACNT")]).unwrap_err();
        assert!(matches!(err, LabelError::InvalidBase { base: 'N', .. }));
        let err = BarcodePanel::new(vec![Barcode::new("x", ""), Barcode::new("y", "")]).unwrap_err();
        assert_eq!(err, LabelError::EmptyBarcode { name: "x".into() });
    }

    #[test]
    fn labels_follow_mode() {
        let p = panel4();
        assert_eq!(p.symmetric_labels()[2], "bc3--bc3");
        assert_eq!(p.paired_labels(), vec!["bc1--bc2".to_string(), "bc3--bc4".to_string()]);
        assert_eq!(p.pair_count(), 2);
    }
}
