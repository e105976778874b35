//! Extraction of the sequences flanking a detected adapter.
//!
//! For an adapter spanning `[s, e)` and barcode length `L`:
//!
//! ```text
//! left  = [s - (L + insert_side_pad), s + adapter_side_pad)
//! right = [e - adapter_side_pad,      e + L + insert_side_pad)
//! ```
//!
//! In the [`Workflow::Current`] convention the left window is
//! reverse-complemented so that both flanks read away from the adapter. The
//! [`Workflow::Legacy`] convention returns both windows as read.
use bio::alphabets::dna;

use crate::read::ReadAccessor;

/// Flank orientation convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Workflow {
    /// Both flanks in read orientation.
    Legacy,
    /// Left flank reverse-complemented; both flanks face away from the adapter.
    Current,
}

impl Workflow {
    pub fn from_old_flag(use_old_workflow: bool) -> Self {
        if use_old_workflow { Workflow::Legacy } else { Workflow::Current }
    }
}

/// One side of an adapter: bases, or nothing when the window ran off the read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flank {
    Present(Vec<u8>),
    Absent,
}

impl Flank {
    pub fn is_present(&self) -> bool { matches!(self, Flank::Present(_)) }

    pub fn as_present(&self) -> Option<&[u8]> {
        match self {
            Flank::Present(s) => Some(s),
            Flank::Absent => None,
        }
    }
}

/// Left and right flanks of one adapter occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlankPair {
    pub left: Flank,
    pub right: Flank,
}

impl FlankPair {
    pub fn new(left: Flank, right: Flank) -> Self { Self { left, right } }
}

/// Maps adapter coordinates on a read to a [`FlankPair`].
#[derive(Clone, Copy, Debug)]
pub struct FlankExtractor {
    barcode_length: usize,
    insert_side_pad: usize,
    adapter_side_pad: usize,
    workflow: Workflow,
}

impl FlankExtractor {
    pub fn new(barcode_length: usize, insert_side_pad: usize, adapter_side_pad: usize, workflow: Workflow) -> Self {
        Self { barcode_length, insert_side_pad, adapter_side_pad, workflow }
    }

    pub fn workflow(&self) -> Workflow { self.workflow }

    /// Left window `[start - (L + insert_side_pad), start + adapter_side_pad)`.
    pub fn left_window(&self, adapter_start: usize) -> (i64, i64) {
        let s = adapter_start as i64;
        (s - (self.barcode_length + self.insert_side_pad) as i64, s + self.adapter_side_pad as i64)
    }

    /// Right window `[end - adapter_side_pad, end + L + insert_side_pad)`.
    pub fn right_window(&self, adapter_end: usize) -> (i64, i64) {
        let e = adapter_end as i64;
        (e - self.adapter_side_pad as i64, e + (self.barcode_length + self.insert_side_pad) as i64)
    }

    /// Flanks around the adapter `[adapter_start, adapter_end)`.
    ///
    /// Windows falling outside the read become [`Flank::Absent`].
    pub fn extract<R: ReadAccessor + ?Sized>(&self, read: &R, adapter_start: usize, adapter_end: usize) -> FlankPair {
        let (ls, le) = self.left_window(adapter_start);
        let (rs, re) = self.right_window(adapter_end);
        let left = match read.read(ls, le) {
            Ok(bases) => match self.workflow {
                Workflow::Legacy => Flank::Present(bases),
                Workflow::Current => Flank::Present(dna::revcomp(bases)),
            },
            Err(_) => Flank::Absent,
        };
        let right = read.read(rs, re).map_or(Flank::Absent, Flank::Present);
        FlankPair { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::MemoryRead;

    // adapter at [12, 20); 32 bases
    const READ: &str = "AACCGGTTACGTAAAAAAAATTGCAGTCCAGG";

    #[test]
    fn windows_follow_pads() {
        let x = FlankExtractor::new(6, 2, 1, Workflow::Current);
        assert_eq!(x.left_window(12), (4, 13));
        assert_eq!(x.right_window(20), (19, 28));
    }

    #[test]
    fn legacy_returns_raw_left_window() {
        let r = MemoryRead::new(1, READ, vec![(12, 20)]);
        let x = FlankExtractor::new(6, 2, 0, Workflow::Legacy);
        let fp = x.extract(&r, 12, 20);
        assert_eq!(fp.left, Flank::Present(b"GGTTACGT".to_vec()));
        assert_eq!(fp.right, Flank::Present(b"TTGCAGTC".to_vec()));
    }

    #[test]
    fn current_reverse_complements_left_only() {
        let r = MemoryRead::new(1, READ, vec![(12, 20)]);
        let x = FlankExtractor::new(6, 2, 0, Workflow::Current);
        let fp = x.extract(&r, 12, 20);
        assert_eq!(fp.left, Flank::Present(dna::revcomp(b"GGTTACGT")));
        assert_eq!(fp.left, Flank::Present(b"ACGTAACC".to_vec()));
        assert_eq!(fp.right, Flank::Present(b"TTGCAGTC".to_vec()));
    }

    #[test]
    fn out_of_range_windows_are_absent() {
        let r = MemoryRead::new(1, READ, vec![(3, 28)]);
        let x = FlankExtractor::new(6, 2, 0, Workflow::Current);
        let fp = x.extract(&r, 3, 28);
        assert_eq!(fp.left, Flank::Absent);
        assert_eq!(fp.right, Flank::Absent);
        assert!(!fp.left.is_present());
        assert_eq!(fp.right.as_present(), None);
    }
}
