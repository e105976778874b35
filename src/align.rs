//! Local-alignment scoring of a query against a fixed reference panel.
//!
//! [`SequenceAligner`] holds an immutable list of references and reports, for
//! any query, the best Smith-Waterman score against each of them. Scoring uses
//! `bio`'s pairwise aligner in local mode. A fresh aligner workspace is built
//! per call, so a single `SequenceAligner` can be shared across threads.
//!
//! # Examples
//! ```
//! use flankcall::align::{AlignParams, SequenceAligner};
//! let aligner = SequenceAligner::new(vec![b"ACGTACGT".to_vec(), b"TTTTTTTT".to_vec()], AlignParams::default());
//! let s = aligner.score(b"GGACGTACGTGG");
//! assert_eq!(s[0], 16.0);
//! assert!(s[1] < s[0]);
//! ```
use bio::alignment::pairwise::{Aligner, Scoring};

/// Match/mismatch/gap parameters for the local aligner.
///
/// A gap of length `k` costs `gap_open + k * gap_extend`; both must be `<= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignParams {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_open: i32,
    pub gap_extend: i32,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self { match_score: 2, mismatch_score: -1, gap_open: 0, gap_extend: -1 }
    }
}

/// Scores queries against every member of a reference panel.
#[derive(Clone, Debug)]
pub struct SequenceAligner {
    references: Vec<Vec<u8>>,
    params: AlignParams,
}

impl SequenceAligner {
    /// Build an aligner over `references` (upper-cased on the way in).
    pub fn new(references: Vec<Vec<u8>>, params: AlignParams) -> Self {
        let references = references.into_iter().map(|r| r.to_ascii_uppercase()).collect();
        Self { references, params }
    }

    /// Number of references, i.e. the length of every vector returned by [`Self::score`].
    pub fn len(&self) -> usize { self.references.len() }

    pub fn is_empty(&self) -> bool { self.references.is_empty() }

    /// Best local-alignment score of `query` against each reference, in panel order.
    ///
    /// An empty query scores zero everywhere.
    pub fn score(&self, query: &[u8]) -> Vec<f64> {
        if query.is_empty() {
            return vec![0.0; self.len()];
        }
        let query = query.to_ascii_uppercase();
        let p = self.params;
        let scoring = Scoring::from_scores(p.gap_open, p.gap_extend, p.match_score, p.mismatch_score);
        let mut aligner = Aligner::with_scoring(scoring);
        self.references
            .iter()
            .map(|r| f64::from(aligner.local(&query, r).score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bio::alphabets::dna;

    fn panel() -> Vec<Vec<u8>> {
        vec![b"ACGTTGCA".to_vec(), b"GATTACAG".to_vec(), b"CCCCGGGG".to_vec(), b"TTAGCCAT".to_vec()]
    }

    #[test]
    fn exact_occurrence_scores_full_match() {
        let a = SequenceAligner::new(panel(), AlignParams::default());
        let s = a.score(b"ttttGATTACAGtttt");
        assert_eq!(s.len(), 4);
        assert_eq!(s[1], 16.0);
        assert!(s.iter().enumerate().all(|(i, &v)| i == 1 || v < 16.0));
    }

    #[test]
    fn single_mismatch_costs_match_plus_mismatch() {
        let a = SequenceAligner::new(vec![b"AAAAAAAAAA".to_vec()], AlignParams::default());
        // 9 matches, 1 mismatch in the middle: 9*2 - 1 = 17 beats clipping (5*2 = 10).
        assert_eq!(a.score(b"AAAAACAAAA")[0], 17.0);
    }

    #[test]
    fn empty_query_scores_zero() {
        let a = SequenceAligner::new(panel(), AlignParams::default());
        assert_eq!((a.len(), a.is_empty()), (4, false));
        assert_eq!(a.score(b""), vec![0.0; 4]);
        let none = SequenceAligner::new(vec![], AlignParams::default());
        assert!(none.is_empty() && none.score(b"ACGT").is_empty());
    }

    #[test]
    fn reverse_complement_symmetry() {
        let refs = panel();
        let rc_refs: Vec<Vec<u8>> = refs.iter().map(|r| dna::revcomp(r)).collect();
        let fwd = SequenceAligner::new(refs, AlignParams::default());
        let rev = SequenceAligner::new(rc_refs, AlignParams::default());
        for q in [&b"ACGTTACAGGCCGGTTAG"[..], b"GGGGCCCCAT", b"TGCAACGTAAAT"] {
            assert_eq!(fwd.score(q), rev.score(&dna::revcomp(q)));
        }
    }
}
