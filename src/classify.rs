//! Ranking of a [`ScoreBundle`] into a best / second-best barcode call.
//!
//! In symmetric mode every barcode is a candidate label. In paired mode the
//! candidates are the adjacent mate pairs `(2k, 2k+1)`:
//!
//! - one adapter: a pair scores the larger of its two aggregate entries;
//! - several adapters: the two ends alternate from adapter to adapter, so a
//!   pair scores the better of the two alternating assignments
//!   (`2k` on even adapters and `2k+1` on odd ones, or the reverse). A missed
//!   adapter breaks the alternation and lowers the score, nothing worse.
//!
//! Ties keep panel order.
use crate::barcode::BarcodePanel;
use crate::config::ScoreMode;
use crate::error::LabelError;
use crate::score::ScoreBundle;

/// Final call for one read.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledResult {
    pub hole_number: u64,
    pub adapter_count: usize,
    /// Barcode index (symmetric) or pair index (paired).
    pub best_index: usize,
    pub best_score: f64,
    pub second_best_index: usize,
    pub second_best_score: f64,
    pub adapter_scores: Vec<Vec<f64>>,
}

/// Label indices ordered by descending score; equal scores keep index order.
pub fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// `max(scores[2k], scores[2k+1])` for every pair `k`.
pub fn pair_max_scores(scores: &[f64]) -> Vec<f64> {
    scores.chunks_exact(2).map(|p| p[0].max(p[1])).collect()
}

/// Best alternating-orientation sum over adapters for every pair `k`.
pub fn pair_orientation_scores(adapter_scores: &[Vec<f64>], pair_count: usize) -> Vec<f64> {
    (0..pair_count)
        .map(|k| {
            let (i, j) = (2 * k, 2 * k + 1);
            let mut paths = [0.0f64; 2];
            for (n, scores) in adapter_scores.iter().enumerate() {
                paths[n % 2] += scores[i];
                paths[1 - n % 2] += scores[j];
            }
            paths[0].max(paths[1])
        })
        .collect()
}

/// Turns score bundles into calls for one scoring mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZmwClassifier {
    mode: ScoreMode,
    pair_count: usize,
}

impl ZmwClassifier {
    /// Check the panel supports ranking in `mode`: at least two barcodes for
    /// symmetric, an even count of at least four for paired.
    pub fn new(mode: ScoreMode, panel: &BarcodePanel) -> Result<Self, LabelError> {
        let n = panel.len();
        match mode {
            ScoreMode::Symmetric if n < 2 => {
                return Err(LabelError::TooFewBarcodes { mode: "symmetric", found: n, required: 2 });
            }
            ScoreMode::Paired if n % 2 != 0 => return Err(LabelError::UnpairedPanel(n)),
            ScoreMode::Paired if n < 4 => {
                return Err(LabelError::TooFewBarcodes { mode: "paired", found: n, required: 4 });
            }
            _ => {}
        }
        Ok(Self { mode, pair_count: panel.pair_count() })
    }

    /// Score per candidate label (barcode or pair).
    pub fn label_scores(&self, bundle: &ScoreBundle) -> Vec<f64> {
        match self.mode {
            ScoreMode::Symmetric => bundle.scores.clone(),
            ScoreMode::Paired if bundle.adapter_count == 1 => pair_max_scores(&bundle.scores),
            ScoreMode::Paired => pair_orientation_scores(&bundle.adapter_scores, self.pair_count),
        }
    }

    /// Rank a bundle; reads without a scored adapter yield no call.
    pub fn classify(&self, bundle: ScoreBundle) -> Option<LabeledResult> {
        if bundle.adapter_count == 0 {
            return None;
        }
        let scores = self.label_scores(&bundle);
        let order = rank_descending(&scores);
        let (best, second) = (*order.first()?, *order.get(1)?);
        Some(LabeledResult {
            hole_number: bundle.hole_number,
            adapter_count: bundle.adapter_count,
            best_index: best,
            best_score: scores[best],
            second_best_index: second,
            second_best_score: scores[second],
            adapter_scores: bundle.adapter_scores,
        })
    }
}
