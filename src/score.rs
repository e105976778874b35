//! Per-adapter barcode scoring and per-read aggregation.
//!
//! Each adapter occurrence contributes one score vector (one entry per panel
//! barcode) built from its two flanks. The combination rule depends on the
//! [`ScoringStrategy`], which is fixed when the engine is built:
//!
//! - **Legacy**: forward and reverse-complement scorers on both flanks;
//!   with both flanks present the score is
//!   `max((fwd(L) + rev(R)) / 2, (rev(L) + fwd(R)) / 2)`, with one flank it
//!   is `max(fwd(F), rev(F))` (no averaging divisor).
//! - **Paired**: both flanks against the oriented panel; averaged when both
//!   are present, taken as-is when only one is.
//! - **Symmetric**: as paired, but against the panel as given.
//!
//! An adapter with neither flank contributes the zero vector. The read-level
//! vector is the elementwise sum over adapters.
//!
//! The legacy single-flank rule is on a different scale from the two-flank
//! rule (no divisor), so reads mixing both patterns sum scores of unequal
//! weight. This is kept as-is.
use log::trace;

use crate::align::SequenceAligner;
use crate::barcode::BarcodePanel;
use crate::config::{LabelerConfig, ScoreMode};
use crate::flank::{Flank, FlankExtractor, FlankPair, Workflow};
use crate::read::{ReadAccessor, HQ_END_TIME, HQ_START_TIME};

/// Raw evidence for one read, consumed once by the classifier.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBundle {
    pub hole_number: u64,
    /// Adapters actually scored, including a first-read fallback.
    pub adapter_count: usize,
    /// Elementwise sum of `adapter_scores`.
    pub scores: Vec<f64>,
    /// One vector per scored adapter, in read order.
    pub adapter_scores: Vec<Vec<f64>>,
    pub used_fallback_first_read: bool,
}

/// Flank scorers and their combination rule.
#[derive(Clone, Debug)]
pub enum ScoringStrategy {
    Legacy { forward: SequenceAligner, reverse: SequenceAligner },
    Paired { oriented: SequenceAligner },
    Symmetric { forward: SequenceAligner },
}

impl ScoringStrategy {
    /// Pick the strategy for a workflow/mode; the legacy workflow always scores the legacy way.
    pub fn for_panel(panel: &BarcodePanel, mode: ScoreMode, workflow: Workflow, config: &LabelerConfig) -> Self {
        let aligner = |refs: &[Vec<u8>]| SequenceAligner::new(refs.to_vec(), config.align);
        match (workflow, mode) {
            (Workflow::Legacy, _) => ScoringStrategy::Legacy {
                forward: aligner(panel.forward()),
                reverse: aligner(panel.reverse()),
            },
            (Workflow::Current, ScoreMode::Paired) => ScoringStrategy::Paired { oriented: aligner(panel.oriented()) },
            (Workflow::Current, ScoreMode::Symmetric) => ScoringStrategy::Symmetric { forward: aligner(panel.forward()) },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoringStrategy::Legacy { .. } => "legacy",
            ScoringStrategy::Paired { .. } => "paired",
            ScoringStrategy::Symmetric { .. } => "symmetric",
        }
    }

    /// Score one adapter's flanks. `zero` is the panel-sized zero vector.
    pub fn score_pair(&self, pair: &FlankPair, zero: &[f64]) -> Vec<f64> {
        match self {
            ScoringStrategy::Legacy { forward, reverse } => match (&pair.left, &pair.right) {
                (Flank::Present(l), Flank::Present(r)) => {
                    let a = halve(add(forward.score(l), &reverse.score(r)));
                    let b = halve(add(reverse.score(l), &forward.score(r)));
                    elementwise_max(a, &b)
                }
                (Flank::Present(s), Flank::Absent) | (Flank::Absent, Flank::Present(s)) => {
                    elementwise_max(forward.score(s), &reverse.score(s))
                }
                (Flank::Absent, Flank::Absent) => zero.to_vec(),
            },
            ScoringStrategy::Paired { oriented: scorer } | ScoringStrategy::Symmetric { forward: scorer } => {
                match (&pair.left, &pair.right) {
                    (Flank::Present(l), Flank::Present(r)) => halve(add(scorer.score(l), &scorer.score(r))),
                    (Flank::Present(s), Flank::Absent) | (Flank::Absent, Flank::Present(s)) => scorer.score(s),
                    (Flank::Absent, Flank::Absent) => zero.to_vec(),
                }
            }
        }
    }
}

fn add(mut a: Vec<f64>, b: &[f64]) -> Vec<f64> {
    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
    a
}

fn halve(mut a: Vec<f64>) -> Vec<f64> {
    a.iter_mut().for_each(|x| *x /= 2.0);
    a
}

fn elementwise_max(mut a: Vec<f64>, b: &[f64]) -> Vec<f64> {
    a.iter_mut().zip(b).for_each(|(x, y)| *x = x.max(*y));
    a
}

/// Turns a read into a [`ScoreBundle`].
#[derive(Clone, Debug)]
pub struct AdapterScoringEngine {
    extractor: FlankExtractor,
    strategy: ScoringStrategy,
    zero: Vec<f64>,
    barcode_length: usize,
    insert_side_pad: usize,
    max_hits: usize,
    score_first: bool,
    start_time_cutoff: f64,
}

impl AdapterScoringEngine {
    pub fn new(panel: &BarcodePanel, config: &LabelerConfig) -> Self {
        let workflow = Workflow::from_old_flag(config.use_old_workflow);
        let extractor = FlankExtractor::new(panel.barcode_length(), config.insert_side_pad, config.adapter_side_pad, workflow);
        let strategy = ScoringStrategy::for_panel(panel, config.score_mode, extractor.workflow(), config);
        Self {
            extractor,
            strategy,
            zero: panel.zero_scores(),
            barcode_length: panel.barcode_length(),
            insert_side_pad: config.insert_side_pad,
            max_hits: config.max_hits,
            score_first: config.score_first,
            start_time_cutoff: config.start_time_cutoff,
        }
    }

    pub fn strategy(&self) -> &ScoringStrategy { &self.strategy }

    pub fn extractor(&self) -> &FlankExtractor { &self.extractor }

    /// Flanks of the first `max_hits` adapters, or of the read's 5' tip when
    /// none were found and the fallback applies. The flag reports the fallback.
    pub fn collect_flanks<R: ReadAccessor + ?Sized>(&self, read: &R) -> (Vec<FlankPair>, bool) {
        let flanks: Vec<FlankPair> = read
            .adapter_regions()
            .into_iter()
            .take(self.max_hits)
            .map(|(s, e)| self.extractor.extract(read, s, e))
            .collect();
        if !flanks.is_empty() || !self.score_first {
            return (flanks, false);
        }
        match self.first_read_flank(read) {
            Some(pair) => (vec![pair], true),
            None => (flanks, false),
        }
    }

    /// `(prefix, absent)` from the first `min(L + insert_side_pad, hq_end)` bases,
    /// if the read has an HQ region starting no later than the cutoff.
    fn first_read_flank<R: ReadAccessor + ?Sized>(&self, read: &R) -> Option<FlankPair> {
        let start = read.metric(HQ_START_TIME)?;
        let end = read.metric(HQ_END_TIME)?;
        if !(start < end && start <= self.start_time_cutoff) {
            return None;
        }
        let len = (self.barcode_length + self.insert_side_pad).min(read.hq_region().1);
        let prefix = read.read(0, len as i64).ok()?;
        if prefix.len() < self.barcode_length {
            return None;
        }
        Some(FlankPair::new(Flank::Present(prefix), Flank::Absent))
    }

    /// Score already-extracted flanks.
    pub fn score_flanks(&self, hole_number: u64, flanks: &[FlankPair], used_fallback_first_read: bool) -> ScoreBundle {
        let adapter_scores: Vec<Vec<f64>> = flanks.iter().map(|p| self.strategy.score_pair(p, &self.zero)).collect();
        let scores = adapter_scores.iter().fold(self.zero.clone(), |acc, v| add(acc, v));
        ScoreBundle {
            hole_number,
            adapter_count: adapter_scores.len(),
            scores,
            adapter_scores,
            used_fallback_first_read,
        }
    }

    pub fn score_read<R: ReadAccessor + ?Sized>(&self, read: &R) -> ScoreBundle {
        let (flanks, used_fallback) = self.collect_flanks(read);
        trace!(
            "hole {}: {} adapter flank pair(s){}",
            read.hole_number(),
            flanks.len(),
            if used_fallback { " (first-read fallback)" } else { "" }
        );
        self.score_flanks(read.hole_number(), &flanks, used_fallback)
    }
}
