//! End-to-end barcode labeling of reads.
//!
//! [`BarcodeLabeler`] is built once per run from the barcode set and a
//! [`LabelerConfig`]; it owns the panel, the scoring engine and the classifier,
//! all immutable, so one labeler serves every worker thread without locking.
//!
//! ### Parallelism
//! Reads are independent. [`BarcodeLabeler::label_reads`] fans out over the
//! ambient Rayon pool; [`BarcodeLabeler::label_reads_with_threads`] builds a
//! local pool (`threads = None` uses all logical cores). Output follows input
//! order either way.
//!
//! ### Example
//! ```
//! use flankcall::{Barcode, BarcodeLabeler, LabelerConfig, MemoryRead};
//! let labeler = BarcodeLabeler::new(
//!     vec![Barcode::new("bc1", "GATTACAG"), Barcode::new("bc2", "CCTTGGCA")],
//!     LabelerConfig::default(),
//! ).unwrap();
//! let read = MemoryRead::new(1, "CCCCCTGTAATCATCTCTCTCAACGATTACAGTTTT", vec![(12, 24)]);
//! let call = labeler.label_read(&read).unwrap();
//! assert_eq!(labeler.label_name(call.best_index), Some("bc1--bc1"));
//! ```
use anyhow::Result;
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::barcode::{Barcode, BarcodePanel};
use crate::classify::{LabeledResult, ZmwClassifier};
use crate::config::{LabelerConfig, ScoreMode};
use crate::error::LabelError;
use crate::read::ReadAccessor;
use crate::score::{AdapterScoringEngine, ScoreBundle};

/// Scores and labels reads against one barcode panel.
#[derive(Clone, Debug)]
pub struct BarcodeLabeler {
    panel: BarcodePanel,
    config: LabelerConfig,
    engine: AdapterScoringEngine,
    classifier: ZmwClassifier,
    labels: Vec<String>,
}

impl BarcodeLabeler {
    /// Validate the barcode set against the configuration and build every
    /// stage of the pipeline.
    pub fn new(barcodes: Vec<Barcode>, config: LabelerConfig) -> Result<Self, LabelError> {
        let panel = BarcodePanel::new(barcodes)?;
        let classifier = ZmwClassifier::new(config.score_mode, &panel)?;
        let engine = AdapterScoringEngine::new(&panel, &config);
        let labels = match config.score_mode {
            ScoreMode::Symmetric => panel.symmetric_labels(),
            ScoreMode::Paired => panel.paired_labels(),
        };
        debug!(
            "Constructed BarcodeLabeler with scoreMode: {}, adapterSidePad: {}, insertSidePad: {}, scoreFirst: {}, oldWorkflow: {}",
            config.score_mode, config.adapter_side_pad, config.insert_side_pad, config.score_first, config.use_old_workflow
        );
        Ok(Self { panel, config, engine, classifier, labels })
    }

    pub fn panel(&self) -> &BarcodePanel { &self.panel }

    pub fn config(&self) -> &LabelerConfig { &self.config }

    pub fn engine(&self) -> &AdapterScoringEngine { &self.engine }

    /// Candidate label names, indexed like [`LabeledResult::best_index`].
    pub fn labels(&self) -> &[String] { &self.labels }

    pub fn label_name(&self, index: usize) -> Option<&str> { self.labels.get(index).map(String::as_str) }

    /// Raw score bundle for one read.
    pub fn score_read<R: ReadAccessor + ?Sized>(&self, read: &R) -> ScoreBundle { self.engine.score_read(read) }

    /// Call for one read; `None` when no adapter was scored.
    pub fn label_read<R: ReadAccessor + ?Sized>(&self, read: &R) -> Option<LabeledResult> {
        self.classifier.classify(self.score_read(read))
    }

    /// Label reads on the current Rayon pool, dropping reads without a call.
    pub fn label_reads<R: ReadAccessor + Sync>(&self, reads: &[R]) -> Vec<LabeledResult> {
        let labeled: Vec<LabeledResult> = reads.par_iter().filter_map(|r| self.label_read(r)).collect();
        info!("labeled {} of {} reads", labeled.len(), reads.len());
        labeled
    }

    /// As [`Self::label_reads`] on a local pool of `threads` workers.
    pub fn label_reads_with_threads<R: ReadAccessor + Sync>(&self, reads: &[R], threads: Option<usize>) -> Result<Vec<LabeledResult>> {
        let n = threads.filter(|&t| t > 0).unwrap_or_else(num_cpus::get).max(1);
        let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
        debug!("labeling {} reads on {} threads", reads.len(), n);
        Ok(pool.install(|| self.label_reads(reads)))
    }
}
