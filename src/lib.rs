#![forbid(unsafe_code)]
//! # flankcall
//!
//! Barcode calling for long-read sequencing traces. Around every detected
//! adapter the flanking sequence is cut out, locally aligned against a panel
//! of known barcodes, and the per-adapter evidence is summed into one score
//! vector per read, which is then ranked into a best / second-best call.
//!
//! ## Pipeline
//! read → [`flank::FlankExtractor`] → [`flank::FlankPair`]s →
//! [`score::AdapterScoringEngine`] (using [`align::SequenceAligner`]) →
//! [`score::ScoreBundle`] → [`classify::ZmwClassifier`] →
//! [`classify::LabeledResult`].
//!
//! [`BarcodeLabeler`] wires these together from a barcode set and a
//! [`LabelerConfig`].
//!
//! ## Scope
//! - Adapter positions come from an external detector through [`ReadAccessor`].
//! - Scores are raw; no confidence thresholds are applied.
//! - Local alignment only.
//!
//! ## Examples
//! ```rust
//! use flankcall::{Barcode, BarcodeLabeler, LabelerConfig, MemoryRead, ScoreMode};
//! let barcodes = vec![
//!     Barcode::new("bc1", "GATTACAG"),
//!     Barcode::new("bc2", "CCTTGGCA"),
//!     Barcode::new("bc3", "AGCTAGGT"),
//!     Barcode::new("bc4", "TCGCATCC"),
//! ];
//! let config = LabelerConfig { score_mode: ScoreMode::Paired, ..Default::default() };
//! let labeler = BarcodeLabeler::new(barcodes, config).unwrap();
//! assert_eq!(labeler.labels(), ["bc1--bc2", "bc3--bc4"]);
//! // no adapters, no call
//! assert!(labeler.label_read(&MemoryRead::new(1, "ACGT", vec![])).is_none());
//! ```

pub mod error;
pub mod barcode;
pub mod align;
pub mod read;
pub mod flank;
pub mod config;
pub mod score;
pub mod classify;
pub mod labeler;
pub mod seqio;
pub mod report;

pub use barcode::{Barcode, BarcodePanel};
pub use classify::{LabeledResult, ZmwClassifier};
pub use config::{LabelerConfig, ScoreMode};
pub use error::LabelError;
pub use labeler::BarcodeLabeler;
pub use read::{MemoryRead, ReadAccessor};
pub use score::ScoreBundle;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
