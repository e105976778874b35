//! Errors raised while building a barcode panel or a labeler.
//!
//! Everything here is fatal at construction time; nothing is retained from a
//! failed build. Per-read conditions (out-of-range windows, missing flanks)
//! are absorbed locally and never surface as a [`LabelError`].

/// Construction-time failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The barcode set contained no sequences.
    #[error("barcode panel is empty")]
    EmptyPanel,
    /// Barcodes must carry at least one base.
    #[error("barcode {name} has no sequence")]
    EmptyBarcode { name: String },
    /// All barcodes in a panel must share one length.
    #[error("all barcodes must be the same length: expected {expected}, but {name} has length {found}")]
    NonUniformLength { expected: usize, name: String, found: usize },
    /// Barcode sequences are restricted to `A|C|G|T`.
    #[error("barcode {name} contains non-ACGT base '{base}'")]
    InvalidBase { name: String, base: char },
    /// `scoreMode` must be `symmetric` or `paired`.
    #[error("score mode must be either symmetric or paired, got '{0}'")]
    UnknownScoreMode(String),
    /// Ranking needs a best and a second-best candidate.
    #[error("{mode} scoring needs at least {required} barcodes, found {found}")]
    TooFewBarcodes { mode: &'static str, found: usize, required: usize },
    /// Paired scoring groups barcodes as adjacent mates (2k, 2k+1).
    #[error("paired scoring needs an even number of barcodes (adjacent mate pairs), found {0}")]
    UnpairedPanel(usize),
}
