//! Labeler options.
//!
//! | option | effect |
//! |---|---|
//! | `adapter_side_pad` | bases between the adapter boundary and the flank window |
//! | `insert_side_pad` | extra margin beyond the barcode length on the insert side |
//! | `score_mode` | [`ScoreMode::Symmetric`] or [`ScoreMode::Paired`] |
//! | `max_hits` | cap on adapters scored per read |
//! | `score_first` | score the read's 5' tip when no adapter was found |
//! | `start_time_cutoff` | latest HQ-region start time eligible for `score_first` |
//! | `use_old_workflow` | legacy flank orientation and scoring |
use core::fmt;
use core::str::FromStr;

use crate::align::AlignParams;
use crate::error::LabelError;

/// How barcodes are combined and ranked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScoreMode {
    /// Same barcode on both ends of the insert.
    #[default]
    Symmetric,
    /// Adjacent panel entries (2k, 2k+1) are the two ends of one construct.
    Paired,
}

impl ScoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Symmetric => "symmetric",
            ScoreMode::Paired => "paired",
        }
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ScoreMode {
    type Err = LabelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "symmetric" => Ok(Self::Symmetric),
            "paired" => Ok(Self::Paired),
            _ => Err(LabelError::UnknownScoreMode(s.to_string())),
        }
    }
}

/// Everything the labeler needs besides the barcode set.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelerConfig {
    pub adapter_side_pad: usize,
    pub insert_side_pad: usize,
    pub score_mode: ScoreMode,
    pub max_hits: usize,
    pub score_first: bool,
    pub start_time_cutoff: f64,
    pub use_old_workflow: bool,
    pub align: AlignParams,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            adapter_side_pad: 0,
            insert_side_pad: 4,
            score_mode: ScoreMode::Symmetric,
            max_hits: 10,
            score_first: false,
            start_time_cutoff: 1.0,
            use_old_workflow: false,
            align: AlignParams::default(),
        }
    }
}
