//! The read accessor consumed by the labeler.
//!
//! Trace/pulse file parsing lives outside this crate; any source that can hand
//! out coordinate-addressed bases, adapter regions, the HQ region and named
//! metrics can be labeled by implementing [`ReadAccessor`]. [`MemoryRead`] is
//! a plain in-memory implementation used by the table loader and in tests.

use std::collections::HashMap;

/// Metric holding the HQ-region start time.
pub const HQ_START_TIME: &str = "HQRegionStartTime";
/// Metric holding the HQ-region end time.
pub const HQ_END_TIME: &str = "HQRegionEndTime";

/// Requested window lies (partly) outside the available bases.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("window [{start}, {end}) outside read of length {len}")]
pub struct WindowError {
    pub start: i64,
    pub end: i64,
    pub len: usize,
}

/// Per-read data needed to score barcodes.
pub trait ReadAccessor {
    /// Hole / read identifier.
    fn hole_number(&self) -> u64;

    /// Bases in the half-open window `[start, end)`.
    ///
    /// Coordinates are signed because flank windows are computed by
    /// subtracting from adapter starts and may run off the read.
    fn read(&self, start: i64, end: i64) -> Result<Vec<u8>, WindowError>;

    /// Adapter `(start, end)` coordinates in read order.
    fn adapter_regions(&self) -> Vec<(usize, usize)>;

    /// High-quality region `(start, end)` in bases.
    fn hq_region(&self) -> (usize, usize);

    /// Named scalar metric, `None` if unknown.
    fn metric(&self, name: &str) -> Option<f64>;
}

/// Fully materialised read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryRead {
    pub hole_number: u64,
    pub sequence: Vec<u8>,
    pub adapters: Vec<(usize, usize)>,
    pub hq_region: (usize, usize),
    pub metrics: HashMap<String, f64>,
}

impl MemoryRead {
    /// A read whose HQ region spans the whole sequence, with no metrics.
    pub fn new(hole_number: u64, sequence: impl Into<Vec<u8>>, adapters: Vec<(usize, usize)>) -> Self {
        let sequence = sequence.into();
        let hq_region = (0, sequence.len());
        Self { hole_number, sequence, adapters, hq_region, metrics: HashMap::new() }
    }

    pub fn with_hq_region(mut self, start: usize, end: usize) -> Self {
        self.hq_region = (start, end);
        self
    }

    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    /// Set both HQ timing metrics.
    pub fn with_hq_times(self, start_time: f64, end_time: f64) -> Self {
        self.with_metric(HQ_START_TIME, start_time).with_metric(HQ_END_TIME, end_time)
    }
}

impl ReadAccessor for MemoryRead {
    fn hole_number(&self) -> u64 { self.hole_number }

    fn read(&self, start: i64, end: i64) -> Result<Vec<u8>, WindowError> {
        let len = self.sequence.len();
        if start < 0 || end < start || end as u64 > len as u64 {
            return Err(WindowError { start, end, len });
        }
        Ok(self.sequence[start as usize..end as usize].to_vec())
    }

    fn adapter_regions(&self) -> Vec<(usize, usize)> { self.adapters.clone() }

    fn hq_region(&self) -> (usize, usize) { self.hq_region }

    fn metric(&self, name: &str) -> Option<f64> { self.metrics.get(name).copied() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_inside_the_read_are_returned() {
        let r = MemoryRead::new(7, "ACGTACGT", vec![]);
        assert_eq!(r.read(2, 6).unwrap(), b"GTAC".to_vec());
        assert_eq!(r.read(0, 8).unwrap().len(), 8);
        assert_eq!(r.read(3, 3).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn windows_off_either_end_fail() {
        let r = MemoryRead::new(7, "ACGTACGT", vec![]);
        assert_eq!(r.read(-1, 4).unwrap_err(), WindowError { start: -1, end: 4, len: 8 });
        assert!(r.read(4, 9).is_err());
        assert!(r.read(5, 4).is_err());
    }

    #[test]
    fn metrics_and_hq_region() {
        let r = MemoryRead::new(1, "ACGT", vec![(1, 2)]).with_hq_region(0, 3).with_hq_times(0.0, 5.0);
        assert_eq!(r.hq_region(), (0, 3));
        assert_eq!(r.metric(HQ_START_TIME), Some(0.0));
        assert_eq!(r.metric(HQ_END_TIME), Some(5.0));
        assert_eq!(r.metric("ReadScore"), None);
        assert_eq!(r.adapter_regions(), vec![(1, 2)]);
    }
}
