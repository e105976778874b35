//! Tab-separated output of barcode calls.
//!
//! One row per labeled read:
//! `hole_number, n_adapters, best_index, best_label, best_score,
//! second_index, second_label, second_score, adapter_scores`.
//!
//! `adapter_scores` is the raw per-adapter matrix, adapters separated by `;`
//! and barcodes by `,`.
use std::io::Write;

use anyhow::Result;

use crate::classify::LabeledResult;
use crate::labeler::BarcodeLabeler;

pub const HEADER: [&str; 9] = [
    "hole_number",
    "n_adapters",
    "best_index",
    "best_label",
    "best_score",
    "second_index",
    "second_label",
    "second_score",
    "adapter_scores",
];

/// Format the per-adapter score matrix as `a,b;c,d`.
pub fn format_score_matrix(matrix: &[Vec<f64>]) -> String {
    matrix
        .iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join(";")
}

/// Write `results` with label names resolved through `labeler`.
pub fn write_labels<W: Write>(writer: W, results: &[LabeledResult], labeler: &BarcodeLabeler) -> Result<()> {
    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    w.write_record(HEADER)?;
    for r in results {
        w.write_record([
            r.hole_number.to_string(),
            r.adapter_count.to_string(),
            r.best_index.to_string(),
            labeler.label_name(r.best_index).unwrap_or_default().to_string(),
            r.best_score.to_string(),
            r.second_best_index.to_string(),
            labeler.label_name(r.second_best_index).unwrap_or_default().to_string(),
            r.second_best_score.to_string(),
            format_score_matrix(&r.adapter_scores),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::Barcode;
    use crate::config::LabelerConfig;

    #[test]
    fn matrix_formatting() {
        assert_eq!(format_score_matrix(&[vec![1.0, 2.5], vec![0.0, 16.0]]), "1,2.5;0,16");
        assert_eq!(format_score_matrix(&[]), "");
    }

    #[test]
    fn rows_carry_resolved_labels() {
        let labeler = BarcodeLabeler::new(
            vec![Barcode::new("bcA", "AAAACCCC"), Barcode::new("bcB", "GGGGTTTT")],
            LabelerConfig::default(),
        )
        .unwrap();
        let results = vec![LabeledResult {
            hole_number: 11,
            adapter_count: 2,
            best_index: 1,
            best_score: 30.0,
            second_best_index: 0,
            second_best_score: 4.5,
            adapter_scores: vec![vec![2.0, 14.0], vec![2.5, 16.0]],
        }];
        let mut out = Vec::new();
        write_labels(&mut out, &results, &labeler).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER.join("\t"));
        assert_eq!(lines[1], "11\t2\t1\tbcB--bcB\t30\t0\tbcA--bcA\t4.5\t2,14;2.5,16");
    }
}
