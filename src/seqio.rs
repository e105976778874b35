//! Input loading for the command-line driver.
//!
//! ### Design
//! - **Barcode sets** (FASTA / FASTQ, optionally gzipped) parsed with `needletail`;
//!   the record name is the header up to the first whitespace.
//! - **ZMW tables** (tab-separated) parsed with `csv` into [`MemoryRead`]s.
//!
//! ### ZMW table columns
//! `hole_number, sequence, adapters, hq_start, hq_end, hq_start_time, hq_end_time`
//!
//! `adapters` holds `start-end` pairs joined by `;` and may be empty.
//!
//! ### Errors
//! Parsing/IO errors are bubbled via `anyhow::Result` to the caller.
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use needletail::parse_fastx_file;

use crate::barcode::Barcode;
use crate::read::MemoryRead;

/// Load an ordered barcode set.
pub fn load_barcodes<P: AsRef<Path>>(path: P) -> Result<Vec<Barcode>> {
    let p = path.as_ref();
    let mut reader = parse_fastx_file(p).with_context(|| format!("opening barcode file {}", p.display()))?;
    let mut barcodes = Vec::new();
    while let Some(record) = reader.next() {
        let rec = record?;
        let header = String::from_utf8_lossy(rec.id()).to_string();
        let name = header.split_whitespace().next().unwrap_or_default().to_string();
        let seq = rec.seq();
        barcodes.push(Barcode::new(name, String::from_utf8_lossy(&seq)));
    }
    if barcodes.is_empty() {
        bail!("no barcodes found in {}", p.display());
    }
    Ok(barcodes)
}

/// Parse `"s-e;s-e"` adapter coordinates.
pub fn parse_adapters(field: &str) -> Result<Vec<(usize, usize)>> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|span| -> Result<(usize, usize)> {
            let (s, e) = span.split_once('-').with_context(|| format!("adapter span '{span}' is not start-end"))?;
            let (s, e): (usize, usize) = (s.trim().parse()?, e.trim().parse()?);
            if e < s {
                bail!("adapter span '{span}' ends before it starts");
            }
            Ok((s, e))
        })
        .collect()
}

/// Load reads from a tab-separated ZMW table with a header row.
pub fn read_zmw_table<P: AsRef<Path>>(path: P) -> Result<Vec<MemoryRead>> {
    let p = path.as_ref();
    let file = std::fs::File::open(p).with_context(|| format!("opening ZMW table {}", p.display()))?;
    read_zmw_table_from(file)
}

/// As [`read_zmw_table`] over any reader.
pub fn read_zmw_table_from<R: Read>(rdr: R) -> Result<Vec<MemoryRead>> {
    let mut reader = csv::ReaderBuilder::new().delimiter(b'\t').has_headers(true).from_reader(rdr);
    let mut reads = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() < 7 {
            bail!("ZMW table row {} has {} columns, expected 7", i + 1, row.len());
        }
        let hole_number: u64 = row[0].trim().parse().with_context(|| format!("row {}: bad hole_number", i + 1))?;
        let adapters = parse_adapters(&row[2]).with_context(|| format!("row {}: bad adapters", i + 1))?;
        let hq_start: usize = row[3].trim().parse()?;
        let hq_end: usize = row[4].trim().parse()?;
        let start_time: f64 = row[5].trim().parse()?;
        let end_time: f64 = row[6].trim().parse()?;
        reads.push(
            MemoryRead::new(hole_number, row[1].trim().to_ascii_uppercase(), adapters)
                .with_hq_region(hq_start, hq_end)
                .with_hq_times(start_time, end_time),
        );
    }
    Ok(reads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::{ReadAccessor, HQ_START_TIME};
    use std::io::Write;

    #[test]
    fn barcodes_load_in_file_order() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, ">bc1 first barcode\nacgtacgt\n>bc2\nTTTTGGGG").unwrap();
        let bcs = load_barcodes(f.path()).unwrap();
        assert_eq!(bcs, vec![Barcode::new("bc1", "ACGTACGT"), Barcode::new("bc2", "TTTTGGGG")]);
    }

    #[test]
    fn adapters_field_parses() {
        assert_eq!(parse_adapters("10-52; 300-342").unwrap(), vec![(10, 52), (300, 342)]);
        assert!(parse_adapters("").unwrap().is_empty());
        assert!(parse_adapters("10").is_err());
        assert!(parse_adapters("50-10").is_err());
    }

    #[test]
    fn zmw_table_rows_become_reads() {
        let table = "hole_number\tsequence\tadapters\thq_start\thq_end\thq_start_time\thq_end_time\n\
                     17\tacgtacgtac\t2-4;6-8\t0\t9\t0.5\t120\n\
                     18\tACGT\t\t0\t4\t0\t0\n";
        let reads = read_zmw_table_from(table.as_bytes()).unwrap();
        assert_eq!(reads.len(), 2);
        assert_eq!(reads[0].hole_number(), 17);
        assert_eq!(reads[0].read(0, 4).unwrap(), b"ACGT".to_vec());
        assert_eq!(reads[0].adapter_regions(), vec![(2, 4), (6, 8)]);
        assert_eq!(reads[0].hq_region(), (0, 9));
        assert_eq!(reads[0].metric(HQ_START_TIME), Some(0.5));
        assert!(reads[1].adapter_regions().is_empty());
    }

    #[test]
    fn short_rows_are_rejected() {
        let table = "hole_number\tsequence\n1\tACGT\n";
        assert!(read_zmw_table_from(table.as_bytes()).is_err());
    }
}
