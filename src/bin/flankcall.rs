use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use flankcall::{seqio, report, BarcodeLabeler, LabelerConfig, ScoreMode};

/// flankcall CLI
#[derive(Parser)]
#[command(name = "flankcall")]
#[command(version)]
#[command(about = "Barcode calling from adapter-flanking sequence by local alignment", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and label every read of a ZMW table
    Label {
        #[command(flatten)]
        panel: PanelArgs,
        /// ZMW table (TSV: hole_number, sequence, adapters, hq_start, hq_end, hq_start_time, hq_end_time)
        #[arg(long, value_name = "ZMWS.TSV")]
        zmws: PathBuf,
        /// Output TSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Bases between the adapter boundary and the flank window
        #[arg(long, default_value_t = 0)]
        adapter_side_pad: usize,
        /// Extra bases beyond the barcode length on the insert side
        #[arg(long, default_value_t = 4)]
        insert_side_pad: usize,
        /// Maximum adapters scored per read
        #[arg(long, default_value_t = 10)]
        max_hits: usize,
        /// Score the read's 5' tip when no adapter was found
        #[arg(long)]
        score_first: bool,
        /// Latest HQ-region start time eligible for --score-first
        #[arg(long, default_value_t = 1.0)]
        start_time_cutoff: f64,
        /// Legacy flank orientation and scoring
        #[arg(long)]
        use_old_workflow: bool,
        /// Threads (0/None = all)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// List the candidate labels of a barcode set
    Panel {
        #[command(flatten)]
        panel: PanelArgs,
    },
}

#[derive(Args)]
struct PanelArgs {
    /// Barcode FASTA/FASTQ (all barcodes must share one length)
    #[arg(long, value_name = "BARCODES.FA")]
    barcodes: PathBuf,
    /// symmetric or paired
    #[arg(long, default_value = "symmetric")]
    score_mode: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    match cli.command {
        Commands::Label {
            panel,
            zmws,
            output,
            adapter_side_pad,
            insert_side_pad,
            max_hits,
            score_first,
            start_time_cutoff,
            use_old_workflow,
            threads,
        } => {
            let config = LabelerConfig {
                adapter_side_pad,
                insert_side_pad,
                score_mode: panel.score_mode.parse::<ScoreMode>()?,
                max_hits,
                score_first,
                start_time_cutoff,
                use_old_workflow,
                ..Default::default()
            };
            let labeler = BarcodeLabeler::new(seqio::load_barcodes(&panel.barcodes)?, config)?;
            let reads = seqio::read_zmw_table(&zmws)?;
            log::info!("label: barcodes={} | zmws={} | mode={}", labeler.panel().len(), reads.len(), labeler.config().score_mode);

            let results = labeler.label_reads_with_threads(&reads, threads)?;
            match output {
                Some(path) => report::write_labels(BufWriter::new(File::create(path)?), &results, &labeler)?,
                None => report::write_labels(io::stdout().lock(), &results, &labeler)?,
            }
        }

        Commands::Panel { panel } => {
            let config = LabelerConfig { score_mode: panel.score_mode.parse::<ScoreMode>()?, ..Default::default() };
            let labeler = BarcodeLabeler::new(seqio::load_barcodes(&panel.barcodes)?, config)?;
            println!("flankcall {}", flankcall::VERSION);
            println!("barcodes: {}", labeler.panel().len());
            println!("barcode length: {}", labeler.panel().barcode_length());
            println!("mode: {}", labeler.config().score_mode);
            for (i, label) in labeler.labels().iter().enumerate() {
                println!("{i}\t{label}");
            }
        }
    }

    Ok(())
}
