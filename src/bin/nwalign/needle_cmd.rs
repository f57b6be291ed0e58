use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use nwalign::*;

use crate::args::{read_fasta, ScoringArgs};

/// Options for the `needle` subcommand.
#[derive(Debug, Args)]
pub struct NeedleCmd {
    /// FASTA input: one file holding two records, or two files holding one each.
    #[arg(short='i', long="input", value_name="FILE", num_args=1..=2, required=true)]
    pub inputs: Vec<PathBuf>,
    #[command(flatten)]
    pub scoring: ScoringArgs,
    /// Wrap the alignment at this many columns (0 = no wrapping).
    #[arg(long, default_value_t=DEFAULT_WIDTH)]
    pub width: usize,
    /// Output file (default: stdout).
    #[arg(short='o', long, value_name="FILE")]
    pub outfile: Option<PathBuf>,
}

pub fn run(cmd: NeedleCmd) -> Result<()> {
    let mut records = Vec::with_capacity(2);
    for path in &cmd.inputs {
        records.extend(read_fasta(path)?);
    }
    let [a, b] = <[FastaRecord; 2]>::try_from(records)
        .map_err(|recs| anyhow::anyhow!("expected exactly two sequences, found {}", recs.len()))?;

    let model = cmd.scoring.model([a.seq.as_str(), b.seq.as_str()])?;
    let aln = needle(&a.seq, &b.seq, &model, cmd.scoring.gap)
        .with_context(|| format!("align {} against {}", a.id, b.id))?;

    let labels = ("seq1", "seq2");
    match &cmd.outfile {
        Some(path) => {
            let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut w = BufWriter::new(f);
            write_alignment(&mut w, &aln, labels, cmd.width)?;
            w.flush()?;
        }
        None => write_alignment(&mut io::stdout().lock(), &aln, labels, cmd.width)?,
    }
    Ok(())
}
