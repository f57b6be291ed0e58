//! CLI subcommand implementation. Use via `nwalign needleall`.
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use nwalign::*;

use crate::args::{read_fasta, ScoringArgs};

/// Options for the `needleall` subcommand.
#[derive(Debug, Args)]
pub struct NeedleAllCmd {
    /// Multi-FASTA file of left/query sequences.
    #[arg(long, value_name="FILE")]
    pub aseqs: PathBuf,
    /// Multi-FASTA file of right/subject sequences.
    #[arg(long, value_name="FILE")]
    pub bseqs: PathBuf,
    #[command(flatten)]
    pub scoring: ScoringArgs,
    /// Summary TSV file (default: stdout).
    #[arg(long, value_name="FILE")]
    pub summary: Option<PathBuf>,
    /// Optional directory to write per-pair alignments (one file per pair).
    #[arg(long)]
    pub outdir: Option<PathBuf>,
    /// Wrap per-pair alignments at this many columns (0 = no wrapping).
    #[arg(long, default_value_t=DEFAULT_WIDTH)]
    pub width: usize,
}

pub fn run(cmd: NeedleAllCmd) -> Result<()> {
    let left = read_fasta(&cmd.aseqs)?;
    let right = read_fasta(&cmd.bseqs)?;

    let model = cmd.scoring.model(left.iter().chain(&right).map(|r| r.seq.as_str()))?;
    let results = needleall_pairs(&left, &right, &model, cmd.scoring.gap)?;

    match &cmd.summary {
        Some(path) => {
            let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_pair_summary(BufWriter::new(f), &results)?;
        }
        None => write_pair_summary(io::stdout().lock(), &results)?,
    }

    if let Some(dir) = &cmd.outdir {
        std::fs::create_dir_all(dir).with_context(|| format!("mkdir {}", dir.display()))?;
        let mut used = HashSet::new();
        for r in &results {
            let stem = format!("{}_vs_{}", sanitize(&r.a_id), sanitize(&r.b_id));
            let path = dir.join(unique_file_name(&mut used, &stem));
            let f = File::create(&path).with_context(|| format!("create {}", path.display()))?;
            let mut w = BufWriter::new(f);
            write_alignment(&mut w, &r.alignment, (r.a_id.as_str(), r.b_id.as_str()), cmd.width)?;
            w.flush()?;
        }
    }
    Ok(())
}

/// `<stem>.txt`, or `<stem>_2.txt`, `<stem>_3.txt`, ... when ids sanitize to an
/// already used name.
fn unique_file_name(used: &mut HashSet<String>, stem: &str) -> String {
    let mut name = format!("{stem}.txt");
    let mut n = 1;
    while !used.insert(name.clone()) {
        n += 1;
        name = format!("{stem}_{n}.txt");
    }
    name
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') { ch } else { '_' })
        .collect()
}
