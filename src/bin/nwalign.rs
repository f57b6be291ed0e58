//! Command-line interface for the `nwalign` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/nwalign/`:
//! - `needle_cmd.rs`
//! - `needleall_cmd.rs`
//!
//! Logging goes to stderr through `env_logger`; set `RUST_LOG=debug` for
//! per-alignment details.
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name="nwalign", version=env!("CARGO_PKG_VERSION"), about="Needleman–Wunsch global alignment (linear gap penalty)", disable_help_subcommand=true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Globally align two sequences (EMBOSS `needle`-like).
    Needle(needle_cmd::NeedleCmd),
    /// Globally align every pair of two FASTA sets (EMBOSS `needleall`-like).
    Needleall(needleall_cmd::NeedleAllCmd),
}

#[path = "nwalign/args.rs"] mod args;
#[path = "nwalign/needle_cmd.rs"] mod needle_cmd;
#[path = "nwalign/needleall_cmd.rs"] mod needleall_cmd;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Needle(cmd) => needle_cmd::run(cmd),
        Command::Needleall(cmd) => needleall_cmd::run(cmd),
    }
}
