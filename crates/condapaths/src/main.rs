//! Batch tool that pulls conda and singularity paths out of compressed
//! stats listings, one path-list file per category.

mod classify;
mod decompress;

use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

const LONG_ABOUT: &str = "\
Parses compressed stats listings quickly, in low memory.

Each input must be a gzip-compressed listing named <prefix>.stats.gz.
Three files with one path per line are written to the working directory:
  <prefix>.condarc      paths whose basename is \".condarc\"
  <prefix>.conda-meta   paths named \"history\" in a \"conda-meta\" directory
  <prefix>.singularity  paths ending in \".sif\", \".simg\", or \".img\"";

#[derive(Parser)]
#[command(version, about = "Extracts conda and singularity paths from stats listings", long_about = LONG_ABOUT)]
struct Args {
    /// Compressed stats listings to process.
    #[arg(required = true, value_name = "STATS_FILE")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    for file in &args.files {
        if let Err(err) = process(file) {
            eprintln!("ERROR: {err:#}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// Streams one input through the parser and into its three output files.
///
/// Inputs already processed keep their outputs; a failure here stops the
/// run before any later input is touched.
fn process(file: &Path) -> Result<()> {
    let prefix = classify::output_prefix(file)?;

    let mut child = decompress::spawn(file)?;
    let stdout = child
        .stdout
        .take()
        .context("decompressor has no captured stdout")?;

    let classified = classify::run(BufReader::new(stdout), &prefix);
    let finished = decompress::finish(child);

    classified?;
    finished
}
