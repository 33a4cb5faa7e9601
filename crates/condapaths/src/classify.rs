//! Suffix classification of parsed paths into per-category path lists.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use statmodem::StatsParser;

const STATS_FILE_SUFFIX: &str = ".stats.gz";

const CONDARC_SUFFIX: &[u8] = b".condarc";
const CONDA_META_SUFFIX: &[u8] = b"/conda-meta/history";
const SINGULARITY_SUFFIXES: [&[u8]; 3] = [b".sif", b".simg", b".img"];

const CONDARC_OUTPUT_SUFFIX: &str = ".condarc";
const CONDA_META_OUTPUT_SUFFIX: &str = ".conda-meta";
const SINGULARITY_OUTPUT_SUFFIX: &str = ".singularity";

/// Derives the output prefix from an input path.
///
/// The input file name must end with `.stats.gz`; the prefix is the part of
/// the basename before its first dot, so outputs land in the working
/// directory regardless of where the input lives.
pub(crate) fn output_prefix(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    if !name.ends_with(STATS_FILE_SUFFIX) {
        bail!("path must end with {STATS_FILE_SUFFIX}");
    }

    let stem = name.split('.').next().unwrap_or(name);

    Ok(stem.to_string())
}

/// Scans an uncompressed listing and routes every regular-file path whose
/// suffix matches a category into that category's output file.
///
/// All three output files are created up front, so a listing with no match
/// in some category still leaves an empty file for it.
pub(crate) fn run(input: impl BufRead, prefix: &str) -> Result<()> {
    let mut outputs = Outputs::create(prefix)?;
    let mut parser = StatsParser::new(input);

    while parser.advance() {
        let Some(record) = parser.record() else {
            continue;
        };

        if !record.is_file() {
            continue;
        }

        outputs.route(record.path())?;
    }

    if let Some(err) = parser.error() {
        return Err(anyhow!("{err}"));
    }

    outputs.flush()
}

struct Outputs {
    condarc: BufWriter<File>,
    conda_meta: BufWriter<File>,
    singularity: BufWriter<File>,
}

impl Outputs {
    fn create(prefix: &str) -> Result<Self> {
        Ok(Self {
            condarc: create_output(prefix, CONDARC_OUTPUT_SUFFIX)?,
            conda_meta: create_output(prefix, CONDA_META_OUTPUT_SUFFIX)?,
            singularity: create_output(prefix, SINGULARITY_OUTPUT_SUFFIX)?,
        })
    }

    fn route(&mut self, path: &[u8]) -> Result<()> {
        if path.ends_with(CONDARC_SUFFIX) {
            write_path(&mut self.condarc, path)?;
        } else if path.ends_with(CONDA_META_SUFFIX) {
            write_path(&mut self.conda_meta, path)?;
        } else if SINGULARITY_SUFFIXES
            .iter()
            .any(|suffix| path.ends_with(suffix))
        {
            write_path(&mut self.singularity, path)?;
        }

        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.condarc.flush()?;
        self.conda_meta.flush()?;
        self.singularity.flush()?;

        Ok(())
    }
}

fn create_output(prefix: &str, suffix: &str) -> Result<BufWriter<File>> {
    let name = format!("{prefix}{suffix}");
    let file = File::create(&name).with_context(|| format!("creating {name}"))?;

    Ok(BufWriter::new(file))
}

fn write_path(out: &mut impl Write, path: &[u8]) -> io::Result<()> {
    out.write_all(path)?;
    out.write_all(b"\n")
}
