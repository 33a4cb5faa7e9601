//! External decompression of gzip inputs.
//!
//! Decompression is delegated to a `pigz` child process so inflation runs
//! on its own cores while this process parses; the child's stdout is the
//! byte stream the parser consumes.

use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result, bail};

/// Spawns `pigz -d -c` over the given file with its stdout piped.
pub(crate) fn spawn(path: &Path) -> Result<Child> {
    Command::new("pigz")
        .arg("-d")
        .arg("-c")
        .arg(path)
        .stdout(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning pigz for {}", path.display()))
}

/// Waits for the child and fails on a nonzero exit.
///
/// Call this after the stdout pipe has been drained or dropped, otherwise
/// the child may never finish writing.
pub(crate) fn finish(mut child: Child) -> Result<()> {
    let status = child.wait().context("waiting for pigz")?;
    if !status.success() {
        bail!("pigz exited with {status}");
    }

    Ok(())
}
