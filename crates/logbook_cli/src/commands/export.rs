//! Export command - write the filtered entries to CSV.

use super::{apply_filter, CliSession};
use crate::FilterArgs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Runs the export command and returns the written file's path.
pub fn run(
    session: &CliSession,
    filter: &FilterArgs,
    out_dir: &Path,
    out: &mut dyn Write,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    apply_filter(session, filter);
    session.refresh()?;

    let artifact = session.export()?;

    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&artifact.filename);
    fs::write(&path, artifact.content.as_bytes())?;

    tracing::info!(path = %path.display(), rows = artifact.rows, "export written");
    writeln!(out, "Wrote {} entries to {}", artifact.rows, path.display())?;
    Ok(path)
}
