//! List command - show one page of entries.

use super::{apply_filter, CliSession};
use crate::output;
use crate::FilterArgs;
use std::io::Write;

/// Runs the list command.
pub fn run(
    session: &CliSession,
    filter: &FilterArgs,
    page: usize,
    format: &str,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if !matches!(format, "text" | "json") {
        return Err(format!("unknown format: {format}").into());
    }

    apply_filter(session, filter);
    session.refresh()?;

    if page != 1 && !session.go_to(page) {
        tracing::warn!(page, "no such page, showing page 1");
    }
    let view = session.render();

    if format == "json" {
        serde_json::to_writer_pretty(&mut *out, &view.entries)?;
        writeln!(out)?;
    } else {
        output::write_page(out, &view)?;
    }
    Ok(())
}
