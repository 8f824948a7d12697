//! Statuses command - list status values.

use super::CliSession;
use logbook_protocol::KNOWN_STATUSES;
use std::io::Write;

/// Runs the statuses command.
///
/// Prints the distinct statuses found in the logbook, or the standard set
/// when `known` is given.
pub fn run(
    session: &CliSession,
    known: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let statuses: Vec<String> = if known {
        KNOWN_STATUSES.iter().map(|s| s.to_string()).collect()
    } else {
        session.refresh()?;
        session.status_options()
    };

    for status in statuses {
        writeln!(out, "{status}")?;
    }
    Ok(())
}
