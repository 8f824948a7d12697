//! Show command - print one entry in full.

use super::{fetch_entry, CliSession};
use crate::output;
use logbook_protocol::EntryNo;
use std::io::Write;

/// Runs the show command.
pub fn run(
    session: &CliSession,
    no: EntryNo,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let entry = fetch_entry(session, no)?;
    output::write_detail(out, &entry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::add;
    use super::super::testing::*;
    use super::*;

    #[test]
    fn shows_entry() {
        let (session, _dir) = session();
        let mut args = fields("Fix login", "Done");
        args.detail = Some("JWT expiry".into());
        add::run(&session, &args).unwrap();

        let mut out = Vec::new();
        run(&session, EntryNo::new(1), &mut out).unwrap();
        let text = text(out);

        assert!(text.contains("Activity:         Fix login"));
        assert!(text.contains("Technical Detail: JWT expiry"));
        assert!(text.contains("Date:             05 Mar 2024"));
    }
}
