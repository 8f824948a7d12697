//! Delete command - remove an entry.

use super::{fetch_entry, CliSession};
use logbook_protocol::EntryNo;
use std::io::Write;

/// Runs the delete command.
///
/// Without `confirmed` nothing is removed; the entry is described instead.
pub fn run(
    session: &CliSession,
    no: EntryNo,
    confirmed: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if !confirmed {
        let entry = fetch_entry(session, no)?;
        writeln!(
            out,
            "Entry {} ({}, {}) will be deleted. Run again with --yes to confirm.",
            entry.no,
            entry.activity,
            entry.display_date()
        )?;
        return Ok(());
    }

    session.delete(no)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::add;
    use super::*;

    #[test]
    fn asks_before_deleting() {
        let (session, _dir) = session();
        add::run(&session, &fields("Fix login", "Open")).unwrap();

        let mut out = Vec::new();
        run(&session, EntryNo::new(1), false, &mut out).unwrap();

        assert!(text(out).contains("Entry 1 (Fix login, 05 Mar 2024) will be deleted"));
        assert_eq!(session.manager().entries().len(), 1);
    }

    #[test]
    fn deletes_when_confirmed() {
        let (session, _dir) = session();
        add::run(&session, &fields("Fix login", "Open")).unwrap();
        add::run(&session, &fields("Add MFA", "Open")).unwrap();

        run(&session, EntryNo::new(1), true, &mut Vec::new()).unwrap();

        let entries = session.manager().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].activity, "Add MFA");
    }

    #[test]
    fn deleting_unknown_entry_fails() {
        let (session, _dir) = session();
        let err = run(&session, EntryNo::new(3), true, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Entry 3 not found"));
    }
}
