//! Edit command - change fields of an entry.

use super::{apply_fields, fetch_entry, CliSession};
use crate::EntryArgs;
use logbook_protocol::EntryNo;

/// Runs the edit command.
pub fn run(
    session: &CliSession,
    no: EntryNo,
    fields: &EntryArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut draft = fetch_entry(session, no)?.to_draft();
    apply_fields(&mut draft, fields);

    session.update(no, draft)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::super::add;
    use super::*;

    #[test]
    fn edits_given_fields_only() {
        let (session, _dir) = session();
        add::run(&session, &fields("Fix login", "Open")).unwrap();

        let change = EntryArgs {
            status: Some("Done".into()),
            resolution: Some("patched redirect".into()),
            ..EntryArgs::default()
        };
        run(&session, EntryNo::new(1), &change).unwrap();

        let entry = session.find(EntryNo::new(1)).unwrap();
        assert_eq!(entry.status, "Done");
        assert_eq!(entry.resolution, "patched redirect");
        assert_eq!(entry.activity, "Fix login");
    }

    #[test]
    fn unknown_entry_fails() {
        let (session, _dir) = session();
        let err = run(&session, EntryNo::new(9), &EntryArgs::default()).unwrap_err();
        assert_eq!(err.to_string(), "entry 9 not found");
    }
}
