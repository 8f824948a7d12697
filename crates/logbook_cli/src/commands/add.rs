//! Add command - create an entry.

use super::{apply_fields, CliSession};
use crate::EntryArgs;
use logbook_protocol::{today, EntryDraft};

/// Status given to new entries when none is chosen.
const DEFAULT_STATUS: &str = "Open";

/// Runs the add command.
///
/// Unset fields start empty and the date defaults to today; the store
/// rejects the draft if a required field is still missing.
pub fn run(session: &CliSession, fields: &EntryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut draft = EntryDraft::new(today(), "", "", DEFAULT_STATUS, "");
    apply_fields(&mut draft, fields);

    session.create(draft)?;
    Ok(())
}
