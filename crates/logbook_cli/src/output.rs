//! Terminal rendering and notification delivery.

use logbook_core::PageItem;
use logbook_protocol::Entry;
use logbook_sync_engine::{Notification, Notifier, RenderedView};
use std::io::{self, Write};

/// Prints notifications on stderr, keeping stdout for data.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{notification}");
    }
}

const COLUMNS: [(&str, usize); 6] = [
    ("No", 5),
    ("Date", 11),
    ("Module/Feature", 18),
    ("Activity", 32),
    ("Status", 12),
    ("PIC", 12),
];

/// Writes one page with its header and navigation footer.
pub fn write_page(out: &mut dyn Write, view: &RenderedView) -> io::Result<()> {
    if view.entries.is_empty() {
        return writeln!(out, "No entries found.");
    }

    write_table(out, &view.entries)?;
    writeln!(out)?;
    writeln!(
        out,
        "Page {} of {} ({} entries)",
        view.current_page, view.total_pages, view.total_items
    )?;
    writeln!(out, "{}", format_window(&view.window, view.current_page))
}

/// Writes entries as a fixed-width table.
pub fn write_table(out: &mut dyn Write, entries: &[Entry]) -> io::Result<()> {
    let header: Vec<String> = COLUMNS
        .iter()
        .map(|&(label, width)| format!("{label:<width$}"))
        .collect();
    writeln!(out, "{}", header.join(" ").trim_end())?;

    for entry in entries {
        let cells = [
            entry.no.to_string(),
            entry.display_date(),
            entry.module_or_feature.clone(),
            entry.activity.clone(),
            entry.status.clone(),
            entry.person_in_charge.clone(),
        ];
        let row: Vec<String> = cells
            .iter()
            .zip(COLUMNS.iter())
            .map(|(cell, &(_, width))| format!("{:<width$}", truncate(cell, width)))
            .collect();
        writeln!(out, "{}", row.join(" ").trim_end())?;
    }
    Ok(())
}

/// Writes every field of one entry.
pub fn write_detail(out: &mut dyn Write, entry: &Entry) -> io::Result<()> {
    let optional = |text: &str| if text.is_empty() { "-".to_string() } else { text.to_string() };

    writeln!(out, "No:               {}", entry.no)?;
    writeln!(out, "Date:             {}", entry.display_date())?;
    writeln!(out, "Module/Feature:   {}", entry.module_or_feature)?;
    writeln!(out, "Activity:         {}", entry.activity)?;
    writeln!(out, "Technical Detail: {}", optional(&entry.technical_detail))?;
    writeln!(out, "Obstacle:         {}", optional(&entry.obstacle))?;
    writeln!(out, "Resolution:       {}", optional(&entry.resolution))?;
    writeln!(out, "Status:           {}", entry.status)?;
    writeln!(out, "PIC:              {}", entry.person_in_charge)
}

/// Renders the page window, bracketing the current page.
pub fn format_window(window: &[PageItem], current_page: usize) -> String {
    window
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current_page => format!("[{page}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shortens `text` to at most `width` characters, collapsing newlines.
fn truncate(text: &str, width: usize) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut short: String = flat.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
