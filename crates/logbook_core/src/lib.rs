//! # Logbook Core
//!
//! View-state engines for the logbook client.
//!
//! This crate provides:
//! - `ViewState`, the explicit search/filter/page state
//! - Filter & search over the authoritative collection
//! - Stable date-descending sort
//! - Pagination with an ellipsis-compressed page window
//! - CSV export of the filtered view
//! - `ViewPipeline`, which runs all of the above in order
//!
//! ## Data flow
//!
//! ```text
//! collection ─▶ filter ─▶ sort ─▶ paginate ─▶ display
//!                  └────────────▶ export
//! ```
//!
//! Every engine is a pure function of its inputs. Nothing here performs I/O
//! or holds on to the collection between calls.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod export;
mod filter;
mod pagination;
mod pipeline;
mod sort;
mod view_state;

pub use config::{ViewConfig, WINDOW_SIZE};
pub use error::{CoreError, CoreResult};
pub use export::{export_csv, export_filename, ExportArtifact, EXPORT_COLUMNS};
pub use filter::{filter_entries, matches_search, matches_status, status_options};
pub use pagination::{page_bounds, page_window, total_pages, PageItem};
pub use pipeline::{DerivedView, ViewPipeline};
pub use sort::sort_by_date_desc;
pub use view_state::{StatusFilter, ViewState};
