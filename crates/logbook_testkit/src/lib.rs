//! # Logbook Testkit
//!
//! Test utilities for the logbook client.
//!
//! This crate provides:
//! - Entry fixtures and raw wire payloads
//! - Property-based test generators using proptest
//! - A loopback harness wiring a session to an in-process store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use logbook_testkit::prelude::*;
//!
//! #[test]
//! fn refresh_through_the_store() {
//!     let harness = LoopbackHarness::seeded(12);
//!     harness.session.refresh().unwrap();
//!     assert_eq!(harness.session.render().total_items, 12);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod harness;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::harness::*;
}

pub use fixtures::*;
pub use generators::*;
pub use harness::*;
