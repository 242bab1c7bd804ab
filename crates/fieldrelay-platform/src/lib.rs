//! Focus router service
//!
//! Wires the host's accessibility events to the floating surface. The host
//! builds an `Environment` from its capabilities, creates a `FocusRouter`,
//! and then forwards:
//!
//! - every UI event to `handle_event`,
//! - surface edits and submits to `surface_edit` / `surface_text_changed` /
//!   `surface_submit`,
//! - its loop wakeups to `tick` (see `next_deadline`).
//!
//! Everything runs on the thread that delivers events; nothing here is
//! `Send`.

pub mod config;
pub mod logging;
pub mod router;

pub use config::RouterConfig;
pub use router::{Environment, FocusRouter};
