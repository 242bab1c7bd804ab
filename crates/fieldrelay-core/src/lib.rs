//! # Elements, Events, and Filters
//!
//! Fieldrelay mirrors a text field that lives in some other application onto
//! a floating input surface on a secondary display. This crate holds the
//! vocabulary every other crate speaks:
//!
//! - `ElementHandle` / `Node`: opaque, possibly stale handle into the host's
//!   live UI tree.
//! - `UiEvent`: focus, window, and content notifications pushed by the host.
//! - `Display` / `DisplayProvider`: the enumerated screens.
//! - the leaf decisions: is this a text field, is it ours, did it happen on
//!   the primary display, what does "enter" mean for it.
//!
//! ## Handles
//!
//! A `Node` is an `Rc<dyn ElementHandle>`. Reads go through `attributes()`,
//! which returns `None` once the element is gone; every decision in this
//! crate treats that as "not a field" rather than an error. The
//! classification itself is a plain check over the attribute bag:
//!
//! ```rust
//! use fieldrelay_core::*;
//!
//! let attrs = NodeAttributes {
//!     class_name: Some("androidx.appcompat.widget.AppCompatEditText".into()),
//!     ..Default::default()
//! };
//! assert!(attributes_describe_text_field(&attrs));
//! ```
//!
//! ## Action inference
//!
//! The submit action of a field is guessed from its hint, text, and content
//! description against a bilingual keyword table:
//!
//! ```rust
//! use fieldrelay_core::*;
//!
//! assert_eq!(infer_action(Some("搜索"), None, None), ImeAction::Search);
//! assert_eq!(infer_action(Some("Say something"), None, None), ImeAction::Done);
//! ```
//!
//! ## Timers
//!
//! Nothing here spawns threads. Deferred work (showing the soft keyboard,
//! closing the surface after a submit) is queued in a `TimerQueue` against a
//! `Clock` and fired by whoever drives the event loop.

pub mod action;
pub mod clock;
pub mod display;
pub mod error;
pub mod event;
pub mod host;
pub mod node;
pub mod ownership;
pub mod prelude;
pub mod semantics;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod timer;

pub use action::*;
pub use clock::*;
pub use display::*;
pub use error::*;
pub use event::*;
pub use host::*;
pub use node::*;
pub use ownership::*;
pub use semantics::*;
pub use timer::*;
