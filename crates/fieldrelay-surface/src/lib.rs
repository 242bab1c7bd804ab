//! Floating input surface
//!
//! The surface is a small editor shown on the secondary display. It owns
//! nothing remote: it holds a handle to the mirrored field, echoes every
//! text change back to it, and replays "enter" on submit.
//!
//! - `OverlayManager` keeps at most one `OverlaySession` alive, picks the
//!   display, and runs the keyboard / auto-close timers.
//! - `TextSyncChannel` pushes text and replays submit actions.
//! - `SurfaceTextState` is the surface's text and caret.

pub mod overlay;
pub mod session;
pub mod sync;
pub mod textfield;

pub use overlay::{
    CloseReason, DEFAULT_AUTO_CLOSE_DELAY, DEFAULT_KEYBOARD_DELAY, OverlayManager, OverlayTimings,
    SurfaceTask, request_for, seed_text,
};
pub use session::{OverlaySession, RouterState};
pub use sync::{SubmitOutcome, SyncOutcome, SyncStats, TextSyncChannel};
pub use textfield::{SurfaceEdit, SurfaceTextState};
