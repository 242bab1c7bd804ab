use fieldrelay_core::{ActionId, ElementHandle, ImeAction, Node, NodeAction, RelayError, RelayResult};

use crate::overlay::OverlayManager;
use crate::textfield::SurfaceEdit;

/// Result of pushing the surface's text to the remote field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Pushed,
    /// The field refused the new text.
    Refused,
    /// The edit did not change the text; nothing was sent.
    Unchanged,
    /// No surface is open.
    NoSession,
    Dropped(RelayError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Replayed { action: ImeAction, closing: bool },
    /// The field exposes IME enter but reported failure.
    Refused,
    Failed(RelayError),
    NoSession,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub pushed: u64,
    pub dropped: u64,
    pub submits: u64,
}

/// Surface → remote text echo and submit replay.
///
/// Both flows are fire-and-forget: a failure is logged, counted, and
/// reported to the caller, never retried.
#[derive(Default)]
pub struct TextSyncChannel {
    stats: SyncStats,
}

impl TextSyncChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// Applies one edit to the open surface and echoes the full text.
    pub fn on_edit(&mut self, overlay: &mut OverlayManager, edit: SurfaceEdit) -> SyncOutcome {
        let Some(session) = overlay.session_mut() else {
            return SyncOutcome::NoSession;
        };
        match session.edit(edit) {
            Some(text) => {
                let target = session.target().clone();
                self.push_text(&target, &text)
            }
            None => SyncOutcome::Unchanged,
        }
    }

    /// The surface's widget reports its whole current text.
    pub fn on_text_changed(&mut self, overlay: &mut OverlayManager, text: &str) -> SyncOutcome {
        self.on_edit(overlay, SurfaceEdit::Replace(text.to_string()))
    }

    /// Sets `text` on `target`. Stale targets are dropped silently.
    pub fn push_text(&mut self, target: &Node, text: &str) -> SyncOutcome {
        match target.perform_action(&NodeAction::SetText(text.to_string())) {
            Ok(true) => {
                self.stats.pushed += 1;
                SyncOutcome::Pushed
            }
            Ok(false) => {
                self.stats.dropped += 1;
                log::debug!("Target {} refused set text", target.id());
                SyncOutcome::Refused
            }
            Err(e) => {
                self.stats.dropped += 1;
                log::debug!("Failed to sync text to target {}: {e}", target.id());
                SyncOutcome::Dropped(e)
            }
        }
    }

    /// Replays "enter" on the remote field.
    ///
    /// `editor_action` is what the surface's editor reported; when absent the
    /// session's inferred action is used. A successful Search/Send/Go queues
    /// the surface to close after a short delay.
    pub fn on_submit(
        &mut self,
        overlay: &mut OverlayManager,
        editor_action: Option<ImeAction>,
    ) -> SubmitOutcome {
        let Some(session) = overlay.session() else {
            return SubmitOutcome::NoSession;
        };
        let action = editor_action.unwrap_or(session.action());
        let target = session.target().clone();
        let sid = session.id();
        self.stats.submits += 1;

        match replay_ime_enter(&target) {
            Ok(true) => {
                log::debug!("Performed IME enter on {} for {action}, success=true", target.id());
                let closing = action.closes_surface() && overlay.schedule_auto_close().is_some();
                SubmitOutcome::Replayed { action, closing }
            }
            Ok(false) => {
                log::debug!("Performed IME enter on {} for {action}, success=false", target.id());
                SubmitOutcome::Refused
            }
            Err(e) => {
                log::error!("Failed to trigger target action for {sid}: {e}");
                SubmitOutcome::Failed(e)
            }
        }
    }
}

fn replay_ime_enter(target: &Node) -> RelayResult<bool> {
    let exposes = target.action_list().contains(&ActionId::IME_ENTER);
    if !exposes {
        return Err(RelayError::ActionUnavailable(ActionId::IME_ENTER));
    }
    target.perform_action(&NodeAction::Perform(ActionId::IME_ENTER))
}
