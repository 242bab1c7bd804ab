use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use fieldrelay_core::{
    Clock, DisplayId, DisplayProvider, ImeOptions, Node, NodeAttributes, RelayError, RelayResult,
    SessionId, SoftKeyboard, SurfaceRequest, TimerQueue, WindowPlacement, infer_action,
};

use crate::session::{OverlaySession, RouterState};

pub const DEFAULT_KEYBOARD_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_AUTO_CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Text the surface starts with.
///
/// A field whose text is just its hint echoed back (and has no selection)
/// is showing a placeholder; the surface starts empty instead.
pub fn seed_text(attrs: &NodeAttributes) -> String {
    if attrs.selection.is_none() && attrs.text == attrs.hint {
        return String::new();
    }
    attrs.text.clone().unwrap_or_default()
}

/// Everything the surface needs to mirror a field.
pub fn request_for(attrs: &NodeAttributes) -> SurfaceRequest {
    let action = infer_action(
        attrs.hint.as_deref(),
        attrs.text.as_deref(),
        attrs.content_description.as_deref(),
    );
    SurfaceRequest {
        hint: attrs.hint.clone(),
        text: seed_text(attrs),
        input_type: attrs.input_type.or_plain_text(),
        ime_options: ImeOptions::for_action(action),
    }
}

/// Deferred surface work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceTask {
    ShowKeyboard,
    AutoClose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// The focus state machine decided the field is gone.
    Router,
    /// The user closed the surface (close button, back).
    User,
    /// A terminal submit succeeded and the delay ran out.
    Submitted,
    /// The host interrupted or stopped the service.
    Interrupted,
}

#[derive(Clone, Copy, Debug)]
pub struct OverlayTimings {
    pub keyboard_delay: Duration,
    pub auto_close_delay: Duration,
}

impl Default for OverlayTimings {
    fn default() -> Self {
        Self {
            keyboard_delay: DEFAULT_KEYBOARD_DELAY,
            auto_close_delay: DEFAULT_AUTO_CLOSE_DELAY,
        }
    }
}

/// Owns the single floating surface.
///
/// At most one `OverlaySession` exists at a time. `show_for` refuses with
/// `SurfaceAlreadyOpen` rather than replacing a live session; deciding to
/// replace is the caller's business.
pub struct OverlayManager {
    displays: Rc<dyn DisplayProvider>,
    placement: Rc<dyn WindowPlacement>,
    keyboard: Rc<dyn SoftKeyboard>,
    clock: Box<dyn Clock>,
    timings: OverlayTimings,
    timers: TimerQueue<SurfaceTask>,
    session: Option<OverlaySession>,
    next_session: u64,
}

impl OverlayManager {
    pub fn new(
        displays: Rc<dyn DisplayProvider>,
        placement: Rc<dyn WindowPlacement>,
        keyboard: Rc<dyn SoftKeyboard>,
        clock: Box<dyn Clock>,
        timings: OverlayTimings,
    ) -> Self {
        Self {
            displays,
            placement,
            keyboard,
            clock,
            timings,
            timers: TimerQueue::new(),
            session: None,
            next_session: 1,
        }
    }

    pub fn session(&self) -> Option<&OverlaySession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut OverlaySession> {
        self.session.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Where the surface goes: the first non-default display when more than
    /// one is attached, otherwise the default one.
    pub fn select_display(&self) -> DisplayId {
        let displays = self.displays.displays();
        let default_id = self.displays.default_display_id();
        for (i, d) in displays.iter().enumerate() {
            log::debug!(
                "Display[{i}]: id={}, name={}, flags={:?}",
                d.id,
                d.name,
                d.flags
            );
        }
        if displays.len() > 1
            && let Some(secondary) = displays.iter().find(|d| d.id != default_id)
        {
            return secondary.id;
        }
        default_id
    }

    /// Presents a surface mirroring `target`.
    ///
    /// On success the router state points at `target` and is marked shown.
    /// A rejected placement is not retried elsewhere: the state is reset to
    /// idle and the error handed back for logging.
    pub fn show_for(
        &mut self,
        state: &mut RouterState,
        target: Node,
        request: SurfaceRequest,
    ) -> RelayResult<SessionId> {
        if self.session.is_some() {
            return Err(RelayError::SurfaceAlreadyOpen);
        }

        let display = self.select_display();
        if let Err(e) = self.placement.present(display, &request) {
            log::error!("Failed to present surface on display {display}: {e}");
            state.current_target = None;
            state.overlay_shown = false;
            return Err(e);
        }

        let id = SessionId(self.next_session);
        self.next_session += 1;
        log::info!(
            "Surface {id} shown on display {display}: hint={:?}, text={:?}, input_type={:#x}, action={}",
            request.hint,
            request.text,
            request.input_type.bits(),
            request.action()
        );

        self.session = Some(OverlaySession::new(id, target.clone(), display, &request));
        state.current_target = Some(target);
        state.overlay_shown = true;

        let now = self.clock.now();
        self.timers
            .schedule(now, self.timings.keyboard_delay, id, SurfaceTask::ShowKeyboard);
        Ok(id)
    }

    /// Tears the surface down and clears the router's target. A no-op apart
    /// from resetting the state when nothing is open.
    pub fn close_current(&mut self, state: &mut RouterState, reason: CloseReason) -> Option<SessionId> {
        state.current_target = None;
        state.overlay_shown = false;

        let session = self.session.take()?;
        let id = session.id();
        let cancelled = self.timers.cancel_session(id);
        if reason != CloseReason::User {
            self.placement.dismiss(session.display());
        }
        log::info!("Surface {id} closed ({reason:?}), {cancelled} pending task(s) dropped");
        Some(id)
    }

    /// Queues the post-submit close for the current session.
    pub fn schedule_auto_close(&mut self) -> Option<SessionId> {
        let id = self.session.as_ref()?.id();
        let now = self.clock.now();
        self.timers
            .schedule(now, self.timings.auto_close_delay, id, SurfaceTask::AutoClose);
        Some(id)
    }

    /// Runs due tasks. Tasks whose session is no longer current are dropped.
    pub fn tick(&mut self, state: &mut RouterState) -> Vec<(SessionId, SurfaceTask)> {
        let now = self.clock.now();
        let mut fired = Vec::new();
        for (sid, task) in self.timers.take_due(now) {
            if self.session.as_ref().map(|s| s.id()) != Some(sid) {
                log::debug!("Dropping {task:?} for ended {sid}");
                continue;
            }
            match task {
                SurfaceTask::ShowKeyboard => self.keyboard.show_for_surface(),
                SurfaceTask::AutoClose => {
                    self.close_current(state, CloseReason::Submitted);
                }
            }
            fired.push((sid, task));
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }
}
