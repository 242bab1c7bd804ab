use std::rc::Rc;

use web_time::Instant;

use fieldrelay_core::prelude::*;
use fieldrelay_devtools::{Decision, Inspector};
use fieldrelay_surface::{
    CloseReason, OverlayManager, RouterState, SubmitOutcome, SurfaceEdit, SurfaceTask,
    SyncOutcome, SyncStats, TextSyncChannel, request_for,
};

use crate::config::RouterConfig;

/// Host capabilities the router is wired to.
pub struct Environment {
    pub host: Rc<dyn AccessibilityHost>,
    pub displays: Rc<dyn DisplayProvider>,
    pub placement: Rc<dyn WindowPlacement>,
    pub keyboard: Rc<dyn SoftKeyboard>,
    pub clock: Box<dyn Clock>,
}

/// The focus state machine.
///
/// Consumes host events one at a time and decides when the floating
/// surface is shown or hidden. Every show is guarded by "not already
/// shown" and every hide by "currently tracking", so repeated or
/// reordered notifications of the same fact are harmless.
pub struct FocusRouter {
    config: RouterConfig,
    self_owner: OwnerId,
    host: Rc<dyn AccessibilityHost>,
    displays: Rc<dyn DisplayProvider>,
    state: RouterState,
    overlay: OverlayManager,
    sync: TextSyncChannel,
    inspector: Inspector,
}

impl FocusRouter {
    pub fn new(config: RouterConfig, env: Environment) -> anyhow::Result<Self> {
        config.validate()?;
        let overlay = OverlayManager::new(
            env.displays.clone(),
            env.placement,
            env.keyboard,
            env.clock,
            config.timings(),
        );
        Ok(Self {
            self_owner: config.self_owner(),
            inspector: Inspector::new(config.trace_capacity),
            host: env.host,
            displays: env.displays,
            state: RouterState::new(),
            overlay,
            sync: TextSyncChannel::new(),
            config,
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn overlay(&self) -> &OverlayManager {
        &self.overlay
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub fn inspector_mut(&mut self) -> &mut Inspector {
        &mut self.inspector
    }

    pub fn sync_stats(&self) -> SyncStats {
        self.sync.stats()
    }

    pub fn connect(&mut self) {
        log::info!(
            "Service connected: self owner {}, {} excluded owner(s)",
            self.self_owner,
            self.config.excluded_owners.len()
        );
    }

    /// Host was interrupted; whatever is shown goes away.
    pub fn interrupt(&mut self) {
        log::warn!("Service interrupted");
        self.close(CloseReason::Interrupted, "service interrupted");
    }

    pub fn shutdown(&mut self) {
        self.close(CloseReason::Interrupted, "service stopped");
        log::info!("Service stopped: {}", self.inspector.summary());
    }

    pub fn handle_event(&mut self, event: Option<UiEvent>) {
        let Some(event) = event else {
            return;
        };
        self.inspector.note_event();
        match event.kind {
            UiEventKind::Focused => self.handle_focused(&event),
            UiEventKind::WindowChanged => self.handle_window_changed(&event),
            UiEventKind::ContentChanged => self.handle_content_changed(&event),
        }
    }

    fn handle_focused(&mut self, event: &UiEvent) {
        let Some(source) = event.source.clone() else {
            return;
        };
        if !is_primary_display(event, self.displays.as_ref()) {
            self.ignore("focus on another display");
            return;
        }
        if self.is_self_owned(&source) {
            self.ignore("focus inside own surface");
            return;
        }

        if is_text_field(source.as_ref()) {
            if self.state.overlay_shown {
                log::debug!("Focused {} while surface is shown, skipping", source.id());
                return;
            }
            self.show_for(source);
        } else if self.state.is_tracking() || self.overlay.is_open() {
            log::debug!("Focus moved to non-field {}", source.id());
            self.close(CloseReason::Router, "focus left the field");
        }
    }

    fn handle_window_changed(&mut self, event: &UiEvent) {
        let ours = event
            .window_owner
            .as_ref()
            .is_some_and(|owner| *owner == self.self_owner);
        if ours {
            self.state.overlay_shown = true;
        } else if self.state.overlay_shown {
            log::debug!("Window switched away from the surface");
            self.state.overlay_shown = false;
        }
    }

    fn handle_content_changed(&mut self, event: &UiEvent) {
        if self.state.overlay_shown || !is_primary_display(event, self.displays.as_ref()) {
            return;
        }
        let Some(root) = self.host.root_in_active_window() else {
            return;
        };
        if let Some(owner) = root.owner()
            && self.config.is_excluded(&owner)
        {
            self.ignore("content churn from excluded window");
            return;
        }

        match find_focused_text_field(&root, self.config.max_search_depth) {
            Some(field) => {
                if !self.is_self_owned(&field) {
                    self.show_for(field);
                }
            }
            None if self.state.is_tracking() => {
                log::debug!("No focused field left in the active window");
                self.close(CloseReason::Router, "field lost focus");
            }
            None => {}
        }
    }

    fn show_for(&mut self, target: Node) {
        let Some(attrs) = target.attributes() else {
            self.ignore("target went stale");
            return;
        };
        log::debug!(
            "Showing for {}: class={:?}, editable={}, focusable={}",
            target.id(),
            attrs.class_name,
            attrs.editable,
            attrs.focusable
        );
        let request = request_for(&attrs);
        let action = request.action();

        // a session survives the user switching windows; replace it
        if self.overlay.is_open() {
            self.close(CloseReason::Router, "replaced by another field");
        }

        match self.overlay.show_for(&mut self.state, target.clone(), request) {
            Ok(session) => {
                let display = self
                    .overlay
                    .session()
                    .map(|s| s.display())
                    .unwrap_or(DisplayId::DEFAULT);
                self.record(Decision::Shown {
                    session,
                    display,
                    target: target.id(),
                    action,
                });
            }
            Err(RelayError::PlacementFailed { display, .. }) => {
                self.record(Decision::PlacementFailed { display });
            }
            Err(e) => {
                log::warn!("Not showing surface for {}: {e}", target.id());
                self.ignore("surface unavailable");
            }
        }
    }

    /// Text edit from the surface's keyboard or input method.
    pub fn surface_edit(&mut self, edit: SurfaceEdit) -> SyncOutcome {
        let target = self.current_target_id();
        let outcome = self.sync.on_edit(&mut self.overlay, edit);
        self.note_sync(target, &outcome);
        outcome
    }

    /// The surface's own widget reports its whole text.
    pub fn surface_text_changed(&mut self, text: &str) -> SyncOutcome {
        let target = self.current_target_id();
        let outcome = self.sync.on_text_changed(&mut self.overlay, text);
        self.note_sync(target, &outcome);
        outcome
    }

    /// Enter / editor action pressed on the surface.
    pub fn surface_submit(&mut self, editor_action: Option<ImeAction>) -> SubmitOutcome {
        let action = editor_action.or_else(|| self.overlay.session().map(|s| s.action()));
        let outcome = self.sync.on_submit(&mut self.overlay, editor_action);
        if let Some(action) = action
            && outcome != SubmitOutcome::NoSession
        {
            let ok = matches!(outcome, SubmitOutcome::Replayed { .. });
            self.record(Decision::SubmitReplayed { action, ok });
        }
        outcome
    }

    /// The user closed the surface (close button or back).
    pub fn surface_closed(&mut self) {
        self.close(CloseReason::User, "closed by user");
    }

    /// Fires due timers. Hosts call this from their loop, or when
    /// `next_deadline` passes.
    pub fn tick(&mut self) -> Vec<(SessionId, SurfaceTask)> {
        let fired = self.overlay.tick(&mut self.state);
        for (session, task) in &fired {
            if *task == SurfaceTask::AutoClose {
                self.record(Decision::AutoClosed { session: *session });
            }
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.overlay.next_deadline()
    }

    fn close(&mut self, reason: CloseReason, cause: &'static str) {
        let was_tracking = self.state.is_tracking();
        let session = self.overlay.close_current(&mut self.state, reason);
        if session.is_some() || was_tracking {
            self.record(Decision::Hidden { session, cause });
        }
    }

    fn is_self_owned(&self, node: &Node) -> bool {
        is_owned_by(node, &self.self_owner, self.config.max_ancestor_depth)
    }

    fn current_target_id(&self) -> Option<NodeId> {
        self.overlay.session().map(|s| s.target().id())
    }

    fn note_sync(&mut self, target: Option<NodeId>, outcome: &SyncOutcome) {
        if let (Some(target), SyncOutcome::Refused | SyncOutcome::Dropped(_)) = (target, outcome) {
            self.record(Decision::SyncDropped { target });
        }
    }

    fn ignore(&mut self, why: &'static str) {
        log::trace!("Ignored: {why}");
        self.record(Decision::Ignored(why));
    }

    fn record(&mut self, decision: Decision) {
        let now = self.overlay.now();
        self.inspector.record(now, decision);
    }
}
