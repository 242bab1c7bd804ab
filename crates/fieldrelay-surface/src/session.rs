use fieldrelay_core::{DisplayId, ImeAction, InputType, Node, SessionId, SurfaceRequest};

use crate::textfield::{SurfaceEdit, SurfaceTextState};

/// Router-wide state, owned by the focus state machine and lent to the
/// overlay manager and sync channel for the duration of a call.
#[derive(Debug, Default)]
pub struct RouterState {
    /// The remote field currently mirrored.
    pub current_target: Option<Node>,
    /// Whether the floating surface is presented, as far as the router knows.
    pub overlay_shown: bool,
}

impl RouterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.current_target.is_some()
    }
}

/// One presented floating surface and the remote field it mirrors.
///
/// The target and the action are fixed at creation.
#[derive(Debug)]
pub struct OverlaySession {
    id: SessionId,
    target: Node,
    display: DisplayId,
    action: ImeAction,
    input_type: InputType,
    hint: Option<String>,
    text: SurfaceTextState,
    last_edited_text: String,
}

impl OverlaySession {
    pub(crate) fn new(id: SessionId, target: Node, display: DisplayId, request: &SurfaceRequest) -> Self {
        Self {
            id,
            target,
            display,
            action: request.action(),
            input_type: request.input_type,
            hint: request.hint.clone().filter(|h| !h.is_empty()),
            text: SurfaceTextState::seeded(&request.text),
            last_edited_text: request.text.clone(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn target(&self) -> &Node {
        &self.target
    }

    pub fn display(&self) -> DisplayId {
        self.display
    }

    pub fn action(&self) -> ImeAction {
        self.action
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn text(&self) -> &SurfaceTextState {
        &self.text
    }

    pub fn last_edited_text(&self) -> &str {
        &self.last_edited_text
    }

    /// Applies an edit; returns the full new text if it changed.
    pub fn edit(&mut self, edit: SurfaceEdit) -> Option<String> {
        if self.text.apply(edit) {
            self.last_edited_text = self.text.text.clone();
            Some(self.last_edited_text.clone())
        } else {
            None
        }
    }
}
