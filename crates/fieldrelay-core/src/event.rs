use crate::display::DisplayId;
use crate::node::{Node, OwnerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEventKind {
    /// An element gained input focus.
    Focused,
    /// The foreground window changed.
    WindowChanged,
    /// Something inside the active window changed.
    ContentChanged,
}

/// A notification pushed by the host. Transient: consumed once, never stored.
#[derive(Clone, Debug)]
pub struct UiEvent {
    pub kind: UiEventKind,
    pub source: Option<Node>,
    /// `None` when the platform cannot attribute the event to a display.
    pub display_id: Option<DisplayId>,
    pub window_owner: Option<OwnerId>,
}

impl UiEvent {
    pub fn new(kind: UiEventKind) -> Self {
        Self {
            kind,
            source: None,
            display_id: None,
            window_owner: None,
        }
    }

    pub fn focused(source: Node) -> Self {
        Self::new(UiEventKind::Focused).source(source)
    }

    pub fn window_changed(owner: impl Into<OwnerId>) -> Self {
        Self::new(UiEventKind::WindowChanged).window_owner(owner)
    }

    pub fn content_changed() -> Self {
        Self::new(UiEventKind::ContentChanged)
    }

    pub fn source(mut self, source: Node) -> Self {
        self.source = Some(source);
        self
    }

    pub fn on_display(mut self, id: DisplayId) -> Self {
        self.display_id = Some(id);
        self
    }

    pub fn window_owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.window_owner = Some(owner.into());
        self
    }
}
