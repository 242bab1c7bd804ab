use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::error::RelayResult;

/// Shared handle to an element in the host's UI tree.
///
/// Holding a `Node` does not keep the underlying element alive; the host
/// may tear it down at any point, after which reads return `None` and
/// actions fail with `RelayError::StaleHandle`.
pub type Node = Rc<dyn ElementHandle>;

/// Identity of an element, stable for as long as the element lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of the application that created a window or element
/// (a package name on Android).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for OwnerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags! {
    /// Input type flags as reported by the field (class, variation, and flag bits).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InputType: u32 {
        const CLASS_TEXT = 0x0000_0001;
        const CLASS_NUMBER = 0x0000_0002;
        const CLASS_PHONE = 0x0000_0003;
        const CLASS_MASK = 0x0000_000f;
        const VARIATION_URI = 0x0000_0010;
        const VARIATION_EMAIL = 0x0000_0020;
        const VARIATION_PASSWORD = 0x0000_0080;
        const FLAG_MULTI_LINE = 0x0002_0000;
    }
}

impl InputType {
    /// Fields that report no input type at all are presented as plain text.
    pub fn or_plain_text(self) -> Self {
        if self.is_empty() {
            InputType::CLASS_TEXT
        } else {
            self
        }
    }
}

/// Text selection bounds; `-1` on both ends means "no selection".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSelection {
    pub start: i32,
    pub end: i32,
}

impl TextSelection {
    pub const NONE: TextSelection = TextSelection { start: -1, end: -1 };

    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for TextSelection {
    fn default() -> Self {
        Self::NONE
    }
}

/// Flat snapshot of everything the router reads from an element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAttributes {
    pub class_name: Option<String>,
    pub editable: bool,
    pub focusable: bool,
    pub focused: bool,
    pub text: Option<String>,
    pub hint: Option<String>,
    pub content_description: Option<String>,
    pub input_type: InputType,
    pub selection: TextSelection,
    pub owner: OwnerId,
}

/// Identifier of an action an element can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionId(pub u32);

impl ActionId {
    /// Replace the element's text; carries the new text as its argument.
    pub const SET_TEXT: ActionId = ActionId(0x0020_0000);
    /// The platform's "IME enter" custom action.
    pub const IME_ENTER: ActionId = ActionId(0x0102_0054);
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// An action request against an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeAction {
    SetText(String),
    Perform(ActionId),
}

impl NodeAction {
    pub fn id(&self) -> ActionId {
        match self {
            NodeAction::SetText(_) => ActionId::SET_TEXT,
            NodeAction::Perform(id) => *id,
        }
    }
}

/// Live handle into the host's UI tree.
///
/// Implementations are thin proxies: every call may observe a different
/// state than the previous one, and any of them may find the element gone.
pub trait ElementHandle: fmt::Debug {
    fn id(&self) -> NodeId;

    /// Current attributes, or `None` if the element no longer exists.
    fn attributes(&self) -> Option<NodeAttributes>;

    fn owner(&self) -> Option<OwnerId> {
        self.attributes().map(|a| a.owner)
    }

    fn parent(&self) -> Option<Node>;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Node>;

    /// Custom actions the element declares.
    fn action_list(&self) -> Vec<ActionId>;

    /// Returns `Ok(false)` when the element refused the action and
    /// `Err(StaleHandle)` when it is gone.
    fn perform_action(&self, action: &NodeAction) -> RelayResult<bool>;
}
