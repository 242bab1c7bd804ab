use std::fmt;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::event::UiEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayId(pub i32);

impl DisplayId {
    /// The platform's built-in screen.
    pub const DEFAULT: DisplayId = DisplayId(0);
    /// Stand-in for "the platform did not say"; never equal to a real display.
    pub const INVALID: DisplayId = DisplayId(-1);
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: u32 {
        const SUPPORTS_PROTECTED_BUFFERS = 1 << 0;
        const SECURE = 1 << 1;
        const PRIVATE = 1 << 2;
        const PRESENTATION = 1 << 3;
        const ROUND = 1 << 4;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Display {
    pub id: DisplayId,
    pub name: String,
    pub flags: DisplayFlags,
}

impl Display {
    pub fn new(id: DisplayId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            flags: DisplayFlags::empty(),
        }
    }

    pub fn with_flags(mut self, flags: DisplayFlags) -> Self {
        self.flags = flags;
        self
    }
}

pub type DisplayList = SmallVec<[Display; 2]>;

/// Enumerates the active displays, primary first.
pub trait DisplayProvider {
    fn displays(&self) -> DisplayList;

    fn default_display_id(&self) -> DisplayId {
        DisplayId::DEFAULT
    }

    /// Id of the first enumerated display.
    fn primary_display_id(&self) -> Option<DisplayId> {
        self.displays().first().map(|d| d.id)
    }
}

/// True iff the event carries the id of the first enumerated display.
///
/// The topology is queried on every call; docking and undocking change it
/// under our feet. Events without a display id compare as `INVALID` and are
/// therefore never primary.
pub fn is_primary_display(event: &UiEvent, displays: &dyn DisplayProvider) -> bool {
    let event_display = event.display_id.unwrap_or(DisplayId::INVALID);
    displays.primary_display_id() == Some(event_display)
}
