pub use crate::action::{ImeAction, ImeOptions, infer_action};
pub use crate::clock::{Clock, SystemClock, TestClock};
pub use crate::display::{Display, DisplayFlags, DisplayId, DisplayList, DisplayProvider, is_primary_display};
pub use crate::error::{RelayError, RelayResult};
pub use crate::event::{UiEvent, UiEventKind};
pub use crate::host::{AccessibilityHost, SoftKeyboard, SurfaceRequest, WindowPlacement};
pub use crate::node::{
    ActionId, ElementHandle, InputType, Node, NodeAction, NodeAttributes, NodeId, OwnerId,
    TextSelection,
};
pub use crate::ownership::{MAX_ANCESTOR_DEPTH, is_owned_by};
pub use crate::semantics::{MAX_SEARCH_DEPTH, find_focused_text_field, is_text_field};
pub use crate::timer::{SessionId, TimerQueue};
