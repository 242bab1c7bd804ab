use crate::action::{ImeAction, ImeOptions};
use crate::display::DisplayId;
use crate::error::RelayResult;
use crate::node::{InputType, Node};

/// Tree query side of the host's assistive-technology API.
pub trait AccessibilityHost {
    /// Root of the currently active window, if the host can provide one.
    fn root_in_active_window(&self) -> Option<Node>;
}

/// What the floating surface should look like when it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceRequest {
    pub hint: Option<String>,
    /// Seed text; the caret starts at its end.
    pub text: String,
    pub input_type: InputType,
    pub ime_options: ImeOptions,
}

impl SurfaceRequest {
    pub fn action(&self) -> ImeAction {
        self.ime_options.action().unwrap_or(ImeAction::Done)
    }
}

/// Presents and removes the top-level floating surface.
pub trait WindowPlacement {
    /// Ask the host to present a new surface on `display`. May be rejected.
    fn present(&self, display: DisplayId, request: &SurfaceRequest) -> RelayResult<()>;

    /// Tear the surface down. Must tolerate being called for a surface that
    /// is already gone.
    fn dismiss(&self, display: DisplayId);
}

/// Soft keyboard control for the surface's input control.
pub trait SoftKeyboard {
    /// Focus the surface's input and bring up the keyboard.
    fn show_for_surface(&self);
}
