use thiserror::Error;

use crate::display::DisplayId;
use crate::node::ActionId;

/// Failures of calls into the host. None of them are fatal: callers log
/// and skip the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("element is no longer available")]
    StaleHandle,
    #[error("surface placement on display {display} rejected: {reason}")]
    PlacementFailed { display: DisplayId, reason: String },
    #[error("element does not expose action {0}")]
    ActionUnavailable(ActionId),
    #[error("a floating surface is already open")]
    SurfaceAlreadyOpen,
}

pub type RelayResult<T> = Result<T, RelayError>;
