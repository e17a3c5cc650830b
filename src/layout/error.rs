use thiserror::Error;

use crate::layout::types::DisplayId;
use crate::utils::Size;

/// Configuration errors.
///
/// Running out of free cells is not an error: such items are floating and have no position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("cell size must be positive in both dimensions, got {}x{}", .0.w, .0.h)]
    InvalidCellSize(Size),
    #[error("icon padding must not be negative, got {0}")]
    InvalidIconPadding(i32),
    #[error("no display named {0}")]
    UnknownDisplay(DisplayId),
    #[error("display {0} is already part of the layout")]
    DuplicateDisplay(DisplayId),
    #[error("screen index {idx} is out of range for {len} screens")]
    ScreenIndexOutOfRange { idx: usize, len: usize },
}
