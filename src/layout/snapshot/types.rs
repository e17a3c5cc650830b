//! Snapshot types.
//!
//! Everything here is plain data in a stable order, so snapshots can be compared in tests and
//! printed as JSON by the command-line tool.

use serde::Serialize;

use crate::layout::types::{DisplayId, ItemId};
use crate::utils::Rectangle;

/// Snapshot of the whole layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    /// Cell size shared by every screen.
    pub cell: SizeSnapshot,
    /// Screens in order, the primary one first.
    pub screens: Vec<ScreenSnapshot>,
    /// Items that fit nowhere, in presentation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unplaced: Vec<ItemId>,
}

/// Snapshot of a single screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenSnapshot {
    pub display: DisplayId,
    /// Usable area, after panel margins.
    pub geometry: RectSnapshot,
    pub columns: i32,
    pub rows: i32,
    /// Items in column-major cell order.
    pub items: Vec<ItemSnapshot>,
}

/// Snapshot of a placed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub column: i32,
    pub row: i32,
    /// Global position of the cell's top-left corner.
    pub x: i32,
    pub y: i32,
    pub pinned: bool,
    pub floating: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub overlapping: bool,
}

/// Rectangle snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectSnapshot {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl From<Rectangle> for RectSnapshot {
    fn from(rect: Rectangle) -> Self {
        Self {
            x: rect.loc.x,
            y: rect.loc.y,
            w: rect.size.w,
            h: rect.size.h,
        }
    }
}

/// Size snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeSnapshot {
    pub w: i32,
    pub h: i32,
}
