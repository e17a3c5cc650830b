//! Identifiers and small value types shared across the layout modules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::Rectangle;

/// Identifier of one desktop entry, normally its URI.
///
/// Owned by the item source; the layout only stores copies for lookups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Name of a physical display, e.g. `HDMI-A-1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(pub String);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Cell coordinates within one grid.
///
/// Columns grow to the right and rows grow downwards, starting at zero. Coordinates coming from
/// persisted data can be anything, so they stay signed and are bounds-checked on use.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridPos {
    pub column: i32,
    pub row: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { column: 0, row: 0 };

    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// A live display as reported by the display backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub id: DisplayId,
    /// Full display rectangle in global coordinates, before panel margins.
    pub geometry: Rectangle,
}

impl Display {
    pub fn new(id: impl Into<String>, geometry: Rectangle) -> Self {
        Self {
            id: DisplayId(id.into()),
            geometry,
        }
    }
}

/// Notifications from the display backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// A display was connected.
    Added(Display),
    /// A connected display changed its rectangle.
    GeometryChanged {
        id: DisplayId,
        geometry: Rectangle,
    },
    /// A display went away.
    Destroyed(DisplayId),
}
