//! Desktop icon layout logic.
//!
//! Every display gets a [`Grid`] of equally sized cells, and every desktop item sits in one cell
//! of one grid. The grids live in a [`ScreenSet`] whose order matters: the first grid belongs to
//! the primary display, and automatic placement fills grids in order, column by column.
//!
//! Items come in two flavors:
//!
//! 1. *Pinned* items have a remembered cell, either because the user dragged them there or
//!    because their automatic position was confirmed with [`Layout::confirm_positions()`]. The
//!    remembered cell is what gets persisted.
//! 2. *Floating* items have no confirmed cell yet: freshly added items, items that lost their
//!    place when a display went away, and items overlapping another item. Floating items get
//!    re-flowed whenever the layout changes.
//!
//! The layout tries to follow these principles:
//!
//! 1. A pinned item whose cell is inside the current bounds of its grid is always drawn at that
//!    cell, no matter what else changed.
//! 2. An item that doesn't fit anywhere is not an error. It has no position until some space
//!    frees up, and gets placed on the next structural change without being re-added.
//! 3. Disconnecting and reconnecting the same display restores its pinned items, unless they
//!    were confirmed somewhere else in the meantime.
//!
//! The [`Layout`] keeps a cache of the global pixel position of every placed item. The
//! presentation layer reads positions only from there, and overlap is defined on it: two items
//! overlap when they are drawn at the same position.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use deskgrid_config::Config;

pub use self::error::LayoutError;
pub use self::grid::Grid;
pub use self::layout_impl::persistence::{PersistedLayout, PersistedPosition};
pub use self::screen_set::ScreenSet;
pub use self::types::{Display, DisplayEvent, DisplayId, GridPos, ItemId};
use crate::utils::{Margins, Point, Size};

mod error;
pub mod grid;
mod layout_impl;
pub mod screen_set;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Size of one grid cell.
    pub cell_size: Size,
    /// Clicks closer than this to a cell border miss the icon.
    pub icon_padding: i32,
    /// Space taken by panels on every display.
    pub panel_margins: Margins,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let cell = config.grid.cell_size;
        let margins = config.panel_margins;

        Self {
            cell_size: Size::new(cell.width, cell.height),
            icon_padding: config.grid.icon_padding,
            panel_margins: Margins {
                top: margins.top,
                bottom: margins.bottom,
                left: margins.left,
                right: margins.right,
            },
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.cell_size.is_empty() {
            return Err(LayoutError::InvalidCellSize(self.cell_size));
        }
        if self.icon_padding < 0 {
            return Err(LayoutError::InvalidIconPadding(self.icon_padding));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Layout {
    /// Grids of the connected displays.
    screens: ScreenSet,
    /// All items in presentation order.
    items: Vec<ItemId>,
    /// Items without a confirmed position.
    floating: HashSet<ItemId>,
    /// Global position of every placed item.
    ///
    /// An item has an entry if and only if it sits on a valid grid.
    positions: HashMap<ItemId, Point>,
    /// Pinned positions of disconnected displays, by display name.
    ///
    /// Restored when a display with the same name connects again.
    detached_pins: HashMap<DisplayId, HashMap<ItemId, GridPos>>,
    /// Configurable properties of the layout.
    options: Rc<Options>,
}

impl Layout {
    pub fn new(config: &Config) -> Result<Self, LayoutError> {
        Self::with_options(Options::from_config(config))
    }

    pub fn with_options(options: Options) -> Result<Self, LayoutError> {
        options.validate()?;

        Ok(Self {
            screens: ScreenSet::new(),
            items: Vec::new(),
            floating: HashSet::new(),
            positions: HashMap::new(),
            detached_pins: HashMap::new(),
            options: Rc::new(options),
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn screens(&self) -> &ScreenSet {
        &self.screens
    }

    /// All items in presentation order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn contains_item(&self, id: &ItemId) -> bool {
        self.items.contains(id)
    }

    #[cfg(test)]
    fn verify_invariants(&self) {
        assert!(self.options.validate().is_ok());

        let known: HashSet<&ItemId> = self.items.iter().collect();
        assert_eq!(known.len(), self.items.len(), "items must be unique");

        for grid in self.screens.iter() {
            assert!(grid.is_valid(), "unbound grids must be removed right away");
            assert_eq!(
                grid.options(),
                &self.options,
                "grid options must be synchronized with layout"
            );
            grid.verify_invariants();

            for (_, id) in grid.occupants() {
                assert!(known.contains(id), "grid holds unknown item {id}");
            }
        }

        for id in &self.items {
            let holders: Vec<_> = self.screens.iter().filter(|g| g.contains(id)).collect();
            assert!(holders.len() <= 1, "item {id} is on more than one grid");

            let expected = holders.first().and_then(|grid| grid.pixel_position_of(id));
            assert_eq!(
                self.positions.get(id).copied(),
                expected,
                "cached position of {id} must match its grid"
            );

            let pinned_on = self.screens.iter().filter(|g| g.has_pinned(id)).count();
            assert!(pinned_on <= 1, "item {id} is pinned on more than one grid");
        }

        for id in self.positions.keys() {
            assert!(known.contains(id), "position cached for unknown item {id}");
        }
        for id in &self.floating {
            assert!(known.contains(id), "unknown item {id} is floating");
        }
        for pins in self.detached_pins.values() {
            for id in pins.keys() {
                assert!(
                    !self.screens.is_pinned_anywhere(id),
                    "detached pin of {id} shadows a live one"
                );
            }
        }
    }
}
