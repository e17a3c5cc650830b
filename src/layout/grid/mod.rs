//! Icon grid of a single display.
//!
//! A grid covers the display rectangle minus the panel margins and splits it into cells of the
//! configured size. Every cell holds at most one item. Cells are addressed by [`GridPos`], with
//! `(0, 0)` in the top-left corner, and automatic placement fills them column by column.
//!
//! When the display goes away the grid becomes *unbound*: it keeps its last geometry and contents
//! so the layout can migrate them, but it no longer accepts new items and reports nothing as
//! visible.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::layout::types::{Display, DisplayId, GridPos, ItemId};
use crate::layout::Options;
use crate::utils::{Rectangle, Size};

pub mod occupancy;
mod pinned;


use self::occupancy::CellIndex;

#[derive(Debug)]
pub struct Grid {
    /// Name of the display this grid belongs to.
    ///
    /// Kept after the display goes away so the grid can still be identified.
    display_id: DisplayId,
    /// Whether the display is currently live.
    is_bound: bool,
    /// Latest known display rectangle, before panel margins.
    display_geometry: Rectangle,
    /// Usable area: the display rectangle inset by panel margins.
    geometry: Rectangle,
    /// Index of the last column that fits into the geometry.
    max_column: i32,
    /// Index of the last row that fits into the geometry.
    max_row: i32,
    /// Cell ownership.
    cells: CellIndex,
    /// Items drawn on a cell that another item owns.
    ///
    /// This only happens when two remembered positions point at the same cell. Such items stay
    /// out of `cells` so cell ownership remains unambiguous.
    stacked: HashMap<ItemId, GridPos>,
    /// Remembered positions, independent of the current cell ownership.
    pinned: HashMap<ItemId, GridPos>,
    /// Configurable properties of the layout.
    options: Rc<Options>,
}

impl Grid {
    pub fn new(display: Display, options: Rc<Options>) -> Self {
        let mut grid = Self {
            display_id: display.id,
            is_bound: true,
            display_geometry: display.geometry,
            geometry: Rectangle::default(),
            max_column: 0,
            max_row: 0,
            cells: CellIndex::new(),
            stacked: HashMap::new(),
            pinned: HashMap::new(),
            options,
        };
        grid.recalculate_bounds();
        grid
    }

    pub fn display_id(&self) -> &DisplayId {
        &self.display_id
    }

    /// Whether the grid is bound to a live display.
    pub fn is_valid(&self) -> bool {
        self.is_bound
    }

    pub fn display_geometry(&self) -> Rectangle {
        self.display_geometry
    }

    /// Usable area in global coordinates.
    pub fn geometry(&self) -> Rectangle {
        self.geometry
    }

    pub fn cell_size(&self) -> Size {
        self.options.cell_size
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    pub fn max_column(&self) -> i32 {
        self.max_column
    }

    pub fn max_row(&self) -> i32 {
        self.max_row
    }

    /// Binds the grid to a (possibly different) display, keeping the contents.
    pub fn rebind(&mut self, new_display: Display) {
        trace!("rebinding grid {} to {}", self.display_id, new_display.id);
        self.display_id = new_display.id;
        self.display_geometry = new_display.geometry;
        self.is_bound = true;
        self.recalculate_bounds();
    }

    /// Exchanges displays with another grid, each keeping its own contents.
    pub fn swap_binding(&mut self, other: &mut Grid) {
        trace!("swapping displays of {} and {}", self.display_id, other.display_id);
        std::mem::swap(&mut self.display_id, &mut other.display_id);
        std::mem::swap(&mut self.is_bound, &mut other.is_bound);
        std::mem::swap(&mut self.display_geometry, &mut other.display_geometry);
        self.recalculate_bounds();
        other.recalculate_bounds();
    }

    /// Marks the display as gone.
    pub fn unbind(&mut self) {
        self.is_bound = false;
    }

    /// Updates the display rectangle.
    ///
    /// Empty rectangles are transient states of some backends and are ignored; returns whether
    /// the geometry was applied.
    pub fn update_geometry(&mut self, geometry: Rectangle) -> bool {
        if geometry.is_empty() {
            return false;
        }

        self.display_geometry = geometry;
        self.recalculate_bounds();
        true
    }

    /// Applies new options. The caller is expected to have validated them.
    pub fn update_options(&mut self, options: Rc<Options>) {
        self.options = options;
        self.recalculate_bounds();
    }

    /// Recomputes the usable geometry and the grid bounds.
    ///
    /// Items that end up outside the new bounds stay where they are; see
    /// [`Grid::items_out_of_bounds()`].
    fn recalculate_bounds(&mut self) {
        let cell = self.options.cell_size;
        debug_assert!(!cell.is_empty());

        self.geometry = self.display_geometry.inset(self.options.panel_margins);

        let width = self.geometry.size.w.max(0);
        let height = self.geometry.size.h.max(0);
        self.max_column = (width / cell.w - 1).max(0);
        self.max_row = (height / cell.h - 1).max(0);
    }

    pub fn is_in_bounds(&self, pos: GridPos) -> bool {
        (0..=self.max_column).contains(&pos.column) && (0..=self.max_row).contains(&pos.row)
    }

    /// Puts the item into the first free cell at or after `start` in column-major order.
    ///
    /// The item's previous cell in this grid is vacated first. Returns `None` if no free cell
    /// remains after `start` or if the grid is unbound.
    pub fn place_item(&mut self, id: &ItemId, start: GridPos) -> Option<GridPos> {
        self.clear_item(id);

        if !self.is_bound {
            return None;
        }

        let mut pos = start;
        while self.is_in_bounds(pos) {
            if self.cells.is_free(pos) {
                self.cells.insert(id.clone(), pos);
                return Some(pos);
            }

            if pos.row < self.max_row {
                pos.row += 1;
            } else if pos.column < self.max_column {
                pos.row = 0;
                pos.column += 1;
            } else {
                break;
            }
        }

        None
    }

    /// Whether `set_grid_position(id, pos)` would succeed.
    pub fn can_accept(&self, id: &ItemId, pos: GridPos) -> bool {
        if self.cells.position_of(id) == Some(pos) {
            return true;
        }

        self.is_bound && self.is_in_bounds(pos) && self.cells.is_free(pos)
    }

    /// Moves the item into a specific cell.
    ///
    /// Fails without changes if the cell is outside the bounds, owned by another item, or the
    /// grid is unbound. Succeeds trivially if the item already owns the cell.
    pub fn set_grid_position(&mut self, id: &ItemId, pos: GridPos) -> bool {
        if !self.can_accept(id, pos) {
            return false;
        }
        if self.cells.position_of(id) == Some(pos) {
            return true;
        }

        // Vacate through clear_item() so that stacked items on the old cell get a new owner.
        self.clear_item(id);
        self.cells.insert(id.clone(), pos)
    }

    /// Vacates the item's cell, whether owned or stacked.
    ///
    /// If the item owned a cell with stacked items, the first of them (by identifier) becomes the
    /// new owner, so stacked items always sit on an owned cell.
    pub fn clear_item(&mut self, id: &ItemId) {
        self.stacked.remove(id);

        let Some(pos) = self.cells.remove(id) else {
            return;
        };

        let heir = self
            .stacked
            .iter()
            .filter(|(_, stacked_pos)| **stacked_pos == pos)
            .map(|(id, _)| id)
            .min()
            .cloned();
        if let Some(heir) = heir {
            trace!("{heir} takes over cell {pos} from {id}");
            self.stacked.remove(&heir);
            self.cells.insert(heir, pos);
        }
    }

    /// Draws the item on a cell owned by another item, without taking the cell over.
    ///
    /// Falls back to a normal placement when the cell is free. Fails if `pos` is out of bounds
    /// or the grid is unbound.
    pub fn stack(&mut self, id: &ItemId, pos: GridPos) -> bool {
        if !self.is_bound || !self.is_in_bounds(pos) {
            return false;
        }

        self.clear_item(id);
        if self.cells.is_free(pos) {
            return self.cells.insert(id.clone(), pos);
        }

        self.stacked.insert(id.clone(), pos);
        true
    }

    pub fn item_at(&self, pos: GridPos) -> Option<&ItemId> {
        self.cells.get(pos)
    }

    /// Cell the item owns or is stacked on.
    pub fn grid_position_of(&self, id: &ItemId) -> Option<GridPos> {
        self.cells
            .position_of(id)
            .or_else(|| self.stacked.get(id).copied())
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.cells.contains(id) || self.stacked.contains_key(id)
    }

    pub fn is_stacked(&self, id: &ItemId) -> bool {
        self.stacked.contains_key(id)
    }

    /// Every item on this grid, owners and stacked, in column-major order.
    pub fn occupants(&self) -> Vec<(GridPos, &ItemId)> {
        let mut occupants: Vec<_> = self
            .cells
            .iter()
            .chain(self.stacked.iter().map(|(id, pos)| (*pos, id)))
            .collect();
        occupants.sort_unstable();
        occupants
    }

    /// Items whose cell lies beyond the current bounds.
    pub fn items_out_of_bounds(&self) -> Vec<&ItemId> {
        self.occupants()
            .into_iter()
            .filter(|(pos, _)| !self.is_in_bounds(*pos))
            .map(|(_, id)| id)
            .collect()
    }

    /// Items whose cell lies within the current bounds; nothing if the grid is unbound.
    pub fn items_in_bounds(&self) -> Vec<&ItemId> {
        if !self.is_bound {
            return Vec::new();
        }

        self.occupants()
            .into_iter()
            .filter(|(pos, _)| self.is_in_bounds(*pos))
            .map(|(_, id)| id)
            .collect()
    }

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        assert!(self.max_column >= 0);
        assert!(self.max_row >= 0);
        assert!(!self.options.cell_size.is_empty());

        self.cells.verify_invariants();

        for (id, pos) in &self.stacked {
            assert!(
                !self.cells.contains(id),
                "item {id} can't both own a cell and be stacked"
            );
            assert!(
                self.cells.get(*pos).is_some(),
                "stacked item {id} must sit on an owned cell"
            );
        }
    }
}
