//! Ordered set of grids, one per display.
//!
//! The first grid belongs to the primary display: automatic placement fills it before moving on
//! to the next ones.

use std::rc::Rc;

use crate::layout::error::LayoutError;
use crate::layout::grid::Grid;
use crate::layout::types::{DisplayId, GridPos, ItemId};
use crate::layout::Options;
use crate::utils::Point;

#[derive(Debug, Default)]
pub struct ScreenSet {
    grids: Vec<Grid>,
}

impl ScreenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Grid> {
        self.grids.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Grid> {
        self.grids.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grid> + '_ {
        self.grids.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Grid> + '_ {
        self.grids.iter_mut()
    }

    pub fn index_of_display(&self, id: &DisplayId) -> Option<usize> {
        self.grids.iter().position(|grid| grid.display_id() == id)
    }

    /// Appends a grid and returns its index.
    pub fn add_screen(&mut self, grid: Grid) -> usize {
        self.grids.push(grid);
        self.grids.len() - 1
    }

    /// Detaches a grid with its contents.
    pub fn remove_screen(&mut self, idx: usize) -> Option<Grid> {
        (idx < self.grids.len()).then(|| self.grids.remove(idx))
    }

    /// Swaps which displays the two grids show, then swaps their slots.
    ///
    /// The displays keep their order, while the contents of the grids trade places: items that
    /// were on the display in slot `a` end up on the display in slot `b` at the same cells.
    pub fn swap_screens(&mut self, a: usize, b: usize) -> Result<(), LayoutError> {
        let len = self.grids.len();
        for idx in [a, b] {
            if idx >= len {
                return Err(LayoutError::ScreenIndexOutOfRange { idx, len });
            }
        }
        if a == b {
            return Ok(());
        }

        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.grids.split_at_mut(high);
        head[low].swap_binding(&mut tail[0]);
        self.grids.swap(a, b);
        Ok(())
    }

    /// Reorders the grids to follow `order`; grids of displays missing from it go last.
    pub fn sort_by_display_order(&mut self, order: &[DisplayId]) {
        self.grids.sort_by_key(|grid| {
            order
                .iter()
                .position(|id| id == grid.display_id())
                .unwrap_or(usize::MAX)
        });
    }

    pub fn update_options_for_all(&mut self, options: &Rc<Options>) {
        for grid in &mut self.grids {
            grid.update_options(options.clone());
        }
    }

    /// Places the item into the cell under `point` on the first valid grid that can take it.
    ///
    /// The item is removed from every other grid, so it ends up owned by exactly one. If no grid
    /// can take it, nothing changes.
    pub fn try_place_on_any(&mut self, id: &ItemId, point: Point) -> Option<usize> {
        let idx = self
            .grids
            .iter()
            .position(|grid| grid.is_valid() && grid.can_accept_pixel(id, point))?;

        // The target grid moves the item itself, so that an item which already owns the target
        // cell keeps it instead of handing it to whatever is stacked there.
        for (other, grid) in self.grids.iter_mut().enumerate() {
            if other != idx {
                grid.clear_item(id);
            }
        }
        self.grids[idx]
            .set_position_from_pixel(id, point)
            .then_some(idx)
    }

    /// First valid grid whose usable area contains `point`.
    pub fn owner_at(&self, point: Point) -> Option<usize> {
        self.grids
            .iter()
            .position(|grid| grid.is_valid() && grid.geometry().contains(point))
    }

    /// Grid currently holding the item.
    pub fn find_item(&self, id: &ItemId) -> Option<usize> {
        self.grids.iter().position(|grid| grid.contains(id))
    }

    /// First valid grid where the item is pinned inside the bounds, with the pinned cell.
    pub fn pinned_home(&self, id: &ItemId) -> Option<(usize, GridPos)> {
        self.grids.iter().enumerate().find_map(|(idx, grid)| {
            let pos = grid.pinned(id)?;
            (grid.is_valid() && grid.is_in_bounds(pos)).then_some((idx, pos))
        })
    }

    pub fn is_pinned_anywhere(&self, id: &ItemId) -> bool {
        self.grids.iter().any(|grid| grid.has_pinned(id))
    }

    pub fn clear_item_everywhere(&mut self, id: &ItemId) {
        for grid in &mut self.grids {
            grid.clear_item(id);
        }
    }

    pub fn clear_pinned_everywhere(&mut self, id: &ItemId) {
        for grid in &mut self.grids {
            grid.clear_pinned(id);
        }
    }
}
