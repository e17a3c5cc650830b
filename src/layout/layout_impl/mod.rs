//! Layout coordinator operations, split by concern.
//!
//! Shared helpers used by several of the submodules live here.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{GridPos, ItemId, Layout};

mod item_ops;
pub mod persistence;
mod queries;
mod reconcile;
mod screen_ops;

/// Outcome of putting a pinned item back on its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    /// The item owns its pinned cell.
    Owned,
    /// Another pinned item owns the cell; both are drawn there and overlap.
    Stacked,
}

impl Layout {
    /// Items of `ids` in presentation order, skipping unknown ones.
    fn in_presentation_order(&self, ids: &HashSet<ItemId>) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|id| ids.contains(*id))
            .cloned()
            .collect()
    }

    /// Floating items in presentation order.
    fn floating_in_order(&self) -> Vec<ItemId> {
        self.in_presentation_order(&self.floating)
    }

    /// Floating items free to move, in presentation order.
    ///
    /// Items stacked on their pinned cell float too, but stay where they are.
    fn movable_floating(&self) -> Vec<ItemId> {
        self.floating_in_order()
            .into_iter()
            .filter(|id| self.screens.pinned_home(id).is_none())
            .collect()
    }

    /// Puts the item into the first free cell, trying grids in order.
    ///
    /// The item must not be on any grid. Updates the position cache either way.
    fn place_automatically(&mut self, id: &ItemId) -> Option<usize> {
        for (idx, grid) in self.screens.iter_mut().enumerate() {
            if !grid.is_valid() {
                continue;
            }

            if let Some(pos) = grid.place_item(id, GridPos::ORIGIN) {
                trace!("placed {id} at {pos} on screen {idx}");
                self.positions
                    .insert(id.clone(), grid.pixel_position_from_grid(pos));
                return Some(idx);
            }
        }

        debug!("no free cell for {id}");
        self.positions.remove(id);
        None
    }

    /// Puts a pinned item onto its pinned cell of the grid at `idx`.
    ///
    /// The item must already be cleared from every grid. Automatically placed items in the way
    /// are taken off the grid and appended to `evicted`; the caller has to re-place them.
    fn seat_pinned(
        &mut self,
        idx: usize,
        id: &ItemId,
        pos: GridPos,
        evicted: &mut Vec<ItemId>,
    ) -> Option<Seat> {
        let grid = self.screens.get_mut(idx)?;
        if !grid.is_valid() || !grid.is_in_bounds(pos) {
            return None;
        }

        // Evicting an owner can promote an item stacked on the same cell, hence the loop.
        let seat = loop {
            match grid.item_at(pos).cloned() {
                None => {
                    grid.set_grid_position(id, pos);
                    break Seat::Owned;
                }
                Some(owner) if owner == *id => break Seat::Owned,
                Some(owner) if grid.pinned(&owner) == Some(pos) => {
                    debug!("{id} and {owner} are both pinned at {pos}");
                    grid.stack(id, pos);
                    self.floating.insert(owner);
                    self.floating.insert(id.clone());
                    break Seat::Stacked;
                }
                Some(owner) => {
                    trace!("{owner} makes room for pinned {id} at {pos}");
                    grid.clear_item(&owner);
                    self.positions.remove(&owner);
                    evicted.push(owner);
                }
            }
        };

        let point = grid.pixel_position_from_grid(pos);
        self.positions.insert(id.clone(), point);
        Some(seat)
    }

    /// Remembers the item's current cell on the grid at `idx` as its only pinned position.
    fn pin_current(&mut self, idx: usize, id: &ItemId) {
        let Some(pos) = self.screens.get(idx).and_then(|grid| grid.grid_position_of(id)) else {
            return;
        };

        self.pin(idx, id, pos);
    }

    /// Sets the only pinned position of the item.
    fn pin(&mut self, idx: usize, id: &ItemId, pos: GridPos) {
        self.unpin(id);
        if let Some(grid) = self.screens.get_mut(idx) {
            grid.set_pinned(id, pos);
        }
    }

    /// Forgets every pinned position of the item, including ones of disconnected displays.
    fn unpin(&mut self, id: &ItemId) {
        self.screens.clear_pinned_everywhere(id);
        for pins in self.detached_pins.values_mut() {
            pins.remove(id);
        }
        self.detached_pins.retain(|_, pins| !pins.is_empty());
    }
}
