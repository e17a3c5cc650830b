//! Remembered item positions.
//!
//! A pinned position is where the user (or a confirmed automatic placement) put the item. It
//! survives re-layouts: an item that had to move away because the grid shrank returns to its
//! pinned cell once the cell is back in bounds.

use std::collections::HashMap;

use crate::layout::grid::Grid;
use crate::layout::types::{GridPos, ItemId};

impl Grid {
    pub fn set_pinned(&mut self, id: &ItemId, pos: GridPos) {
        self.pinned.insert(id.clone(), pos);
    }

    pub fn pinned(&self, id: &ItemId) -> Option<GridPos> {
        self.pinned.get(id).copied()
    }

    pub fn clear_pinned(&mut self, id: &ItemId) -> Option<GridPos> {
        self.pinned.remove(id)
    }

    pub fn has_pinned(&self, id: &ItemId) -> bool {
        self.pinned.contains_key(id)
    }

    /// All pinned positions, sorted by cell and then by item.
    pub fn pinned_positions(&self) -> Vec<(&ItemId, GridPos)> {
        let mut pinned: Vec<_> = self.pinned.iter().map(|(id, pos)| (id, *pos)).collect();
        pinned.sort_unstable_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));
        pinned
    }

    /// Items pinned inside the current bounds; nothing if the grid is unbound.
    pub fn pinned_in_bounds(&self) -> Vec<&ItemId> {
        if !self.is_bound {
            return Vec::new();
        }

        self.pinned_positions()
            .into_iter()
            .filter(|(_, pos)| self.is_in_bounds(*pos))
            .map(|(id, _)| id)
            .collect()
    }

    /// Items pinned outside the current bounds; every pinned item if the grid is unbound.
    pub fn pinned_out_of_bounds(&self) -> Vec<&ItemId> {
        self.pinned_positions()
            .into_iter()
            .filter(|(_, pos)| !self.is_bound || !self.is_in_bounds(*pos))
            .map(|(id, _)| id)
            .collect()
    }

    /// Removes and returns the whole pinned table.
    pub fn take_pinned(&mut self) -> HashMap<ItemId, GridPos> {
        std::mem::take(&mut self.pinned)
    }

    /// Adds remembered positions without overriding ones the grid already has.
    pub fn merge_pinned(&mut self, pinned: HashMap<ItemId, GridPos>) {
        for (id, pos) in pinned {
            self.pinned.entry(id).or_insert(pos);
        }
    }
}
