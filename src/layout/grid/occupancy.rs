//! Two-way index between cells and the items occupying them.

use std::collections::HashMap;

use crate::layout::types::{GridPos, ItemId};

/// Which item owns which cell, and which cell each item owns.
///
/// Both directions are updated together, so an item owns at most one cell and a cell has at most
/// one owner.
#[derive(Debug, Default, Clone)]
pub struct CellIndex {
    by_cell: HashMap<GridPos, ItemId>,
    by_item: HashMap<ItemId, GridPos>,
}

impl CellIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }

    pub fn get(&self, pos: GridPos) -> Option<&ItemId> {
        self.by_cell.get(&pos)
    }

    pub fn position_of(&self, id: &ItemId) -> Option<GridPos> {
        self.by_item.get(id).copied()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.by_item.contains_key(id)
    }

    pub fn is_free(&self, pos: GridPos) -> bool {
        !self.by_cell.contains_key(&pos)
    }

    /// Makes `id` the owner of `pos`, moving it out of its previous cell.
    ///
    /// Returns `false` without changes if another item owns `pos`.
    pub fn insert(&mut self, id: ItemId, pos: GridPos) -> bool {
        match self.by_cell.get(&pos) {
            Some(owner) if *owner == id => return true,
            Some(_) => return false,
            None => (),
        }

        if let Some(old) = self.by_item.insert(id.clone(), pos) {
            self.by_cell.remove(&old);
        }
        self.by_cell.insert(pos, id);
        true
    }

    pub fn remove(&mut self, id: &ItemId) -> Option<GridPos> {
        let pos = self.by_item.remove(id)?;
        self.by_cell.remove(&pos);
        Some(pos)
    }

    /// Owned cells in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &ItemId)> + '_ {
        let mut cells: Vec<_> = self.by_cell.iter().map(|(pos, id)| (*pos, id)).collect();
        cells.sort_unstable_by_key(|(pos, _)| *pos);
        cells.into_iter()
    }

    #[cfg(test)]
    pub fn verify_invariants(&self) {
        assert_eq!(self.by_cell.len(), self.by_item.len());
        for (id, pos) in &self.by_item {
            assert_eq!(
                self.by_cell.get(pos),
                Some(id),
                "cell index must agree in both directions"
            );
        }
    }
}
