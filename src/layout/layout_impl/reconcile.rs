//! Re-deriving placements after structural changes.
//!
//! Every reconciliation works in two phases: first all affected items are taken off the grids,
//! then they are put back. The affected set is captured up front, so placing one item never
//! changes which items get reconciled.

use std::collections::HashSet;

use tracing::trace;

use super::super::{GridPos, ItemId, Layout};
use super::Seat;

impl Layout {
    /// Takes the items off every grid and places them again from scratch.
    ///
    /// Grids are tried in order, each from its first cell. Items that fit nowhere lose their
    /// cached position.
    pub fn relayout_items(&mut self, ids: &[ItemId]) {
        let _span = tracy_client::span!("Layout::relayout_items");

        for id in ids {
            self.screens.clear_item_everywhere(id);
        }

        for id in ids {
            if !self.items.contains(id) {
                continue;
            }

            self.place_automatically(id);
        }
    }

    /// Reconciles the grid at `idx` after its geometry, bounds or validity changed.
    ///
    /// Items pinned inside the grid's bounds go straight to their pinned cells, including ones
    /// currently living on another grid; those owning their cell stop floating. Everything else
    /// that was on the grid becomes floating and is placed again.
    pub fn on_screen_changed(&mut self, idx: usize) {
        let _span = tracy_client::span!("Layout::on_screen_changed");

        let Some(grid) = self.screens.get(idx) else {
            return;
        };

        let occupants: HashSet<ItemId> = grid
            .occupants()
            .into_iter()
            .map(|(_, id)| id.clone())
            .collect();
        let pinned: Vec<(ItemId, GridPos)> = self
            .items
            .iter()
            .filter_map(|id| {
                let pos = grid.pinned(id)?;
                (grid.is_valid() && grid.is_in_bounds(pos)).then(|| (id.clone(), pos))
            })
            .collect();

        let pinned_ids: HashSet<&ItemId> = pinned.iter().map(|(id, _)| id).collect();
        let mut relayout: Vec<ItemId> = self
            .in_presentation_order(&occupants)
            .into_iter()
            .filter(|id| !pinned_ids.contains(id))
            .collect();

        trace!(
            "screen {idx} changed: {} pinned, {} to relayout",
            pinned.len(),
            relayout.len()
        );

        for (id, _) in &pinned {
            self.screens.clear_item_everywhere(id);
        }
        for id in &relayout {
            self.screens.clear_item_everywhere(id);
            self.positions.remove(id);
        }

        let mut evicted = Vec::new();
        for (id, pos) in &pinned {
            if self.seat_pinned(idx, id, *pos, &mut evicted) == Some(Seat::Owned) {
                self.floating.remove(id);
            }
        }

        relayout.append(&mut evicted);
        self.floating.extend(relayout.iter().cloned());
        self.relayout_items(&relayout);
    }

    /// Reconciles every grid in order.
    pub fn on_all_screens_changed(&mut self) {
        for idx in 0..self.screens.len() {
            self.on_screen_changed(idx);
        }
        self.place_homeless();
    }

    /// Tries to place items that currently have no position.
    ///
    /// Such items don't sit on any grid, so reconciling a grid doesn't reach them.
    pub fn place_homeless(&mut self) {
        let homeless: Vec<ItemId> = self
            .items
            .iter()
            .filter(|id| !self.positions.contains_key(*id))
            .cloned()
            .collect();
        if homeless.is_empty() {
            return;
        }

        trace!("retrying {} items without a position", homeless.len());
        self.floating.extend(homeless.iter().cloned());
        self.relayout_items(&homeless);
    }
}
