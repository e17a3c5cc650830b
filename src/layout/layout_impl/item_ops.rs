//! Adding, removing and moving items.

use tracing::{debug, warn};

use super::super::{ItemId, Layout};
use super::Seat;
use crate::utils::{Point, Rectangle};

impl Layout {
    /// Adds a new item at the end of the presentation order and places it.
    ///
    /// An item with a remembered in-bounds position (for example from
    /// [`Layout::restore_layout()`]) goes there. Other items float and take the first free cell.
    pub fn insert_item(&mut self, id: ItemId) {
        let _span = tracy_client::span!("Layout::insert_item");

        if self.items.contains(&id) {
            warn!("item {id} is already in the layout");
            return;
        }
        self.items.push(id.clone());

        if let Some((idx, pos)) = self.screens.pinned_home(&id) {
            let mut evicted = Vec::new();
            if let Some(seat) = self.seat_pinned(idx, &id, pos, &mut evicted) {
                if seat == Seat::Owned {
                    self.floating.remove(&id);
                }

                self.floating.extend(evicted.iter().cloned());
                self.relayout_items(&evicted);
                return;
            }
        }

        self.floating.insert(id.clone());
        self.place_automatically(&id);
    }

    /// Replaces the whole item list, e.g. after the item source reloaded.
    ///
    /// Items missing from `ids` are removed, new ones are inserted in order, and the
    /// presentation order follows `ids`.
    pub fn reset_items(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        let _span = tracy_client::span!("Layout::reset_items");

        let mut new_items: Vec<ItemId> = Vec::new();
        for id in ids {
            if !new_items.contains(&id) {
                new_items.push(id);
            }
        }

        let gone: Vec<ItemId> = self
            .items
            .iter()
            .filter(|id| !new_items.contains(id))
            .cloned()
            .collect();
        for id in &gone {
            self.forget_item(id);
        }

        let added: Vec<ItemId> = new_items
            .iter()
            .filter(|id| !self.items.contains(id))
            .cloned()
            .collect();
        for id in added {
            self.insert_item(id);
        }

        self.items = new_items;

        if !gone.is_empty() {
            let floating = self.movable_floating();
            self.relayout_items(&floating);
        }
    }

    /// Removes an item, then re-flows the floating items to fill the gap.
    ///
    /// Returns `false` if the item was unknown.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let _span = tracy_client::span!("Layout::remove_item");

        if !self.forget_item(id) {
            debug!("removing unknown item {id}");
            return false;
        }

        let floating = self.movable_floating();
        self.relayout_items(&floating);
        true
    }

    fn forget_item(&mut self, id: &ItemId) -> bool {
        let Some(idx) = self.items.iter().position(|x| x == id) else {
            return false;
        };

        self.items.remove(idx);
        self.floating.remove(id);
        self.positions.remove(id);
        self.screens.clear_item_everywhere(id);
        self.unpin(id);
        true
    }

    /// Moves an item to the cell under `point`, as after dropping it there.
    ///
    /// On success the new cell becomes the item's pinned position. If no grid can take the item
    /// there, it floats and is placed automatically; a pinned position it had is kept, so the
    /// next screen change can bring it back there. Returns whether the item landed under `point`.
    pub fn move_item(&mut self, id: &ItemId, point: Point) -> bool {
        let _span = tracy_client::span!("Layout::move_item");

        if !self.items.contains(id) {
            warn!("moving unknown item {id}");
            return false;
        }

        // Vacate first so the item's own cell doesn't block the drop.
        self.screens.clear_item_everywhere(id);
        self.positions.remove(id);

        let placed = self.drop_at(id, Some(point));
        if !placed {
            self.relayout_items(std::slice::from_ref(id));
        }
        placed
    }

    /// Moves several items by the same offset, as after dragging a selection.
    ///
    /// Each item targets the cell under the center of its current cell translated by `offset`.
    /// Items are handled in order, so an item whose target was taken by an earlier one doesn't
    /// displace it; it floats and is placed automatically instead. Returns the items that landed
    /// on their targets.
    pub fn move_items(&mut self, ids: &[ItemId], offset: Point) -> Vec<ItemId> {
        let _span = tracy_client::span!("Layout::move_items");

        let cell_size = self.options.cell_size;
        let targets: Vec<(ItemId, Option<Point>)> = ids
            .iter()
            .filter(|id| self.items.contains(id))
            .map(|id| {
                let target = self.positions.get(id).map(|pos| {
                    Rectangle::new(*pos, cell_size)
                        .translated(offset)
                        .center()
                });
                (id.clone(), target)
            })
            .collect();

        for (id, _) in &targets {
            self.screens.clear_item_everywhere(id);
            self.positions.remove(id);
        }

        let mut moved = Vec::new();
        let mut failed = Vec::new();
        for (id, target) in targets {
            if self.drop_at(&id, target) {
                moved.push(id);
            } else {
                failed.push(id);
            }
        }

        self.relayout_items(&failed);
        moved
    }

    /// Places an already vacated item under `point` and pins it there.
    ///
    /// On failure the item is marked floating, but not placed. Its pinned position stays.
    fn drop_at(&mut self, id: &ItemId, point: Option<Point>) -> bool {
        let placed = point.and_then(|point| {
            let idx = self.screens.try_place_on_any(id, point)?;
            Some((idx, point))
        });

        match placed {
            Some((idx, point)) => {
                self.pin_current(idx, id);
                self.floating.remove(id);
                if let Some(pos) = self.screens.get(idx).and_then(|g| g.pixel_position_of(id)) {
                    self.positions.insert(id.clone(), pos);
                }
                debug!("dropped {id} at {point:?} on screen {idx}");
                true
            }
            None => {
                debug!("can't drop {id} at {point:?}");
                self.floating.insert(id.clone());
                false
            }
        }
    }
}
