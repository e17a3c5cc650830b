//! Read-only queries for the presentation layer.

use std::collections::HashMap;

use super::super::{GridPos, ItemId, Layout};
use crate::utils::{Point, Rectangle};

impl Layout {
    /// Global position of the item's cell, if the item is placed.
    pub fn position_of(&self, id: &ItemId) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// Area where the item's icon is drawn.
    pub fn visual_rect(&self, id: &ItemId) -> Option<Rectangle> {
        let pos = self.position_of(id)?;
        Some(Rectangle::new(pos, self.options.cell_size).shrunk(self.options.icon_padding))
    }

    /// First item, in presentation order, whose icon is under `point`.
    pub fn item_at_pixel(&self, point: Point) -> Option<&ItemId> {
        self.items.iter().find(|id| {
            self.visual_rect(id)
                .is_some_and(|rect| rect.contains(point))
        })
    }

    /// Whether another item is drawn at the same position.
    pub fn is_overlapping(&self, id: &ItemId) -> bool {
        let Some(pos) = self.positions.get(id) else {
            return false;
        };

        self.positions
            .iter()
            .any(|(other, other_pos)| other != id && other_pos == pos)
    }

    /// Number of items drawn at each occupied position.
    pub(super) fn position_counts(&self) -> HashMap<Point, usize> {
        let mut counts = HashMap::with_capacity(self.positions.len());
        for pos in self.positions.values() {
            *counts.entry(*pos).or_insert(0) += 1;
        }
        counts
    }

    /// First screen whose usable area contains the item's position.
    ///
    /// Unlike [`Layout::screen_of()`] this looks at geometry only, not at which grid holds the
    /// item.
    pub fn owner_of(&self, id: &ItemId) -> Option<usize> {
        self.screens.owner_at(self.position_of(id)?)
    }

    /// Index of the screen the item is on.
    pub fn screen_of(&self, id: &ItemId) -> Option<usize> {
        if !self.positions.contains_key(id) {
            return None;
        }

        self.screens.find_item(id)
    }

    /// Screen index and cell of the item.
    pub fn grid_position_of(&self, id: &ItemId) -> Option<(usize, GridPos)> {
        let idx = self.screen_of(id)?;
        let pos = self.screens.get(idx)?.grid_position_of(id)?;
        Some((idx, pos))
    }

    /// Screen index and cell where the item is pinned, if it is pinned on a connected display.
    pub fn pinned_position_of(&self, id: &ItemId) -> Option<(usize, GridPos)> {
        self.screens
            .iter()
            .enumerate()
            .find_map(|(idx, grid)| Some((idx, grid.pinned(id)?)))
    }

    pub fn is_floating(&self, id: &ItemId) -> bool {
        self.floating.contains(id)
    }

    /// Floating items in presentation order.
    pub fn floating_items(&self) -> Vec<ItemId> {
        self.floating_in_order()
    }

    /// Items without a position, in presentation order.
    pub fn unplaced_items(&self) -> Vec<&ItemId> {
        self.items
            .iter()
            .filter(|id| !self.positions.contains_key(*id))
            .collect()
    }
}
