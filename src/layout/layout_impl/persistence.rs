//! Confirming, saving and restoring pinned positions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::{GridPos, ItemId, Layout};

/// Pinned positions of all items, as stored between sessions.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLayout {
    pub entries: BTreeMap<ItemId, PersistedPosition>,
}

/// A pinned cell on the screen with the given index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPosition {
    pub screen: usize,
    pub column: i32,
    pub row: i32,
}

impl PersistedLayout {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Layout {
    /// Pins every visible, non-overlapping item at its current cell.
    ///
    /// Called once the user accepted the layout, e.g. right before saving it. Overlapping items
    /// stay floating so a later change can still separate them.
    pub fn confirm_positions(&mut self) {
        let _span = tracy_client::span!("Layout::confirm_positions");

        let counts = self.position_counts();
        let confirmed: Vec<(usize, ItemId, GridPos)> = self
            .items
            .iter()
            .filter(|id| {
                self.positions
                    .get(*id)
                    .is_some_and(|pos| counts.get(pos).copied().unwrap_or(0) < 2)
            })
            .filter_map(|id| {
                let idx = self.screen_of(id)?;
                let grid = self.screens.get(idx)?;
                let pos = grid.grid_position_of(id)?;
                (grid.is_valid() && grid.is_in_bounds(pos)).then(|| (idx, id.clone(), pos))
            })
            .collect();

        debug!("confirming {} positions", confirmed.len());
        for (idx, id, pos) in confirmed {
            self.floating.remove(&id);
            self.pin(idx, &id, pos);
        }
    }

    /// Collects the pinned positions of all screens.
    ///
    /// Pins of disconnected displays are not included.
    pub fn export_layout(&self) -> PersistedLayout {
        let mut entries = BTreeMap::new();
        for (screen, grid) in self.screens.iter().enumerate() {
            for (id, pos) in grid.pinned_positions() {
                entries.insert(
                    id.clone(),
                    PersistedPosition {
                        screen,
                        column: pos.column,
                        row: pos.row,
                    },
                );
            }
        }
        PersistedLayout { entries }
    }

    /// Pins items at previously saved positions, then moves items already present there.
    ///
    /// Entries may name items that aren't in the layout yet; they get their pinned cell when
    /// inserted. Entries for unknown screens or with negative coordinates are skipped.
    pub fn restore_layout(&mut self, layout: &PersistedLayout) {
        let _span = tracy_client::span!("Layout::restore_layout");

        for (id, entry) in &layout.entries {
            if entry.screen >= self.screens.len() {
                debug!("skipping {id}: no screen {}", entry.screen);
                continue;
            }
            if entry.column < 0 || entry.row < 0 {
                debug!("skipping {id}: bad cell ({}, {})", entry.column, entry.row);
                continue;
            }

            self.pin(entry.screen, id, GridPos::new(entry.column, entry.row));
        }

        self.on_all_screens_changed();
    }
}
