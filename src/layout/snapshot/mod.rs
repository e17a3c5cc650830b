//! Serializable snapshots of the layout state.
//!
//! Used by the command-line tool to print the layout and by tests to compare it.

mod types;

pub use types::{ItemSnapshot, LayoutSnapshot, RectSnapshot, ScreenSnapshot, SizeSnapshot};

use crate::layout::Layout;

impl Layout {
    pub fn snapshot(&self) -> LayoutSnapshot {
        let cell = self.options().cell_size;

        let screens = self
            .screens()
            .iter()
            .map(|grid| {
                let items = grid
                    .occupants()
                    .into_iter()
                    .map(|(pos, id)| {
                        let point = grid.pixel_position_from_grid(pos);
                        ItemSnapshot {
                            id: id.clone(),
                            column: pos.column,
                            row: pos.row,
                            x: point.x,
                            y: point.y,
                            pinned: grid.pinned(id) == Some(pos),
                            floating: self.is_floating(id),
                            overlapping: self.is_overlapping(id),
                        }
                    })
                    .collect();

                ScreenSnapshot {
                    display: grid.display_id().clone(),
                    geometry: grid.geometry().into(),
                    columns: grid.max_column() + 1,
                    rows: grid.max_row() + 1,
                    items,
                }
            })
            .collect();

        LayoutSnapshot {
            cell: SizeSnapshot {
                w: cell.w,
                h: cell.h,
            },
            screens,
            unplaced: self.unplaced_items().into_iter().cloned().collect(),
        }
    }
}
