//! Display hotplug, geometry changes, and option updates.

use std::collections::HashSet;
use std::rc::Rc;

use deskgrid_config::Config;
use tracing::{debug, trace};

use super::super::{
    Display, DisplayEvent, DisplayId, Grid, ItemId, Layout, LayoutError, Options,
};
use crate::utils::{Margins, Rectangle, Size};

impl Layout {
    pub fn handle_display_event(&mut self, event: DisplayEvent) -> Result<(), LayoutError> {
        match event {
            DisplayEvent::Added(display) => self.add_display(display).map(|_| ()),
            DisplayEvent::GeometryChanged { id, geometry } => {
                self.update_display_geometry(&id, geometry)
            }
            DisplayEvent::Destroyed(id) => self.remove_display(&id),
        }
    }

    /// Adds a grid for a newly connected display and returns its index.
    ///
    /// Pinned positions the display had when it was last connected are restored.
    pub fn add_display(&mut self, display: Display) -> Result<usize, LayoutError> {
        let _span = tracy_client::span!("Layout::add_display");

        if self.screens.index_of_display(&display.id).is_some() {
            return Err(LayoutError::DuplicateDisplay(display.id));
        }

        let idx = self.attach_display(display);
        self.on_screen_changed(idx);
        self.place_homeless();
        Ok(idx)
    }

    pub fn remove_display(&mut self, id: &DisplayId) -> Result<(), LayoutError> {
        let idx = self
            .screens
            .index_of_display(id)
            .ok_or_else(|| LayoutError::UnknownDisplay(id.clone()))?;
        self.remove_screen(idx)
    }

    /// Removes the grid at `idx`; its items float and move to the remaining grids.
    pub fn remove_screen(&mut self, idx: usize) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("Layout::remove_screen");

        let len = self.screens.len();
        if idx >= len {
            return Err(LayoutError::ScreenIndexOutOfRange { idx, len });
        }

        let orphans = self.detach_screen(idx);
        self.floating.extend(orphans.iter().cloned());
        self.relayout_items(&orphans);
        self.place_homeless();
        Ok(())
    }

    /// Applies a new display rectangle.
    ///
    /// Empty rectangles are ignored.
    pub fn update_display_geometry(
        &mut self,
        id: &DisplayId,
        geometry: Rectangle,
    ) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("Layout::update_display_geometry");

        let idx = self
            .screens
            .index_of_display(id)
            .ok_or_else(|| LayoutError::UnknownDisplay(id.clone()))?;
        let Some(grid) = self.screens.get_mut(idx) else {
            return Ok(());
        };

        if grid.display_geometry() == geometry {
            return Ok(());
        }
        if !grid.update_geometry(geometry) {
            debug!("ignoring empty geometry for display {id}");
            return Ok(());
        }

        self.on_screen_changed(idx);
        self.place_homeless();
        Ok(())
    }

    /// Brings the grids in line with a full enumeration of the live displays.
    ///
    /// Grids of missing displays are removed, new displays get a grid, and the grid order
    /// follows `displays`.
    pub fn rebuild_displays(&mut self, displays: Vec<Display>) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("Layout::rebuild_displays");

        let mut seen = HashSet::new();
        for display in &displays {
            if !seen.insert(&display.id) {
                return Err(LayoutError::DuplicateDisplay(display.id.clone()));
            }
        }

        let order: Vec<DisplayId> = displays.iter().map(|d| d.id.clone()).collect();

        let gone: Vec<DisplayId> = self
            .screens
            .iter()
            .map(|grid| grid.display_id())
            .filter(|id| !order.contains(*id))
            .cloned()
            .collect();
        for id in gone {
            if let Some(idx) = self.screens.index_of_display(&id) {
                let orphans = self.detach_screen(idx);
                self.floating.extend(orphans);
            }
        }

        for display in displays {
            match self.screens.index_of_display(&display.id) {
                Some(idx) => {
                    if let Some(grid) = self.screens.get_mut(idx) {
                        grid.update_geometry(display.geometry);
                    }
                }
                None => {
                    self.attach_display(display);
                }
            }
        }

        self.screens.sort_by_display_order(&order);
        self.on_all_screens_changed();
        Ok(())
    }

    /// Swaps the contents of two screens.
    ///
    /// Items keep their cells but move to the other display; the display order stays.
    pub fn swap_screens(&mut self, a: usize, b: usize) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("Layout::swap_screens");

        self.screens.swap_screens(a, b)?;
        if a == b {
            return Ok(());
        }

        self.on_screen_changed(a);
        self.on_screen_changed(b);
        self.place_homeless();
        Ok(())
    }

    pub fn update_config(&mut self, config: &Config) -> Result<(), LayoutError> {
        self.update_options(Options::from_config(config))
    }

    pub fn update_options(&mut self, options: Options) -> Result<(), LayoutError> {
        let _span = tracy_client::span!("Layout::update_options");

        options.validate()?;
        if *self.options == options {
            return Ok(());
        }

        let needs_relayout = self.options.cell_size != options.cell_size
            || self.options.panel_margins != options.panel_margins;

        self.options = Rc::new(options);
        self.screens.update_options_for_all(&self.options);

        if needs_relayout {
            self.on_all_screens_changed();
        }
        Ok(())
    }

    pub fn set_cell_size(&mut self, cell_size: Size) -> Result<(), LayoutError> {
        let mut options = *self.options;
        options.cell_size = cell_size;
        self.update_options(options)
    }

    pub fn set_icon_padding(&mut self, icon_padding: i32) -> Result<(), LayoutError> {
        let mut options = *self.options;
        options.icon_padding = icon_padding;
        self.update_options(options)
    }

    pub fn set_panel_margins(&mut self, margins: Margins) -> Result<(), LayoutError> {
        let mut options = *self.options;
        options.panel_margins = margins;
        self.update_options(options)
    }

    /// Appends a grid for the display and restores its detached pins.
    fn attach_display(&mut self, display: Display) -> usize {
        let id = display.id.clone();
        let mut grid = Grid::new(display, self.options.clone());

        if let Some(mut pins) = self.detached_pins.remove(&id) {
            pins.retain(|item, _| !self.screens.is_pinned_anywhere(item));
            trace!("restoring {} pinned positions on {id}", pins.len());
            grid.merge_pinned(pins);
        }

        self.screens.add_screen(grid)
    }

    /// Removes the grid at `idx`, stashing its pins under the display name.
    ///
    /// Returns the items that were on it, in presentation order. They are off every grid and
    /// have no cached position.
    fn detach_screen(&mut self, idx: usize) -> Vec<ItemId> {
        let Some(mut grid) = self.screens.remove_screen(idx) else {
            return Vec::new();
        };
        grid.unbind();

        let pins = grid.take_pinned();
        if !pins.is_empty() {
            trace!("stashing {} pinned positions of {}", pins.len(), grid.display_id());
            self.detached_pins
                .entry(grid.display_id().clone())
                .or_default()
                .extend(pins);
        }

        let occupants: HashSet<ItemId> = grid
            .occupants()
            .into_iter()
            .map(|(_, id)| id.clone())
            .collect();
        let orphans = self.in_presentation_order(&occupants);
        for id in &orphans {
            self.positions.remove(id);
        }

        debug!(
            "removed screen {} with {} items",
            grid.display_id(),
            orphans.len()
        );
        orphans
    }
}
