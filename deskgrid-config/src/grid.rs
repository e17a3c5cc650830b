pub const DEFAULT_CELL_WIDTH: i32 = 100;
pub const DEFAULT_CELL_HEIGHT: i32 = 150;
pub const DEFAULT_ICON_PADDING: i32 = 5;

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    #[knuffel(child, default)]
    pub cell_size: CellSize,
    /// Distance from the cell border where clicks don't hit the icon.
    #[knuffel(child, unwrap(argument), default = DEFAULT_ICON_PADDING)]
    pub icon_padding: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: CellSize::default(),
            icon_padding: DEFAULT_ICON_PADDING,
        }
    }
}

/// Size of one grid cell in logical pixels.
///
/// Not validated here: the layout rejects non-positive sizes when the options are applied.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    #[knuffel(property, default = DEFAULT_CELL_WIDTH)]
    pub width: i32,
    #[knuffel(property, default = DEFAULT_CELL_HEIGHT)]
    pub height: i32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
        }
    }
}

/// Space reserved by panels along the display edges.
#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelMargins {
    #[knuffel(property, default)]
    pub top: i32,
    #[knuffel(property, default)]
    pub bottom: i32,
    #[knuffel(property, default)]
    pub left: i32,
    #[knuffel(property, default)]
    pub right: i32,
}
