//! Integer geometry in logical pixels.
//!
//! Every coordinate in the layout is a whole logical pixel in the global desktop space.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

/// Rectangle with a half-open extent: `loc` is inside, `loc + size` is not.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub loc: Point,
    pub size: Size,
}

/// Insets along the four edges of a rectangle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

impl From<(i32, i32)> for Size {
    fn from((w, h): (i32, i32)) -> Self {
        Self { w, h }
    }
}

impl Rectangle {
    pub const fn new(loc: Point, size: Size) -> Self {
        Self { loc, size }
    }

    pub fn from_loc_and_size(loc: impl Into<Point>, size: impl Into<Size>) -> Self {
        Self::new(loc.into(), size.into())
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn contains(&self, point: impl Into<Point>) -> bool {
        let p = point.into();
        self.loc.x <= p.x
            && p.x < self.loc.x.saturating_add(self.size.w)
            && self.loc.y <= p.y
            && p.y < self.loc.y.saturating_add(self.size.h)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.loc.x.saturating_add(self.size.w / 2),
            self.loc.y.saturating_add(self.size.h / 2),
        )
    }

    pub fn translated(mut self, offset: Point) -> Self {
        self.loc = self.loc + offset;
        self
    }

    /// Moves every edge inwards by `amount`. Negative amounts grow the rectangle.
    pub fn shrunk(self, amount: i32) -> Self {
        self.inset(Margins {
            top: amount,
            bottom: amount,
            left: amount,
            right: amount,
        })
    }

    /// Moves every edge inwards by the matching margin.
    ///
    /// The resulting size can be zero or negative; such a rectangle contains no points.
    pub fn inset(self, margins: Margins) -> Self {
        Self::from_loc_and_size(
            (self.loc.x + margins.left, self.loc.y + margins.top),
            (
                self.size.w - margins.left - margins.right,
                self.size.h - margins.top - margins.bottom,
            ),
        )
    }
}

/// Parses rectangles written as `WxH+X+Y`, the form used by X11 geometry strings.
impl std::str::FromStr for Rectangle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, loc) = match s.split_once('+') {
            Some((size, loc)) => (size, Some(loc)),
            None => (s, None),
        };

        let (w, h) = size
            .split_once('x')
            .ok_or_else(|| format!("expected WxH, got {size:?}"))?;
        let w: i32 = w.parse().map_err(|err| format!("invalid width {w:?}: {err}"))?;
        let h: i32 = h.parse().map_err(|err| format!("invalid height {h:?}: {err}"))?;

        let (x, y) = match loc {
            Some(loc) => {
                let (x, y) = loc
                    .split_once('+')
                    .ok_or_else(|| format!("expected X+Y, got {loc:?}"))?;
                let x: i32 = x.parse().map_err(|err| format!("invalid x {x:?}: {err}"))?;
                let y: i32 = y.parse().map_err(|err| format!("invalid y {y:?}: {err}"))?;
                (x, y)
            }
            None => (0, 0),
        };

        Ok(Self::from_loc_and_size((x, y), (w, h)))
    }
}
