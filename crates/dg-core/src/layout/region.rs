//! Grid-aligned rectangles
//!
//! A region covers the half-open cell ranges `x..x+width` and `y..y+height`.
//! Its boundary lines sit at `x`, `x+width`, `y` and `y+height`.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Axis a region is cut along
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SplitAxis {
    /// Cut by a horizontal line; children are stacked along y
    Horizontal,
    /// Cut by a vertical line; children sit side by side along x
    Vertical,
}

impl SplitAxis {
    /// Length of the region along the dimension this axis cuts
    pub fn extent(self, region: &Region) -> i32 {
        match self {
            SplitAxis::Horizontal => region.height,
            SplitAxis::Vertical => region.width,
        }
    }
}

/// An integer rectangle on the dungeon grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    /// Left x coordinate
    pub x: i32,
    /// Bottom y coordinate
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Create a new region
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive top edge
    pub const fn top(&self) -> i32 {
        self.y + self.height
    }

    pub const fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Check if the region has positive area
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Check if this region contains another
    pub fn contains(&self, other: &Region) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Check if the cell `(x, y)` lies inside the region
    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.top()
    }

    /// Check if the two regions share a positive area
    pub fn intersects(&self, other: &Region) -> bool {
        span_overlap(self.x, self.right(), other.x, other.right()) > 0
            && span_overlap(self.y, self.top(), other.y, other.top()) > 0
    }

    /// Axis and offset range of the cut this region takes.
    ///
    /// A horizontal cut is preferred when the height allows it, otherwise a
    /// vertical cut when the width does. Offsets fall in
    /// `[min_size, extent - min_size)`; `None` when that range is empty.
    /// There is no fallback to the other axis.
    pub fn cut_range(&self, min_size: i32) -> Option<(SplitAxis, Range<i32>)> {
        let fits = |extent: i32| min_size.checked_mul(2).is_some_and(|twice| extent >= twice);
        let axis = if fits(self.height) {
            SplitAxis::Horizontal
        } else if fits(self.width) {
            SplitAxis::Vertical
        } else {
            return None;
        };

        let upper = axis.extent(self) - min_size;
        if upper <= min_size {
            return None;
        }
        Some((axis, min_size..upper))
    }

    /// Cut the region `offset` cells from its origin along `axis`.
    ///
    /// The first child keeps the origin; together the children tile `self`.
    pub fn split(&self, axis: SplitAxis, offset: i32) -> (Region, Region) {
        match axis {
            SplitAxis::Horizontal => (
                Region::new(self.x, self.y, self.width, offset),
                Region::new(self.x, self.y + offset, self.width, self.height - offset),
            ),
            SplitAxis::Vertical => (
                Region::new(self.x, self.y, offset, self.height),
                Region::new(self.x + offset, self.y, self.width - offset, self.height),
            ),
        }
    }

    /// Check that `a` and `b` exactly tile this region
    pub fn is_tiled_by(&self, a: &Region, b: &Region) -> bool {
        a.is_valid()
            && b.is_valid()
            && self.contains(a)
            && self.contains(b)
            && !a.intersects(b)
            && a.area() + b.area() == self.area()
    }
}

/// Length of the overlap of the half-open spans `a0..a1` and `b0..b1`.
///
/// Negative or zero when the spans do not overlap.
pub fn span_overlap(a0: i32, a1: i32, b0: i32, b1: i32) -> i32 {
    a1.min(b1) - a0.max(b0)
}
