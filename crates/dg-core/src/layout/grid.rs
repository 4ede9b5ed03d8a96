//! Cell occupancy view of a finished layout
//!
//! Walls and doors live on the lines between cells. The grid maps each unit
//! edge to the cell whose low corner starts it: a vertical edge on line
//! `x = X` covering `[y, y+1)` marks cell `(X, y)`, a horizontal edge on
//! `y = Y` covering `[x, x+1)` marks `(x, Y)`. The grid is one cell wider
//! and taller than the dungeon so the far boundary lines have cells too.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{S_DOOR, S_EMPTY, S_FLOOR, S_WALL};

use super::door::{Door, Orientation};
use super::region::Region;
use super::room::Room;
use super::wall::WallSegment;

/// What occupies a grid cell. Later variants override earlier ones.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Empty = 0,
    Floor = 1,
    Wall = 2,
    Door = 3,
}

impl CellKind {
    /// Check if this is passable (can walk through)
    pub const fn is_walkable(&self) -> bool {
        matches!(self, CellKind::Floor | CellKind::Door)
    }

    pub const fn symbol(&self) -> char {
        match self {
            CellKind::Empty => S_EMPTY,
            CellKind::Floor => S_FLOOR,
            CellKind::Wall => S_WALL,
            CellKind::Door => S_DOOR,
        }
    }
}

/// Walkability map built from rooms, walls and doors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    origin: (i32, i32),
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl OccupancyGrid {
    /// Empty grid covering `bounds` plus its far boundary lines
    pub fn new(bounds: Region) -> Self {
        let width = bounds.width.max(0) as usize + 1;
        let height = bounds.height.max(0) as usize + 1;
        Self {
            origin: (bounds.x, bounds.y),
            width,
            height,
            cells: vec![CellKind::Empty; width * height],
        }
    }

    /// Rasterize a layout. Doors override walls, walls override floor.
    pub fn build(bounds: Region, rooms: &[Room], walls: &[WallSegment], doors: &[Door]) -> Self {
        let mut grid = Self::new(bounds);
        for room in rooms {
            for y in room.y..room.top() {
                for x in room.x..room.right() {
                    grid.mark(x, y, CellKind::Floor);
                }
            }
        }
        for wall in walls {
            for pos in wall.positions() {
                let (x, y) = edge_cell(wall.orientation, wall.fixed, pos);
                grid.mark(x, y, CellKind::Wall);
            }
        }
        for door in doors {
            grid.mark(door.x, door.y, CellKind::Door);
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let dx = x.checked_sub(self.origin.0)?;
        let dy = y.checked_sub(self.origin.1)?;
        if dx < 0 || dy < 0 {
            return None;
        }
        let (dx, dy) = (dx as usize, dy as usize);
        if dx >= self.width || dy >= self.height {
            return None;
        }
        Some(dy * self.width + dx)
    }

    /// Raise a cell to `kind` unless it already holds something stronger
    fn mark(&mut self, x: i32, y: i32, kind: CellKind) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = self.cells[i].max(kind);
        }
    }

    /// Cell at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<CellKind> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|c| c.is_walkable())
    }

    /// Walkable 4-neighbors of a cell
    pub fn walkable_neighbors(&self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
            .into_iter()
            .filter(|&(nx, ny)| self.is_walkable(nx, ny))
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// All cells with their coordinates, bottom row first
    pub fn cells(&self) -> impl Iterator<Item = ((i32, i32), CellKind)> + '_ {
        self.cells.iter().enumerate().map(|(i, &kind)| {
            let x = self.origin.0 + (i % self.width) as i32;
            let y = self.origin.1 + (i / self.width) as i32;
            ((x, y), kind)
        })
    }
}

/// Cell marked by the unit edge at `pos` on line `fixed`
pub fn edge_cell(orientation: Orientation, fixed: i32, pos: i32) -> (i32, i32) {
    match orientation {
        Orientation::Vertical => (fixed, pos),
        Orientation::Horizontal => (pos, fixed),
    }
}

/// Map dump with the top row first
impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width).rev() {
            let line: String = row.iter().map(CellKind::symbol).collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
