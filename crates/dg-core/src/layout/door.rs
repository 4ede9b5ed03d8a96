//! Door placement between adjacent rooms
//!
//! A door sits on the line two rooms share, one cell long, never on the
//! first or last cell of the shared span. Adjacent rooms whose shared span
//! is too short get no door and no connection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::DOOR_CLEARANCE;
use crate::rng::DungeonRng;

use super::graph::{AdjacencyGraph, DoorGraph, RoomGraph};
use super::room::{Room, RoomId};

/// Direction of the wall line a door or wall segment lies on
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Orientation {
    /// On a line of constant x, running along y
    Vertical,
    /// On a line of constant y, running along x
    Horizontal,
}

/// A door joining two rooms.
///
/// A vertical door at `(x, y)` covers the unit edge from `(x, y)` to
/// `(x, y + 1)`; a horizontal one covers `(x, y)` to `(x + 1, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
    /// The joined rooms, smaller id first
    pub rooms: (RoomId, RoomId),
}

impl Door {
    /// Coordinate of the wall line the door sits on
    pub fn fixed(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.x,
            Orientation::Horizontal => self.y,
        }
    }

    /// Position of the door along its wall line
    pub fn position(&self) -> i32 {
        match self.orientation {
            Orientation::Vertical => self.y,
            Orientation::Horizontal => self.x,
        }
    }

    pub fn joins(&self, id: RoomId) -> bool {
        self.rooms.0 == id || self.rooms.1 == id
    }

}

/// The stretch of wall two touching rooms share, trimmed by the door
/// clearance at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedWall {
    pub orientation: Orientation,
    /// Coordinate of the shared line
    pub line: i32,
    /// First valid door position
    pub start: i32,
    /// One past the last valid door position
    pub end: i32,
}

impl SharedWall {
    /// Locate the wall shared by two rooms.
    ///
    /// Rooms touching along a vertical line are checked first; `None` means
    /// the rooms do not touch at all.
    pub fn between(a: &Room, b: &Room) -> Option<SharedWall> {
        if a.touches_vertically(b) {
            Some(SharedWall {
                orientation: Orientation::Vertical,
                line: if a.right() == b.x { b.x } else { a.x },
                start: a.y.max(b.y) + DOOR_CLEARANCE,
                end: a.top().min(b.top()) - DOOR_CLEARANCE,
            })
        } else if a.touches_horizontally(b) {
            Some(SharedWall {
                orientation: Orientation::Horizontal,
                line: if a.top() == b.y { b.y } else { a.y },
                start: a.x.max(b.x) + DOOR_CLEARANCE,
                end: a.right().min(b.right()) - DOOR_CLEARANCE,
            })
        } else {
            None
        }
    }

    pub fn fits_door(&self) -> bool {
        self.end > self.start
    }

    /// Pick a door position uniformly from the span
    fn place(&self, a: RoomId, b: RoomId, rng: &mut DungeonRng) -> Door {
        let pos = rng.range(self.start, self.end);
        let (x, y) = match self.orientation {
            Orientation::Vertical => (self.line, pos),
            Orientation::Horizontal => (pos, self.line),
        };
        Door {
            x,
            y,
            orientation: self.orientation,
            rooms: (a.min(b), a.max(b)),
        }
    }
}

/// Doors placed for one layout and the connections they realize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorLayout {
    pub graph: DoorGraph,
    pub doors: Vec<Door>,
}

/// Place one door on every adjacency edge that has room for it.
///
/// Pairs are visited as `i < j` over the given room order, so each edge is
/// handled once and the random draws follow a fixed sequence.
pub fn materialize_doors(
    rooms: &[Room],
    adjacency: &AdjacencyGraph,
    rng: &mut DungeonRng,
) -> DoorLayout {
    let mut graph = RoomGraph::with_rooms(rooms);
    let mut doors = Vec::new();

    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if !adjacency.are_connected(a.id, b.id) {
                continue;
            }
            let Some(wall) = SharedWall::between(a, b) else {
                continue;
            };
            if !wall.fits_door() {
                continue;
            }
            doors.push(wall.place(a.id, b.id, rng));
            graph.connect(a.id, b.id);
        }
    }

    log::debug!(
        "placed {} doors over {} adjacencies",
        doors.len(),
        adjacency.edge_count()
    );
    DoorLayout { graph, doors }
}
