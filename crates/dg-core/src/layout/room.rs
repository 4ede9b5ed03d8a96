//! Rooms derived from partition leaves
//!
//! Rooms are kept in reading order: highest top edge first, then left to
//! right. Ids follow that order, so the smallest id is the first room.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::partition::PartitionNode;
use super::region::{Region, span_overlap};

/// Stable room identity used by every graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rectangle representing a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// X coordinate of the left edge
    pub x: i32,
    /// Y coordinate of the bottom edge
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    /// Create a new room
    pub fn new(id: u32, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: RoomId(id),
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_region(id: RoomId, region: Region) -> Self {
        Self {
            id,
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
        }
    }

    pub fn region(&self) -> Region {
        Region::new(self.x, self.y, self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        self.region().area()
    }

    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        self.region().contains_cell(x, y)
    }

    /// Check if the rooms touch along a vertical line (one's right edge is
    /// the other's left edge), regardless of span overlap
    pub fn touches_vertically(&self, other: &Room) -> bool {
        self.right() == other.x || other.right() == self.x
    }

    /// Check if the rooms touch along a horizontal line
    pub fn touches_horizontally(&self, other: &Room) -> bool {
        self.top() == other.y || other.top() == self.y
    }

    /// Check if the rooms share a wall of positive length
    pub fn is_adjacent(&self, other: &Room) -> bool {
        (self.touches_vertically(other)
            && span_overlap(self.y, self.top(), other.y, other.top()) > 0)
            || (self.touches_horizontally(other)
                && span_overlap(self.x, self.right(), other.x, other.right()) > 0)
    }

    /// Canonical ordering: descending top edge, then ascending x
    pub fn reading_order(&self, other: &Room) -> Ordering {
        other
            .top()
            .cmp(&self.top())
            .then_with(|| self.x.cmp(&other.x))
    }
}

/// Sort rooms into reading order
pub fn sort_reading_order(rooms: &mut [Room]) {
    rooms.sort_by(Room::reading_order);
}

/// Turn every leaf of the tree into a room.
///
/// Rooms come back in reading order with ids `0..n` assigned in that order.
pub fn collect_rooms(tree: &PartitionNode) -> Vec<Room> {
    let mut rooms: Vec<Room> = tree
        .leaves()
        .into_iter()
        .map(|region| Room::from_region(RoomId(0), region))
        .collect();
    sort_reading_order(&mut rooms);
    for (i, room) in rooms.iter_mut().enumerate() {
        room.id = RoomId(i as u32);
    }
    rooms
}
