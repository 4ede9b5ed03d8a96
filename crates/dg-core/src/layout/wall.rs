//! Wall geometry derived from room boundaries
//!
//! Every room contributes the unit edges of its four sides. Door edges are
//! removed, edges shared by two rooms are kept once (or dropped entirely
//! under [`WallPolicy::OpenSharedEdges`]), and what remains is merged into
//! maximal straight runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::door::{Door, Orientation};
use super::room::Room;

/// How edges shared by two touching rooms are treated
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum WallPolicy {
    /// Shared edges are walls; only doors open them
    #[default]
    DoorsOnly,
    /// Shared edges are openings; only outer edges are walls
    OpenSharedEdges,
}

/// A maximal straight run of wall.
///
/// Covers positions `start..end` along the line at `fixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallSegment {
    pub start: i32,
    pub end: i32,
    /// x for vertical segments, y for horizontal ones
    pub fixed: i32,
    pub orientation: Orientation,
    pub length: i32,
}

impl WallSegment {
    pub fn new(orientation: Orientation, fixed: i32, start: i32, end: i32) -> Self {
        Self {
            start,
            end,
            fixed,
            orientation,
            length: end - start,
        }
    }

    /// Check if the segment covers the unit edge at `pos` on line `fixed`
    pub fn covers(&self, orientation: Orientation, fixed: i32, pos: i32) -> bool {
        self.orientation == orientation
            && self.fixed == fixed
            && pos >= self.start
            && pos < self.end
    }

    /// Unit edge positions along the segment
    pub fn positions(&self) -> std::ops::Range<i32> {
        self.start..self.end
    }
}

/// Unit edge key: orientation, line coordinate, position along the line
pub type EdgeKey = (Orientation, i32, i32);

/// Unit edges on the boundary of a room
pub fn boundary_edges(room: &Room) -> impl Iterator<Item = EdgeKey> + '_ {
    let horizontal = (room.x..room.right()).flat_map(move |x| {
        [
            (Orientation::Horizontal, room.y, x),
            (Orientation::Horizontal, room.top(), x),
        ]
    });
    let vertical = (room.y..room.top()).flat_map(move |y| {
        [
            (Orientation::Vertical, room.x, y),
            (Orientation::Vertical, room.right(), y),
        ]
    });
    horizontal.chain(vertical)
}

/// Derive merged wall segments for a set of rooms.
///
/// Segments come back sorted by orientation (vertical first), then line,
/// then start.
pub fn synthesize_walls(rooms: &[Room], doors: &[Door], policy: WallPolicy) -> Vec<WallSegment> {
    // Number of rooms whose boundary includes each edge
    let mut edges: BTreeMap<EdgeKey, u32> = BTreeMap::new();
    for room in rooms {
        for key in boundary_edges(room) {
            *edges.entry(key).or_default() += 1;
        }
    }

    for door in doors {
        edges.remove(&(door.orientation, door.fixed(), door.position()));
    }

    if policy == WallPolicy::OpenSharedEdges {
        edges.retain(|_, shared_by| *shared_by == 1);
    }

    let mut segments: Vec<WallSegment> = Vec::new();
    for &(orientation, fixed, pos) in edges.keys() {
        match segments.last_mut() {
            Some(last)
                if last.orientation == orientation && last.fixed == fixed && last.end == pos =>
            {
                last.end += 1;
                last.length += 1;
            }
            _ => segments.push(WallSegment::new(orientation, fixed, pos, pos + 1)),
        }
    }

    log::debug!(
        "synthesized {} wall segments for {} rooms ({})",
        segments.len(),
        rooms.len(),
        policy
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::room::RoomId;

    fn door(x: i32, y: i32, orientation: Orientation) -> Door {
        Door {
            x,
            y,
            orientation,
            rooms: (RoomId(0), RoomId(1)),
        }
    }

    #[test]
    fn test_single_room_has_four_walls() {
        let rooms = vec![Room::new(0, 0, 0, 10, 6)];
        let walls = synthesize_walls(&rooms, &[], WallPolicy::DoorsOnly);
        assert_eq!(
            walls,
            vec![
                WallSegment::new(Orientation::Vertical, 0, 0, 6),
                WallSegment::new(Orientation::Vertical, 10, 0, 6),
                WallSegment::new(Orientation::Horizontal, 0, 0, 10),
                WallSegment::new(Orientation::Horizontal, 6, 0, 10),
            ]
        );
    }

    #[test]
    fn test_shared_wall_split_by_door() {
        let rooms = vec![Room::new(0, 0, 0, 10, 10), Room::new(1, 10, 0, 10, 10)];
        let doors = vec![door(10, 4, Orientation::Vertical)];
        let walls = synthesize_walls(&rooms, &doors, WallPolicy::DoorsOnly);

        let shared: Vec<_> = walls
            .iter()
            .filter(|w| w.orientation == Orientation::Vertical && w.fixed == 10)
            .copied()
            .collect();
        assert_eq!(
            shared,
            vec![
                WallSegment::new(Orientation::Vertical, 10, 0, 4),
                WallSegment::new(Orientation::Vertical, 10, 5, 10),
            ]
        );

        // Floor and ceiling lines of both rooms merge into single runs
        assert!(walls.contains(&WallSegment::new(Orientation::Horizontal, 0, 0, 20)));
        assert!(walls.contains(&WallSegment::new(Orientation::Horizontal, 10, 0, 20)));
        assert_eq!(walls.len(), 6);
    }

    #[test]
    fn test_horizontal_door_gap() {
        let rooms = vec![Room::new(0, 0, 10, 8, 8), Room::new(1, 0, 0, 8, 10)];
        let doors = vec![door(3, 10, Orientation::Horizontal)];
        let walls = synthesize_walls(&rooms, &doors, WallPolicy::DoorsOnly);
        assert!(walls.contains(&WallSegment::new(Orientation::Horizontal, 10, 0, 3)));
        assert!(walls.contains(&WallSegment::new(Orientation::Horizontal, 10, 4, 8)));
        assert!(!walls.iter().any(|w| w.covers(Orientation::Horizontal, 10, 3)));
    }

    #[test]
    fn test_open_shared_edges_removes_seams() {
        let rooms = vec![Room::new(0, 0, 0, 10, 10), Room::new(1, 10, 0, 10, 10)];
        let walls = synthesize_walls(&rooms, &[], WallPolicy::OpenSharedEdges);
        assert!(!walls.iter().any(|w| w.orientation == Orientation::Vertical && w.fixed == 10));
        assert_eq!(walls.len(), 4);
    }

    #[test]
    fn test_shared_edges_emitted_once() {
        let rooms = vec![Room::new(0, 0, 0, 10, 10), Room::new(1, 10, 0, 10, 10)];
        let walls = synthesize_walls(&rooms, &[], WallPolicy::DoorsOnly);
        for y in 0..10 {
            let count = walls
                .iter()
                .filter(|w| w.covers(Orientation::Vertical, 10, y))
                .count();
            assert_eq!(count, 1, "edge at y={} covered {} times", y, count);
        }
    }

    #[test]
    fn test_segment_lengths_match_span() {
        let rooms = vec![
            Room::new(0, 0, 10, 7, 9),
            Room::new(1, 7, 10, 13, 9),
            Room::new(2, 0, 0, 20, 10),
        ];
        let walls = synthesize_walls(&rooms, &[], WallPolicy::DoorsOnly);
        for wall in &walls {
            assert_eq!(wall.length, wall.end - wall.start);
            assert!(wall.length > 0);
        }
        // Line y=10 is shared by all three rooms and stays one run
        assert!(walls.contains(&WallSegment::new(Orientation::Horizontal, 10, 0, 20)));
    }
}
