//! Removal of the smallest rooms without breaking connectivity
//!
//! One candidate is tried: the `floor(n * percent / 100)` smallest rooms by
//! area. If the remaining rooms are still connected the candidate is
//! accepted, otherwise the input is returned untouched.

use super::graph::{AdjacencyGraph, build_adjacency};
use super::room::{Room, RoomId};

/// Result of a pruning pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Surviving rooms, still in reading order
    pub rooms: Vec<Room>,
    pub graph: AdjacencyGraph,
    /// True when the candidate removal was accepted
    pub pruned: bool,
    /// Rooms removed by an accepted candidate
    pub removed: Vec<RoomId>,
}

/// Number of rooms a pass would remove.
///
/// At least one room always survives.
pub fn removal_count(room_count: usize, percent: f64) -> usize {
    let count = (room_count as f64 * percent / 100.0).floor() as usize;
    count.min(room_count.saturating_sub(1))
}

/// Try to remove the smallest `percent` of rooms.
///
/// Ties in area keep reading order, so the choice is deterministic.
pub fn prune(rooms: Vec<Room>, graph: AdjacencyGraph, percent: f64) -> PruneOutcome {
    let count = removal_count(rooms.len(), percent);
    if count == 0 {
        return PruneOutcome {
            rooms,
            graph,
            pruned: false,
            removed: Vec::new(),
        };
    }

    let mut by_area: Vec<&Room> = rooms.iter().collect();
    by_area.sort_by_key(|room| room.area());
    let removed: Vec<RoomId> = by_area[..count].iter().map(|room| room.id).collect();

    let kept: Vec<Room> = rooms
        .iter()
        .filter(|room| !removed.contains(&room.id))
        .copied()
        .collect();
    let kept_graph = build_adjacency(&kept);

    if kept_graph.is_connected() {
        log::debug!(
            "pruned {} of {} rooms: {:?}",
            count,
            rooms.len(),
            removed
        );
        PruneOutcome {
            rooms: kept,
            graph: kept_graph,
            pruned: true,
            removed,
        }
    } else {
        log::debug!(
            "rejected pruning {} of {} rooms: remainder disconnected",
            count,
            rooms.len()
        );
        PruneOutcome {
            rooms,
            graph,
            pruned: false,
            removed: Vec::new(),
        }
    }
}
