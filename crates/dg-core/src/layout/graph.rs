//! Room connectivity graphs
//!
//! The same undirected graph type carries both the geometric adjacency of
//! rooms and the door-backed connections actually realized between them.
//! Edges are always stored in both directions.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::room::{Room, RoomId};

/// Undirected graph over room ids with deterministic iteration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomGraph {
    adjacency: BTreeMap<RoomId, BTreeSet<RoomId>>,
}

/// Rooms sharing a wall with positive overlap
pub type AdjacencyGraph = RoomGraph;

/// Rooms joined by a placed door
pub type DoorGraph = RoomGraph;

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph holding every room as an isolated node
    pub fn with_rooms(rooms: &[Room]) -> Self {
        let mut graph = Self::new();
        for room in rooms {
            graph.add_room(room.id);
        }
        graph
    }

    pub fn add_room(&mut self, id: RoomId) {
        self.adjacency.entry(id).or_default();
    }

    /// Connect two rooms in both directions. Self loops are ignored.
    pub fn connect(&mut self, a: RoomId, b: RoomId) {
        if a == b {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    pub fn contains_room(&self, id: RoomId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn are_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Neighbors of a room in ascending id order
    pub fn neighbors(&self, id: RoomId) -> impl Iterator<Item = RoomId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// Room ids in ascending order
    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn room_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Each undirected edge once, as `(smaller, larger)`
    pub fn edges(&self) -> impl Iterator<Item = (RoomId, RoomId)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&a, n)| n.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Check that every edge is present in both directions
    pub fn is_symmetric(&self) -> bool {
        self.adjacency
            .iter()
            .all(|(&a, n)| n.iter().all(|&b| self.are_connected(b, a)))
    }

    /// Check that every edge of `self` is also an edge of `other`
    pub fn is_subgraph_of(&self, other: &RoomGraph) -> bool {
        self.rooms().all(|id| other.contains_room(id))
            && self.edges().all(|(a, b)| other.are_connected(a, b))
    }

    /// Rooms reachable from `start` by breadth-first search
    pub fn reachable_from(&self, start: RoomId) -> BTreeSet<RoomId> {
        let mut visited = BTreeSet::new();
        if !self.contains_room(start) {
            return visited;
        }
        let mut queue = VecDeque::from([start]);
        visited.insert(start);
        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    /// Check if every room is reachable from the first room.
    ///
    /// An empty graph is connected.
    pub fn is_connected(&self) -> bool {
        match self.rooms().next() {
            Some(first) => self.reachable_from(first).len() == self.room_count(),
            None => true,
        }
    }
}

/// Build the adjacency graph by testing every pair of rooms.
///
/// Quadratic in the room count; layouts hold tens of rooms so no spatial
/// index is used.
pub fn build_adjacency(rooms: &[Room]) -> AdjacencyGraph {
    let mut graph = RoomGraph::with_rooms(rooms);
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if a.is_adjacent(b) {
                graph.connect(a.id, b.id);
            }
        }
    }
    debug_assert!(graph.is_symmetric(), "adjacency graph is asymmetric");
    graph
}

/// Check if every room in the graph is reachable from the first one
pub fn is_connected(graph: &RoomGraph) -> bool {
    graph.is_connected()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> RoomId {
        RoomId(n)
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut graph = RoomGraph::new();
        graph.connect(id(0), id(1));
        assert!(graph.are_connected(id(0), id(1)));
        assert!(graph.are_connected(id(1), id(0)));
        assert!(graph.is_symmetric());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut graph = RoomGraph::new();
        graph.add_room(id(3));
        graph.connect(id(3), id(3));
        assert_eq!(graph.neighbors(id(3)).count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_connectivity() {
        let mut graph = RoomGraph::new();
        for n in 0..5 {
            graph.add_room(id(n));
        }
        assert!(!graph.is_connected());

        graph.connect(id(0), id(1));
        graph.connect(id(1), id(2));
        assert_eq!(graph.reachable_from(id(0)).len(), 3);
        assert!(!graph.is_connected());

        graph.connect(id(2), id(3));
        graph.connect(id(3), id(4));
        assert!(graph.is_connected());
        assert!(is_connected(&graph));
    }

    #[test]
    fn test_empty_graph_is_connected() {
        assert!(RoomGraph::new().is_connected());
    }

    #[test]
    fn test_single_room_is_connected() {
        let graph = RoomGraph::with_rooms(&[Room::new(0, 0, 0, 10, 10)]);
        assert!(graph.is_connected());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_reachable_from_unknown_room() {
        let graph = RoomGraph::with_rooms(&[Room::new(0, 0, 0, 10, 10)]);
        assert!(graph.reachable_from(id(9)).is_empty());
    }

    #[test]
    fn test_edges_listed_once() {
        let mut graph = RoomGraph::new();
        graph.connect(id(2), id(0));
        graph.connect(id(0), id(1));
        graph.connect(id(1), id(2));
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(id(0), id(1)), (id(0), id(2)), (id(1), id(2))]);
    }

    #[test]
    fn test_subgraph() {
        let mut full = RoomGraph::new();
        full.connect(id(0), id(1));
        full.connect(id(1), id(2));
        let mut part = RoomGraph::new();
        part.connect(id(1), id(2));
        part.add_room(id(0));
        assert!(part.is_subgraph_of(&full));
        assert!(!full.is_subgraph_of(&part));
    }

    #[test]
    fn test_build_adjacency_grid() {
        // 2x2 block of rooms; diagonals only touch at a corner
        let rooms = vec![
            Room::new(0, 0, 10, 10, 10),
            Room::new(1, 10, 10, 10, 10),
            Room::new(2, 0, 0, 10, 10),
            Room::new(3, 10, 0, 10, 10),
        ];
        let graph = build_adjacency(&rooms);
        assert_eq!(graph.room_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.are_connected(id(0), id(1)));
        assert!(graph.are_connected(id(0), id(2)));
        assert!(graph.are_connected(id(1), id(3)));
        assert!(graph.are_connected(id(2), id(3)));
        assert!(!graph.are_connected(id(0), id(3)));
        assert!(!graph.are_connected(id(1), id(2)));
        assert!(graph.is_connected());
    }

    #[test]
    fn test_build_adjacency_keeps_isolated_rooms() {
        let rooms = vec![Room::new(0, 0, 0, 5, 5), Room::new(1, 20, 20, 5, 5)];
        let graph = build_adjacency(&rooms);
        assert_eq!(graph.room_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.is_connected());
    }
}
