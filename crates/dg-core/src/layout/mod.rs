//! Layout system
//!
//! Contains the partition tree, rooms, connectivity graphs, doors, walls and
//! the occupancy grid.

mod door;
mod graph;
mod grid;
mod partition;
mod prune;
mod region;
mod room;
mod wall;

pub use door::{Door, DoorLayout, Orientation, SharedWall, materialize_doors};
pub use graph::{AdjacencyGraph, DoorGraph, RoomGraph, build_adjacency, is_connected};
pub use grid::{CellKind, OccupancyGrid, edge_cell};
pub use partition::{PartitionNode, Split, partition};
pub use prune::{PruneOutcome, prune, removal_count};
pub use region::{Region, SplitAxis, span_overlap};
pub use room::{Room, RoomId, collect_rooms, sort_reading_order};
pub use wall::{WallPolicy, WallSegment, boundary_edges, synthesize_walls};
