//! dg-core: Seeded room-layout generation
//!
//! Splits a rectangular area into rooms with binary space partitioning,
//! places doors between touching rooms and retries until every room is
//! reachable through doors. No I/O; the same seed gives the same layout.

pub mod config;
pub mod consts;
pub mod error;
pub mod generator;
pub mod layout;
pub mod rng;

pub use config::{GeneratorConfig, ReseedStrategy};
pub use error::{ConfigError, GenerationError};
pub use generator::{
    Attempt, AttemptRecord, Dungeon, DungeonGenerator, GenerationState, RetryController,
    generate_dungeon, run_attempt,
};
pub use layout::{
    CellKind, Door, DoorGraph, OccupancyGrid, Orientation, Region, Room, RoomGraph, RoomId,
    WallPolicy, WallSegment,
};
pub use rng::DungeonRng;
