//! Generator defaults and map symbols

/// Default dungeon extent
pub const DEFAULT_WIDTH: i32 = 50;
pub const DEFAULT_HEIGHT: i32 = 50;

/// Default minimum leaf dimension
pub const DEFAULT_ROOM_MIN_SIZE: i32 = 6;

/// Attempts on one RNG stream before reseeding
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Reseeds allowed before generation gives up
pub const DEFAULT_MAX_RESEEDS: u32 = 16;

/// Cells kept clear between a door and the end of its shared wall
pub const DOOR_CLEARANCE: i32 = 1;

/// Map symbols for the occupancy grid dump
pub const S_EMPTY: char = ' ';
pub const S_FLOOR: char = '.';
pub const S_WALL: char = '#';
pub const S_DOOR: char = '+';
