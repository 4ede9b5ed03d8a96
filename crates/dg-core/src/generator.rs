//! Dungeon generation
//!
//! One attempt runs the whole pipeline: partition, rooms, adjacency,
//! pruning and doors. The [`RetryController`] repeats attempts on the same
//! random stream until the door graph is connected, reseeding when the
//! attempts on a stream run out.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::config::{GeneratorConfig, ReseedStrategy};
use crate::error::{ConfigError, GenerationError};
use crate::layout::{
    AdjacencyGraph, Door, DoorGraph, OccupancyGrid, Region, Room, RoomId, WallSegment,
    build_adjacency, collect_rooms, materialize_doors, partition, prune, synthesize_walls,
};
use crate::rng::{DungeonRng, entropy_seed};

/// Where the retry loop currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum GenerationState {
    /// Next step runs an attempt
    Generating,
    /// Next step checks the attempt's door graph
    Verifying,
    /// Next step advances the attempt counter, reseeding if needed
    Retrying,
    Accepted,
    Failed,
}

impl GenerationState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, GenerationState::Accepted | GenerationState::Failed)
    }
}

/// Summary of one attempt, kept so a run can be inspected or replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Seed of the stream the attempt drew from
    pub seed: u64,
    /// Attempt number on that stream, starting at 1
    pub attempt: u32,
    pub leaves: usize,
    pub rooms: usize,
    pub adjacency_edges: usize,
    pub pruned: bool,
    pub doors: usize,
    pub connected: bool,
}

/// Everything one pass of the pipeline produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub leaf_count: usize,
    pub rooms: Vec<Room>,
    pub adjacency: AdjacencyGraph,
    pub door_graph: DoorGraph,
    pub doors: Vec<Door>,
    pub pruned: bool,
}

impl Attempt {
    pub fn is_connected(&self) -> bool {
        self.door_graph.is_connected()
    }

    fn record(&self, seed: u64, attempt: u32) -> AttemptRecord {
        AttemptRecord {
            seed,
            attempt,
            leaves: self.leaf_count,
            rooms: self.rooms.len(),
            adjacency_edges: self.adjacency.edge_count(),
            pruned: self.pruned,
            doors: self.doors.len(),
            connected: self.is_connected(),
        }
    }
}

/// Run the pipeline once.
///
/// Every value is built fresh from the config and the random stream, so
/// attempts never share state.
pub fn run_attempt(config: &GeneratorConfig, rng: &mut DungeonRng) -> Attempt {
    let tree = partition(config.bounds(), config.room_min_size, rng);
    let rooms = collect_rooms(&tree);
    let adjacency = build_adjacency(&rooms);
    let outcome = prune(rooms, adjacency, config.percent_rooms_to_remove);
    let doors = materialize_doors(&outcome.rooms, &outcome.graph, rng);

    Attempt {
        leaf_count: tree.leaf_count(),
        rooms: outcome.rooms,
        adjacency: outcome.graph,
        door_graph: doors.graph,
        doors: doors.doors,
        pruned: outcome.pruned,
    }
}

/// A connected dungeon layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub bounds: Region,
    /// Seed of the stream that produced the layout
    pub seed: u64,
    /// Attempt number on that stream
    pub attempt: u32,
    /// Reseeds needed before the layout was found
    pub reseeds: u32,
    /// Rooms in reading order
    pub rooms: Vec<Room>,
    pub adjacency: AdjacencyGraph,
    pub door_graph: DoorGraph,
    pub doors: Vec<Door>,
    pub walls: Vec<WallSegment>,
    pub pruned: bool,
    /// Attempts of the run, the accepted one last. Unbounded runs keep
    /// only the attempts on the final seed.
    pub history: Vec<AttemptRecord>,
}

impl Dungeon {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// Room whose area contains the cell
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains_cell(x, y))
    }

    pub fn door_at(&self, x: i32, y: i32) -> Option<&Door> {
        self.doors.iter().find(|door| door.x == x && door.y == y)
    }

    /// Doors leading out of a room
    pub fn doors_of(&self, id: RoomId) -> impl Iterator<Item = &Door> + '_ {
        self.doors.iter().filter(move |door| door.joins(id))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_connected(&self) -> bool {
        self.door_graph.is_connected()
    }

    /// Rasterize the layout into cells
    pub fn grid(&self) -> OccupancyGrid {
        OccupancyGrid::build(self.bounds, &self.rooms, &self.walls, &self.doors)
    }
}

/// Stepwise retry loop over generation attempts.
///
/// Each call to [`step`](Self::step) performs one state transition, so a
/// caller can stop between iterations or observe the run as it goes.
#[derive(Debug, Clone)]
pub struct RetryController {
    config: GeneratorConfig,
    rng: DungeonRng,
    state: GenerationState,
    /// Attempt number on the current stream
    attempt: u32,
    reseeds: u32,
    total_attempts: u32,
    pending: Option<Attempt>,
    history: Vec<AttemptRecord>,
}

impl RetryController {
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            rng: DungeonRng::new(config.seed),
            state: GenerationState::Generating,
            attempt: 1,
            reseeds: 0,
            total_attempts: 0,
            pending: None,
            history: Vec::new(),
        })
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn reseeds(&self) -> u32 {
        self.reseeds
    }

    /// Seed of the current stream
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    /// Advance by one transition.
    ///
    /// Returns the dungeon on acceptance and `None` for every intermediate
    /// step. Stepping after the run has ended yields
    /// [`GenerationError::Finished`].
    pub fn step(&mut self) -> Result<Option<Dungeon>, GenerationError> {
        match self.state {
            GenerationState::Generating => {
                let attempt = run_attempt(&self.config, &mut self.rng);
                let record = attempt.record(self.rng.seed(), self.attempt);
                log::debug!(
                    "attempt {} seed {}: {} leaves, {} rooms, {} adj, {} doors, pruned={}, ok={}",
                    record.attempt,
                    record.seed,
                    record.leaves,
                    record.rooms,
                    record.adjacency_edges,
                    record.doors,
                    record.pruned,
                    record.connected
                );
                self.total_attempts += 1;
                self.history.push(record);
                self.pending = Some(attempt);
                self.state = GenerationState::Verifying;
                Ok(None)
            }
            GenerationState::Verifying => match self.pending.take() {
                Some(attempt) if attempt.is_connected() => {
                    log::info!(
                        "accepted {} rooms with {} doors (seed {}, attempt {}, {} reseeds)",
                        attempt.rooms.len(),
                        attempt.doors.len(),
                        self.rng.seed(),
                        self.attempt,
                        self.reseeds
                    );
                    self.state = GenerationState::Accepted;
                    Ok(Some(self.accept(attempt)))
                }
                _ => {
                    self.state = GenerationState::Retrying;
                    Ok(None)
                }
            },
            GenerationState::Retrying => {
                self.attempt += 1;
                if self.attempt > self.config.max_attempts {
                    self.reseed()?;
                }
                self.state = GenerationState::Generating;
                Ok(None)
            }
            GenerationState::Accepted | GenerationState::Failed => Err(GenerationError::Finished),
        }
    }

    /// Step until a dungeon is accepted or the budget runs out
    pub fn run(&mut self) -> Result<Dungeon, GenerationError> {
        loop {
            if let Some(dungeon) = self.step()? {
                return Ok(dungeon);
            }
        }
    }

    fn reseed(&mut self) -> Result<(), GenerationError> {
        if self
            .config
            .max_reseeds
            .is_some_and(|limit| self.reseeds >= limit)
        {
            log::warn!(
                "giving up after {} attempts and {} reseeds",
                self.total_attempts,
                self.reseeds
            );
            self.state = GenerationState::Failed;
            return Err(GenerationError::AttemptsExhausted {
                attempts: self.total_attempts,
                reseeds: self.reseeds,
            });
        }

        let seed = match self.config.reseed {
            ReseedStrategy::Entropy => entropy_seed(),
            ReseedStrategy::Derived => self.rng.next_seed(),
        };
        log::warn!(
            "no connected layout from seed {} in {} attempts, reseeding with {}",
            self.rng.seed(),
            self.config.max_attempts,
            seed
        );
        self.rng = DungeonRng::new(seed);
        self.reseeds += 1;
        self.attempt = 1;
        // An unbounded run keeps only the current stream's records
        if self.config.max_reseeds.is_none() {
            self.history.clear();
        }
        Ok(())
    }

    fn accept(&mut self, attempt: Attempt) -> Dungeon {
        let walls = synthesize_walls(&attempt.rooms, &attempt.doors, self.config.wall_policy);
        Dungeon {
            bounds: self.config.bounds(),
            seed: self.rng.seed(),
            attempt: self.attempt,
            reseeds: self.reseeds,
            rooms: attempt.rooms,
            adjacency: attempt.adjacency,
            door_graph: attempt.door_graph,
            doors: attempt.doors,
            walls,
            pruned: attempt.pruned,
            history: std::mem::take(&mut self.history),
        }
    }
}

/// Validated entry point for complete runs
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Start a stepwise run
    pub fn controller(&self) -> Result<RetryController, ConfigError> {
        RetryController::new(&self.config)
    }

    pub fn generate(&self) -> Result<Dungeon, GenerationError> {
        self.controller()?.run()
    }
}

/// Generate a dungeon in one call
pub fn generate_dungeon(config: &GeneratorConfig) -> Result<Dungeon, GenerationError> {
    RetryController::new(config)?.run()
}
