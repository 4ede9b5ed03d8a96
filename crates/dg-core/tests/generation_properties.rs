//! Property tests over random dimensions, sizes and seeds

use std::collections::BTreeSet;

use dg_core::layout::{
    SharedWall, boundary_edges, build_adjacency, collect_rooms, partition, prune, removal_count,
    synthesize_walls,
};
use dg_core::{
    DungeonRng, GenerationError, GeneratorConfig, Orientation, Region, ReseedStrategy, Room,
    WallPolicy, generate_dungeon,
};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = GeneratorConfig> {
    (12i32..64, 12i32..64, 3i32..9, any::<u64>()).prop_map(|(width, height, min, seed)| {
        GeneratorConfig::new(width, height)
            .with_room_min_size(min)
            .with_seed(seed)
            .with_reseed(ReseedStrategy::Derived)
    })
}

fn rooms_for(width: i32, height: i32, min: i32, seed: u64) -> Vec<Room> {
    let mut rng = DungeonRng::new(seed);
    collect_rooms(&partition(Region::new(0, 0, width, height), min, &mut rng))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn partition_tiles_the_region(
        width in 1i32..80,
        height in 1i32..80,
        min in 1i32..10,
        seed in any::<u64>(),
    ) {
        let region = Region::new(0, 0, width, height);
        let tree = partition(region, min.min(width).min(height), &mut DungeonRng::new(seed));
        prop_assert!(tree.is_tiling());

        let leaves = tree.leaves();
        let area: i64 = leaves.iter().map(|r| r.area()).sum();
        prop_assert_eq!(area, region.area());
        for (i, a) in leaves.iter().enumerate() {
            prop_assert!(region.contains(a));
            for b in &leaves[i + 1..] {
                prop_assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn generation_is_deterministic(config in config_strategy(), percent in 0.0f64..60.0) {
        let config = config.with_prune_percent(percent);
        prop_assert_eq!(generate_dungeon(&config), generate_dungeon(&config));
    }

    #[test]
    fn unpruned_layouts_connect_first_time(config in config_strategy()) {
        let dungeon = generate_dungeon(&config).unwrap();
        prop_assert!(dungeon.is_connected());
        prop_assert_eq!(dungeon.attempt, 1);
        prop_assert_eq!(dungeon.reseeds, 0);
    }

    #[test]
    fn accepted_layouts_are_connected(config in config_strategy(), percent in 0.0f64..=100.0) {
        match generate_dungeon(&config.with_prune_percent(percent)) {
            Ok(dungeon) => {
                prop_assert!(dungeon.is_connected());
                prop_assert!(dungeon.door_graph.is_subgraph_of(&dungeon.adjacency));
            }
            Err(err) => {
                prop_assert!(
                    matches!(err, GenerationError::AttemptsExhausted { .. }),
                    "unexpected error {:?}",
                    err
                );
            }
        }
    }

    #[test]
    fn doors_sit_strictly_inside_shared_span(config in config_strategy()) {
        let dungeon = generate_dungeon(&config).unwrap();
        for door in &dungeon.doors {
            let a = dungeon.room(door.rooms.0).unwrap();
            let b = dungeon.room(door.rooms.1).unwrap();
            let wall = SharedWall::between(a, b).unwrap();
            prop_assert_eq!(door.orientation, wall.orientation);
            prop_assert_eq!(door.fixed(), wall.line);
            let (lo, hi) = match wall.orientation {
                Orientation::Vertical => (a.y.max(b.y), a.top().min(b.top())),
                Orientation::Horizontal => (a.x.max(b.x), a.right().min(b.right())),
            };
            prop_assert!(door.position() > lo && door.position() < hi - 1);
        }
    }

    #[test]
    fn walls_cover_every_non_door_edge_once(config in config_strategy()) {
        let dungeon = generate_dungeon(&config).unwrap();
        let door_edges: BTreeSet<_> = dungeon
            .doors
            .iter()
            .map(|d| (d.orientation, d.fixed(), d.position()))
            .collect();
        let boundary: BTreeSet<_> = dungeon.rooms.iter().flat_map(boundary_edges).collect();

        for &(orientation, fixed, pos) in &boundary {
            let covered = dungeon
                .walls
                .iter()
                .filter(|w| w.covers(orientation, fixed, pos))
                .count();
            let expected = usize::from(!door_edges.contains(&(orientation, fixed, pos)));
            prop_assert_eq!(covered, expected);
        }

        let wall_edges: usize = dungeon.walls.iter().map(|w| w.length as usize).sum();
        prop_assert_eq!(wall_edges, boundary.len() - door_edges.len());
    }

    #[test]
    fn open_seams_only_keep_unshared_edges(
        width in 12i32..64,
        height in 12i32..64,
        seed in any::<u64>(),
    ) {
        let rooms = rooms_for(width, height, 4, seed);
        let walls = synthesize_walls(&rooms, &[], WallPolicy::OpenSharedEdges);
        let perimeter: i32 = walls.iter().map(|w| w.length).sum();
        prop_assert_eq!(perimeter, 2 * (width + height));
    }

    #[test]
    fn pruning_is_sound(
        width in 12i32..64,
        height in 12i32..64,
        min in 3i32..9,
        seed in any::<u64>(),
        percent in 0.0f64..=100.0,
    ) {
        let rooms = rooms_for(width, height, min, seed);
        let graph = build_adjacency(&rooms);
        let outcome = prune(rooms.clone(), graph.clone(), percent);

        if outcome.pruned {
            let count = removal_count(rooms.len(), percent);
            prop_assert_eq!(outcome.removed.len(), count);
            prop_assert_eq!(outcome.rooms.len(), rooms.len() - count);
            prop_assert!(outcome.graph.is_connected());
            prop_assert_eq!(&outcome.graph, &build_adjacency(&outcome.rooms));

            let largest_removed = rooms
                .iter()
                .filter(|r| outcome.removed.contains(&r.id))
                .map(Room::area)
                .max();
            let smallest_kept = outcome.rooms.iter().map(Room::area).min();
            prop_assert!(largest_removed <= smallest_kept);
        } else {
            prop_assert_eq!(outcome.rooms, rooms);
            prop_assert_eq!(outcome.graph, graph);
            prop_assert!(outcome.removed.is_empty());
        }
    }
}
