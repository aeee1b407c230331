//! Location hash: a quantized spatial index over `N`-dimensional coordinates.
//!
//! Every coordinate is snapped to the origin of a power-of-two sized cell and
//! stored in that cell's bucket, so point lookups, moves and small-volume
//! queries cost roughly the same regardless of how many points are indexed.
//!
//! # Invariants
//! - A key present in the map always has a non-empty bucket.
//! - Every entry sits in the bucket(s) implied by its last add or move.
//! - Queries never mutate; only add/remove/relocate/clear write the store.
//! - Handles are never dereferenced or freed by the index.
//!
//! # Example
//! ```
//! use lochash_index::{CellKey, LocationHash};
//!
//! let mut index = LocationHash::<16, f32, 2, u32>::new();
//! index.add_object(1, [1.0, 2.0]);
//! index.add_object(2, [45.0, 35.0]);
//!
//! assert_eq!(index.key_of(&[1.0, 2.0]), CellKey::new([0, 0]));
//! assert_eq!(index.query_bounding_box([0.0, 0.0], [30.0, 40.0]), vec![1]);
//! assert!(index.relocate_object(1, [1.0, 2.0], [20.0, 2.0]));
//! ```
//!
//! # Nesting
//! An index is an ordinary handle target, so a coarse index can hold
//! references to fine per-region indices. The outer index treats them as
//! opaque and never forwards calls into them.
//! ```
//! use lochash_index::LocationHash;
//!
//! let mut region = LocationHash::<16, f32, 3, u32>::new();
//! region.add_object(7, [3.0, 4.0, 5.0]);
//!
//! let mut world = LocationHash::<16, i32, 3, &LocationHash<16, f32, 3, u32>>::new();
//! world.add_object(&region, [0, 0, 0]);
//!
//! let inner = world.query_bucket([0, 0, 0])[0].handle.unwrap();
//! assert_eq!(inner.query_bucket([3.0, 4.0, 5.0])[0].handle, Some(7));
//! ```

mod config;
mod index;
mod key;
mod matching;
mod quantize;
mod query;
mod range;
mod snapshot;

#[cfg(test)]
mod test_support;

pub use config::IndexConfig;
pub use index::{BucketMap, Entry, LocationHash, coordinate_from_slice};
pub use key::{CellKey, cell_hash};
pub use lochash_common::{CellInt, CellSize, Error, Handle, ObjectId, Result, Scalar, ToCoordinate};
pub use matching::{coordinates_match, coordinates_match_scalar, distance_squared, within_bounds};
pub use quantize::{quantize, quantize_coordinate};
pub use range::{CellRange, cells_in_range, cells_within_distance, extent_bounds};
pub use snapshot::{IndexStats, Snapshot};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[derive(Debug)]
    struct Player {
        id: u32,
        map: [i32; 3],
        position: Vec3,
    }

    type PlayerMap<'a> = LocationHash<16, f32, 3, &'a Player>;

    #[test]
    fn map_of_maps() {
        let player1 = Player {
            id: 1,
            map: [0, 0, 0],
            position: Vec3::ZERO,
        };
        let player2 = Player {
            id: 2,
            map: [0, 0, 0],
            position: Vec3::splat(10.0),
        };
        let player3 = Player {
            id: 3,
            map: [1, 0, 0],
            position: Vec3::splat(20.0),
        };

        let mut map1 = PlayerMap::new();
        let mut map2 = PlayerMap::new();
        map1.add_object(&player1, player1.position.to_coordinate());
        map1.add_object(&player2, player2.position.to_coordinate());
        map2.add_object(&player3, player3.position.to_coordinate());

        let mut maps = LocationHash::<16, i32, 3, &PlayerMap<'_>>::new();
        maps.add_object(&map1, player1.map);
        maps.add_object(&map2, player3.map);

        // map coordinates 0 and 1 share one coarse cell
        let coarse = maps.query_bucket(player1.map);
        assert_eq!(coarse.len(), 2);
        let (Some(r1), Some(r2)) = (coarse[0].handle, coarse[1].handle) else {
            panic!("nested entries carry handles");
        };
        assert!(std::ptr::eq(r1, &map1));
        assert!(std::ptr::eq(r2, &map2));

        let fine = r1.query_bucket(player1.position.to_coordinate());
        assert_eq!(fine.len(), 2);
        assert_eq!(fine[0].handle.map(|p| p.id), Some(1));
        assert_eq!(fine[1].handle.map(|p| p.id), Some(2));

        let fine = r2.query_bucket(player3.position.to_coordinate());
        assert_eq!(fine.len(), 1);
        assert!(fine[0].handle.is_some_and(|p| std::ptr::eq(p, &player3)));
    }

    #[test]
    fn outer_index_removes_inner_by_identity() {
        let a = PlayerMap::new();
        let b = PlayerMap::new();
        let mut maps = LocationHash::<16, i32, 3, &PlayerMap<'_>>::new();
        maps.add_object(&a, [0, 0, 0]);
        maps.add_object(&b, [0, 0, 0]);

        // equal contents, distinct instances
        assert!(maps.remove_object(&b, [0, 0, 0]));
        let left = maps.query_bucket([0, 0, 0]);
        assert_eq!(left.len(), 1);
        assert!(left[0].handle.is_some_and(|m| std::ptr::eq(m, &a)));
    }

    #[test]
    fn nested_ids_allow_mutating_regions() {
        let mut regions: Vec<LocationHash<8, f32, 2, u32>> = vec![LocationHash::new(); 2];
        let mut world = LocationHash::<64, i32, 2, usize>::new();
        world.add_object(0, [0, 0]);
        world.add_object(1, [64, 0]);

        regions[0].add_object(10, [1.0, 1.0]);
        regions[1].add_object(20, [3.0, 3.0]);
        regions[1].add_object(21, [30.0, 3.0]);

        let found: Vec<u32> = world
            .query_bounding_box([0, 0], [100, 10])
            .into_iter()
            .flat_map(|region| regions[region].query_bounding_box([0.0, 0.0], [8.0, 8.0]))
            .collect();
        assert_eq!(found.len(), 2);
        assert!(found.contains(&10));
        assert!(found.contains(&20));
    }

    #[test]
    fn moving_bodies_stay_queryable() {
        let mut bodies: Vec<(u32, Vec3, Vec3)> = (0..40)
            .map(|i| {
                let f = i as f32;
                (i, Vec3::new(f * 3.0, -f, f * 0.5), Vec3::new(1.5, 2.0, -0.75))
            })
            .collect();
        let mut index = LocationHash::<16, f32, 3, u32>::new();
        for (id, position, _) in &bodies {
            index.add_object(*id, position.to_coordinate());
        }

        for _ in 0..20 {
            for (id, position, velocity) in bodies.iter_mut() {
                let next = *position + *velocity;
                index.relocate_object(*id, position.to_coordinate(), next.to_coordinate());
                // within-cell moves leave the stored coordinate behind
                if index.key_of(&position.to_coordinate()) != index.key_of(&next.to_coordinate()) {
                    *position = next;
                }
            }
        }

        let center = Vec3::new(40.0, 10.0, 5.0);
        let mut found = index.query_within_distance(center.to_coordinate(), 30.0);
        found.sort_unstable();
        let mut expected: Vec<u32> = bodies
            .iter()
            .filter(|(_, p, _)| p.distance_squared(center) <= 900.0)
            .map(|(id, _, _)| *id)
            .collect();
        expected.sort_unstable();
        assert_eq!(found, expected);
        assert_eq!(index.entry_count(), bodies.len());
    }
}
