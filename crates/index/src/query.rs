//! Read-only queries over a [`LocationHash`].
//!
//! Volume queries enumerate candidate cells first and then filter on the
//! stored coordinates, because a cell can straddle the query boundary.
//! An entry is only reported from its home bucket (the cell its own
//! coordinate falls in), so objects inserted with extent appear once.

use lochash_common::{CellInt, Handle, Scalar};

use crate::index::{Entry, LocationHash};
use crate::key::CellKey;
use crate::matching::{distance_squared, within_bounds};
use crate::range::CellRange;

impl<const CELL: u64, T, const N: usize, H, Q> LocationHash<CELL, T, N, H, Q>
where
    T: Scalar,
    H: Handle,
    Q: CellInt,
{
    /// Entries of the bucket containing `coordinate`, or an empty slice.
    pub fn query_bucket(&self, coordinate: [T; N]) -> &[Entry<T, N, H>] {
        self.bucket(&self.key_of(&coordinate))
    }

    /// Handles of all entries with `min[i] <= coordinate[i] <= max[i]` in every dimension.
    pub fn query_bounding_box(&self, min: [T; N], max: [T; N]) -> Vec<H> {
        self.entries_in_bounding_box(min, max)
            .into_iter()
            .filter_map(|entry| entry.handle)
            .collect()
    }

    /// Handles of all entries within `radius` (inclusive) of `center`.
    pub fn query_within_distance(&self, center: [T; N], radius: T) -> Vec<H> {
        self.entries_within_distance(center, radius)
            .into_iter()
            .filter_map(|entry| entry.handle)
            .collect()
    }

    /// Entries inside the inclusive box `[min, max]`.
    pub fn entries_in_bounding_box(&self, min: [T; N], max: [T; N]) -> Vec<&Entry<T, N, H>> {
        let _span = tracing::debug_span!("query_bounding_box").entered();
        let mut found = Vec::new();
        self.for_each_candidate(CellRange::new(&min, &max, Self::CELL_SIZE), |key, entry| {
            if within_bounds(&entry.coordinate, &min, &max) && self.key_of(&entry.coordinate) == *key
            {
                found.push(entry);
            }
        });
        tracing::trace!(found = found.len(), "bounding box query complete");
        found
    }

    /// Entries whose squared distance to `center` is at most `radius²`.
    pub fn entries_within_distance(&self, center: [T; N], radius: T) -> Vec<&Entry<T, N, H>> {
        let _span = tracing::debug_span!("query_within_distance").entered();
        let radius_squared = radius * radius;
        let mut found = Vec::new();
        self.for_each_candidate(
            CellRange::around(&center, radius, Self::CELL_SIZE),
            |key, entry| {
                if distance_squared(&entry.coordinate, &center) <= radius_squared
                    && self.key_of(&entry.coordinate) == *key
                {
                    found.push(entry);
                }
            },
        );
        tracing::trace!(found = found.len(), "distance query complete");
        found
    }

    /// Visit every entry of every stored bucket inside `range`.
    ///
    /// When the range spans more cells than there are buckets, walking the
    /// map and range-checking keys is cheaper than probing each cell.
    fn for_each_candidate<'a>(
        &'a self,
        range: CellRange<Q, N>,
        mut visit: impl FnMut(&CellKey<Q, N>, &'a Entry<T, N, H>),
    ) {
        let data = self.data();
        if range.len() > data.len() {
            let (low, high) = range.corners();
            for (key, bucket) in data {
                let inside = (0..N).all(|i| {
                    let cell = key.dimension(i).to_i128();
                    low[i] <= cell && cell <= high[i]
                });
                if inside {
                    bucket.iter().for_each(|entry| visit(key, entry));
                }
            }
        } else {
            for key in range {
                if let Some(bucket) = data.get(&key) {
                    bucket.iter().for_each(|entry| visit(&key, entry));
                }
            }
        }
    }
}
