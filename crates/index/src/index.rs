use std::collections::HashMap;

use lochash_common::{CellInt, CellSize, Error, Handle, Result, Scalar};

use crate::config::IndexConfig;
use crate::key::CellKey;
use crate::matching::coordinates_match;
use crate::range::{CellRange, cells_within_distance};

/// One stored point: the original coordinate plus an optional handle to caller data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<T, const N: usize, H> {
    pub coordinate: [T; N],
    pub handle: Option<H>,
}

impl<T, const N: usize, H: Handle> Entry<T, N, H> {
    /// Whether this entry carries exactly `handle` (by identity).
    #[inline]
    pub fn holds(&self, handle: &H) -> bool {
        self.handle.as_ref().is_some_and(|own| own.same_handle(handle))
    }

    /// Like [`holds`](Self::holds), but `None` matches an entry stored without a handle.
    #[inline]
    pub fn carries(&self, handle: Option<&H>) -> bool {
        match (self.handle.as_ref(), handle) {
            (Some(own), Some(other)) => own.same_handle(other),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Map from cell key to the entries stored in that cell, in insertion order.
pub type BucketMap<Q, T, const N: usize, H> = HashMap<CellKey<Q, N>, Vec<Entry<T, N, H>>>;

/// Spatial hash of `N`-dimensional coordinates into cells of edge `CELL`.
///
/// `CELL` must be a power of two; anything else fails to compile when the
/// index is constructed. `H` is the handle type stored next to each
/// coordinate (`()` for bare points) and `Q` the integer width of cell keys.
///
/// Not synchronized. Handles are never dereferenced: callers keep the
/// referenced data alive for as long as it is registered.
#[derive(Debug, Clone)]
pub struct LocationHash<const CELL: u64, T, const N: usize, H = (), Q = i64> {
    config: IndexConfig,
    buckets: BucketMap<Q, T, N, H>,
}

impl<const CELL: u64, T, const N: usize, H, Q> Default for LocationHash<CELL, T, N, H, Q>
where
    T: Scalar,
    H: Handle,
    Q: CellInt,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const CELL: u64, T, const N: usize, H, Q> LocationHash<CELL, T, N, H, Q>
where
    T: Scalar,
    H: Handle,
    Q: CellInt,
{
    pub const CELL_SIZE: CellSize = CellSize::of::<CELL>();
    pub const DIMENSIONS: usize = N;

    /// Create an empty index.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create an empty index with explicit allocation hints.
    pub fn with_config(config: IndexConfig) -> Self {
        // evaluating the const rejects a non-power-of-two CELL at compile time
        let _ = Self::CELL_SIZE;
        Self {
            buckets: HashMap::with_capacity(config.initial_buckets),
            config,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn cell_size(&self) -> CellSize {
        Self::CELL_SIZE
    }

    /// Key of the cell containing `coordinate`.
    #[inline]
    pub fn key_of(&self, coordinate: &[T; N]) -> CellKey<Q, N> {
        CellKey::from_coordinate(coordinate, Self::CELL_SIZE)
    }

    /// Every key whose cell intersects the box of half-width `radius` around `coordinate`.
    pub fn keys_within_distance(&self, coordinate: &[T; N], radius: T) -> Vec<CellKey<Q, N>> {
        cells_within_distance(coordinate, radius, Self::CELL_SIZE)
    }

    /// Store a bare coordinate in the bucket containing it. Duplicates are kept.
    pub fn add(&mut self, coordinate: [T; N]) {
        let key = self.key_of(&coordinate);
        self.push(
            key,
            Entry {
                coordinate,
                handle: None,
            },
        );
    }

    /// Store a coordinate together with a handle to caller data.
    pub fn add_object(&mut self, handle: H, coordinate: [T; N]) {
        let key = self.key_of(&coordinate);
        self.push(
            key,
            Entry {
                coordinate,
                handle: Some(handle),
            },
        );
    }

    /// Store an object in every bucket its bounding box `[c - radius, c + radius]` overlaps.
    ///
    /// Returns the touched keys so the caller can keep them for a later
    /// symmetric removal. The radius must keep the footprint small enough to
    /// list in memory.
    pub fn add_with_extent(
        &mut self,
        handle: Option<H>,
        coordinate: [T; N],
        radius: T,
    ) -> Vec<CellKey<Q, N>> {
        let keys = self.keys_within_distance(&coordinate, radius);
        let entry = Entry { coordinate, handle };
        for key in &keys {
            self.push(*key, entry);
        }
        tracing::trace!(buckets = keys.len(), "extent inserted");
        keys
    }

    /// Remove the first entry in the coordinate's bucket whose stored coordinate matches.
    ///
    /// Integers match exactly; floats match within machine epsilon per dimension.
    pub fn remove(&mut self, coordinate: [T; N]) -> bool {
        let key = self.key_of(&coordinate);
        self.remove_first(&key, |entry| coordinates_match(&entry.coordinate, &coordinate))
    }

    /// Remove the first entry in the coordinate's bucket that carries `handle`.
    pub fn remove_object(&mut self, handle: H, coordinate: [T; N]) -> bool {
        let key = self.key_of(&coordinate);
        self.remove_first(&key, |entry| entry.holds(&handle))
    }

    /// Undo [`add_with_extent`](Self::add_with_extent): drop `handle` from every
    /// bucket the extent overlaps. Buckets that no longer hold it are skipped.
    /// `None` removes one handle-less entry per bucket.
    pub fn remove_with_extent(&mut self, handle: Option<H>, coordinate: [T; N], radius: T) -> bool {
        let mut removed = false;
        for key in CellRange::<Q, N>::around(&coordinate, radius, Self::CELL_SIZE) {
            removed |= self.remove_first(&key, |entry| entry.carries(handle.as_ref()));
        }
        tracing::trace!(removed, "extent removed");
        removed
    }

    /// Move a bare coordinate between buckets.
    ///
    /// Returns `false` without touching the store when both coordinates fall in
    /// the same cell, or when no entry matched `old`.
    pub fn relocate(&mut self, old: [T; N], new: [T; N]) -> bool {
        if self.key_of(&old) == self.key_of(&new) {
            return false;
        }
        if self.remove(old) {
            self.add(new);
            true
        } else {
            false
        }
    }

    /// Move a handle between buckets. Same contract as [`relocate`](Self::relocate).
    pub fn relocate_object(&mut self, handle: H, old: [T; N], new: [T; N]) -> bool {
        if self.key_of(&old) == self.key_of(&new) {
            return false;
        }
        if self.remove_object(handle, old) {
            self.add_object(handle, new);
            true
        } else {
            false
        }
    }

    /// Move an object stored with extent, returning the keys it occupies afterwards.
    ///
    /// Cheapest checks first: an unchanged coordinate or an unchanged footprint
    /// leaves the store untouched; only a changed footprint re-inserts.
    pub fn relocate_with_extent(
        &mut self,
        handle: H,
        radius: T,
        old: [T; N],
        new: [T; N],
    ) -> Vec<CellKey<Q, N>> {
        if coordinates_match(&old, &new) {
            return self.keys_within_distance(&old, radius);
        }

        if self.key_of(&old) == self.key_of(&new) {
            let new_keys = self.keys_within_distance(&new, radius);
            let old_keys = self.keys_within_distance(&old, radius);
            if new_keys == old_keys {
                tracing::debug!("extent relocation kept footprint");
                return new_keys;
            }
        }

        tracing::debug!("extent relocation changed footprint");
        self.remove_with_extent(Some(handle), old, radius);
        self.add_with_extent(Some(handle), new, radius)
    }

    /// Store a coordinate given as a slice, checking its length against `N`.
    pub fn add_slice(&mut self, coordinate: &[T]) -> Result<()> {
        self.add(coordinate_from_slice(coordinate)?);
        Ok(())
    }

    /// Remove a coordinate given as a slice, checking its length against `N`.
    pub fn remove_slice(&mut self, coordinate: &[T]) -> Result<bool> {
        Ok(self.remove(coordinate_from_slice(coordinate)?))
    }

    /// Drop every bucket.
    pub fn clear(&mut self) {
        tracing::debug!(buckets = self.buckets.len(), "clearing location hash");
        self.buckets.clear();
    }

    /// Read-only access to the whole key-to-bucket map.
    pub fn data(&self) -> &BucketMap<Q, T, N, H> {
        &self.buckets
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries across all buckets. An object stored with
    /// extent counts once per bucket it occupies.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn contains_key(&self, key: &CellKey<Q, N>) -> bool {
        self.buckets.contains_key(key)
    }

    /// Entries stored under `key`, or an empty slice.
    pub fn bucket(&self, key: &CellKey<Q, N>) -> &[Entry<T, N, H>] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append under an explicit key. Used when rebuilding from a snapshot,
    /// where extent entries live outside their home cell.
    pub(crate) fn insert_raw(&mut self, key: CellKey<Q, N>, entry: Entry<T, N, H>) {
        self.push(key, entry);
    }

    fn push(&mut self, key: CellKey<Q, N>, entry: Entry<T, N, H>) {
        let capacity = self.config.bucket_capacity;
        self.buckets
            .entry(key)
            .or_insert_with(|| {
                tracing::trace!(?key, "bucket created");
                Vec::with_capacity(capacity)
            })
            .push(entry);
    }

    fn remove_first(
        &mut self,
        key: &CellKey<Q, N>,
        matches: impl Fn(&Entry<T, N, H>) -> bool,
    ) -> bool {
        let Some(bucket) = self.buckets.get_mut(key) else {
            return false;
        };
        let Some(position) = bucket.iter().position(matches) else {
            return false;
        };
        // order-preserving: buckets keep insertion order
        bucket.remove(position);
        if bucket.is_empty() {
            self.buckets.remove(key);
            tracing::trace!(?key, "bucket erased");
        }
        true
    }
}

/// Copy a slice into a fixed-size coordinate, rejecting a wrong dimension count.
pub fn coordinate_from_slice<T: Copy, const N: usize>(coordinate: &[T]) -> Result<[T; N]> {
    <[T; N]>::try_from(coordinate).map_err(|_| Error::DimensionMismatch {
        expected: N,
        actual: coordinate.len(),
    })
}
