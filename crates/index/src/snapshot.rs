use std::collections::BTreeMap;

use lochash_common::{CellInt, Handle, Scalar};
use serde::{Deserialize, Serialize};

use crate::index::{Entry, LocationHash};
use crate::key::CellKey;

/// Occupancy summary for instrumentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub cell_size: u64,
    pub dimensions: usize,
    pub bucket_count: usize,
    pub entry_count: usize,
    pub largest_bucket: usize,
}

/// Owned, key-ordered copy of an index's buckets.
///
/// `hash` covers keys and stored coordinates (not handles) in key order, so
/// two indices holding the same points produce the same hash regardless of
/// insertion history or map layout.
#[derive(Debug, Clone)]
pub struct Snapshot<Q, T, const N: usize, H> {
    pub buckets: BTreeMap<CellKey<Q, N>, Vec<Entry<T, N, H>>>,
    pub hash: u64,
}

impl<Q: CellInt, T: Scalar, const N: usize, H: Handle> Snapshot<Q, T, N, H> {
    pub fn capture<const CELL: u64>(index: &LocationHash<CELL, T, N, H, Q>) -> Self {
        let buckets: BTreeMap<_, _> = index
            .data()
            .iter()
            .map(|(key, bucket)| (*key, bucket.clone()))
            .collect();
        let hash = content_hash(buckets.iter().map(|(key, bucket)| (key, bucket.as_slice())));
        Self { buckets, hash }
    }

    /// Recompute the hash and compare.
    pub fn verify(&self) -> bool {
        let expected = content_hash(
            self.buckets
                .iter()
                .map(|(key, bucket)| (key, bucket.as_slice())),
        );
        self.hash == expected
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Rebuild an index holding exactly the captured buckets. `CELL` must be
    /// the cell size of the index the snapshot was taken from.
    pub fn restore<const CELL: u64>(&self) -> LocationHash<CELL, T, N, H, Q> {
        let mut index = LocationHash::new();
        for (key, bucket) in &self.buckets {
            for entry in bucket {
                index.insert_raw(*key, *entry);
            }
        }
        index
    }
}

impl<const CELL: u64, T, const N: usize, H, Q> LocationHash<CELL, T, N, H, Q>
where
    T: Scalar,
    H: Handle,
    Q: CellInt,
{
    pub fn snapshot(&self) -> Snapshot<Q, T, N, H> {
        Snapshot::capture(self)
    }

    /// Deterministic hash of the stored keys and coordinates.
    pub fn state_hash(&self) -> u64 {
        let mut ordered: Vec<_> = self.data().iter().collect();
        ordered.sort_unstable_by(|a, b| a.0.cmp(b.0));
        content_hash(ordered.into_iter().map(|(key, bucket)| (key, bucket.as_slice())))
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            cell_size: Self::CELL_SIZE.get(),
            dimensions: N,
            bucket_count: self.bucket_count(),
            entry_count: self.entry_count(),
            largest_bucket: self.data().values().map(Vec::len).max().unwrap_or(0),
        }
    }
}

fn content_hash<'a, Q, T, const N: usize, H>(
    buckets: impl Iterator<Item = (&'a CellKey<Q, N>, &'a [Entry<T, N, H>])>,
) -> u64
where
    Q: CellInt,
    T: Scalar,
    H: 'a,
{
    let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
    let mix = |h: &mut u64, bytes: &[u8]| {
        for &b in bytes {
            *h ^= b as u64;
            *h = h.wrapping_mul(0x0100_0000_01b3);
        }
    };
    for (key, bucket) in buckets {
        for cell in key.cells() {
            mix(&mut h, &cell.to_i128().to_le_bytes());
        }
        mix(&mut h, &(bucket.len() as u64).to_le_bytes());
        for entry in bucket {
            for value in &entry.coordinate {
                mix(&mut h, &value.hash_bits().to_le_bytes());
            }
        }
    }
    h
}
