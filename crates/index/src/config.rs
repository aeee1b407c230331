/// Allocation hints for a [`LocationHash`](crate::LocationHash).
///
/// Cell size, scalar type, dimension count and cell-integer width are type
/// parameters of the index and cannot be misconfigured at runtime; only
/// capacity tuning lives here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Buckets reserved up front in the key map.
    pub initial_buckets: usize,
    /// Entries reserved when a bucket is created.
    pub bucket_capacity: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            initial_buckets: 0,
            bucket_capacity: 4,
        }
    }
}

impl IndexConfig {
    /// Config sized for roughly `entries` points spread `per_bucket` to a cell.
    pub fn for_population(entries: usize, per_bucket: usize) -> Self {
        let per_bucket = per_bucket.max(1);
        Self {
            initial_buckets: entries.div_ceil(per_bucket),
            bucket_capacity: per_bucket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.initial_buckets, 0);
        assert_eq!(config.bucket_capacity, 4);
    }

    #[test]
    fn population_sizing() {
        let config = IndexConfig::for_population(1000, 8);
        assert_eq!(config.initial_buckets, 125);
        assert_eq!(config.bucket_capacity, 8);

        let config = IndexConfig::for_population(10, 0);
        assert_eq!(config.initial_buckets, 10);
        assert_eq!(config.bucket_capacity, 1);
    }
}
