use crate::data::Radial;
use crate::result::{Error, Result};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

/// Index buckets are 0.2 degrees wide. Radials are spaced at least 0.5 degrees
/// apart, so two keys landing in one bucket indicate corrupt input.
const BUCKETS_PER_DEGREE: f32 = 5.0;

fn bucket_of(key: f32) -> usize {
    (key * BUCKETS_PER_DEGREE) as usize
}

/// A mapping from azimuth angle in degrees [0, 360) to [Radial], ordered by
/// key, with a constant-time `lower_bound` answered through a bucket index.
///
/// The index is a vector with one slot per 0.2-degree bucket. Each slot holds
/// the position of the first store entry whose key buckets at or above that
/// slot, so a lookup is a single computed subscript. Positions (not pointers)
/// are stored so reallocation of the backing vector never invalidates the
/// index; the index is instead rebuilt wholesale after every insert, which is
/// cheap at the few hundred radials a cut contains.
///
/// Only the ordered store is serialized. Deserialization rebuilds the index.
#[derive(Clone, PartialEq)]
pub struct AzimuthMap {
    store: Vec<(f32, Radial)>,
    index: Vec<usize>,
}

impl AzimuthMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            store: Vec::new(),
            index: Vec::new(),
        }
    }

    /// The number of radials in the map.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the map contains no radials.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The ordered key/radial entries backing the map.
    pub fn entries(&self) -> &[(f32, Radial)] {
        &self.store
    }

    /// The entry at store position `position`, if in bounds.
    pub fn get(&self, position: usize) -> Option<&(f32, Radial)> {
        self.store.get(position)
    }

    /// Insert a radial keyed by azimuth, keeping the store ordered.
    ///
    /// Fails with [Error::IndexCollision] if an existing key occupies the same
    /// 0.2-degree bucket, which at 0.5-degree azimuth resolution means the
    /// input data is bad.
    pub fn insert(&mut self, key: f32, radial: Radial) -> Result<()> {
        let bucket = bucket_of(key);

        if bucket + 1 > self.index.len() {
            // Larger than the largest indexed key: the new entry is the tail.
            self.store.push((key, radial));
        } else {
            // The slot for this bucket points at the entry the new one must be
            // inserted ahead of. If that entry buckets to the same slot, the
            // keys collide.
            let next = self.index[bucket];
            if bucket_of(self.store[next].0) == bucket {
                return Err(Error::IndexCollision {
                    azimuth: key,
                    bucket,
                });
            }
            self.store.insert(next, (key, radial));
        }

        self.rebuild_index();
        Ok(())
    }

    /// The store position of the first entry with key >= `key`, answered with
    /// a single computed subscript into the bucket index. Returns `len()` when
    /// no such entry exists.
    pub fn lower_bound(&self, key: f32) -> usize {
        let bucket = bucket_of(key);

        if bucket + 1 > self.index.len() {
            self.store.len()
        } else {
            self.index[bucket]
        }
    }

    /// Iterate entries in key order starting from store position `start`,
    /// wrapping past the end of the store so that circular windows spanning
    /// the 0/360 seam visit every entry exactly once.
    pub fn iter_wrapped(&self, start: usize) -> impl Iterator<Item = &(f32, Radial)> {
        let len = self.store.len();
        (0..len).map(move |offset| &self.store[(start + offset) % len])
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &(f32, Radial)> {
        self.store.iter()
    }

    /// Rebuild the bucket index so that each slot points at the first store
    /// entry whose bucket is >= the slot number. Trailing slots (past the last
    /// entry's bucket) would point at the final entry, but the index is sized
    /// so none exist.
    fn rebuild_index(&mut self) {
        self.index.clear();

        let last_bucket = match self.store.last() {
            Some((key, _)) => bucket_of(*key),
            None => return,
        };
        self.index.resize(last_bucket + 1, 0);

        let mut slot = 0;
        for (position, (key, _)) in self.store.iter().enumerate() {
            let stop = bucket_of(*key) + 1;
            while slot < stop {
                self.index[slot] = position;
                slot += 1;
            }
        }
    }
}

impl Default for AzimuthMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for AzimuthMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzimuthMap")
            .field("len", &self.store.len())
            .field("buckets", &self.index.len())
            .finish()
    }
}

impl Serialize for AzimuthMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.store.len()))?;
        for entry in &self.store {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for AzimuthMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let store = Vec::<(f32, Radial)>::deserialize(deserializer)?;

        let mut map = AzimuthMap {
            store,
            index: Vec::new(),
        };
        map.rebuild_index();

        Ok(map)
    }
}
