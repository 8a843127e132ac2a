use std::cell::Cell;

use crate::reference::Bx;
use crate::utils::{pairing2, MyHash};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Direct-mapped computed table.
///
/// Each key maps to exactly one slot; a newer entry evicts the older one.
/// Full keys are stored, so a colliding lookup is a miss, never a wrong hit.
pub struct Cache<K, V> {
    data: Vec<Option<Entry<K, V>>>,
    bitmask: u64,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K, V> Cache<K, V> {
    /// Create a new table of size `2^bits`.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");

        let size = 1 << bits;
        let bitmask = (size - 1) as u64;

        Self {
            data: std::iter::repeat_with(|| None).take(size).collect(),
            bitmask,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    fn index(&self, hash: u64) -> usize {
        (hash & self.bitmask) as usize
    }
}

impl<K, V> Cache<K, V>
where
    K: MyHash + Eq,
{
    /// Get the cached result.
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.index(key.hash());
        match &self.data[index] {
            Some(entry) if &entry.key == key => {
                self.hits.set(self.hits.get() + 1);
                Some(&entry.value)
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.index(key.hash());
        self.data[index] = Some(Entry { key, value });
    }
}

/// Key of a memoized unary pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OpKey {
    Simplify(Bx),
    PushdownNot(Bx),
    ToLatop(Bx),
    ToBinop(Bx),
}

impl MyHash for OpKey {
    fn hash(&self) -> u64 {
        match self {
            OpKey::Simplify(f) => pairing2(f.get() as u64, 0),
            OpKey::PushdownNot(f) => pairing2(f.get() as u64, 1),
            OpKey::ToLatop(f) => pairing2(f.get() as u64, 2),
            OpKey::ToBinop(f) => pairing2(f.get() as u64, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache() {
        let mut cache = Cache::<OpKey, u32>::new(3);
        let (f, g, h) = (Bx::new(1), Bx::new(2), Bx::new(3));

        cache.insert(OpKey::Simplify(f), 3);
        cache.insert(OpKey::Simplify(g), 1);
        cache.insert(OpKey::ToBinop(h), 2);

        assert_eq!(cache.get(&OpKey::Simplify(f)), Some(&3));
        assert_eq!(cache.get(&OpKey::Simplify(g)), Some(&1));
        assert_eq!(cache.get(&OpKey::ToBinop(h)), Some(&2));
        assert_eq!(cache.get(&OpKey::Simplify(h)), None);
        assert_eq!(cache.get(&OpKey::ToBinop(f)), None);
        assert_eq!(cache.get(&OpKey::PushdownNot(g)), None);
        assert_eq!(cache.hits(), 3);
        assert_eq!(cache.misses(), 3);
    }

    #[test]
    fn test_collision_is_miss() {
        // Single slot: every key collides.
        let mut cache = Cache::<OpKey, &str>::new(0);
        let (f, g) = (Bx::new(1), Bx::new(2));
        cache.insert(OpKey::Simplify(f), "one");
        assert_eq!(cache.get(&OpKey::Simplify(f)), Some(&"one"));
        cache.insert(OpKey::Simplify(g), "two");
        assert_eq!(cache.get(&OpKey::Simplify(f)), None);
        assert_eq!(cache.get(&OpKey::Simplify(g)), Some(&"two"));
    }

    #[test]
    fn test_op_keys_distinct() {
        let mut cache = Cache::<OpKey, u32>::new(4);
        let f = Bx::new(7);
        cache.insert(OpKey::Simplify(f), 1);
        assert_eq!(cache.get(&OpKey::Simplify(f)), Some(&1));
        assert_eq!(cache.get(&OpKey::ToLatop(f)), None);
        assert_eq!(cache.get(&OpKey::PushdownNot(f)), None);
    }
}
