mod handle;

pub use handle::Handle;

/// Single-slot cache keyed by input identity.
///
/// The value is recomputed only when the key passed to
/// [`Memo::get_or_compute`] differs from the key of the cached entry.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    recomputes: u64,
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            slot: None,
            recomputes: 0,
        }
    }

    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some((cached_key, value)) = &self.slot
            && *cached_key == key
        {
            return value.clone();
        }

        let value = compute(&key);
        self.recomputes += 1;
        self.slot = Some((key, value.clone()));
        value
    }

    /// Number of times the cached value has been (re)computed.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}

impl<K: PartialEq, V: Clone> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
