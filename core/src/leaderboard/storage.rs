use std::collections::BTreeMap;
use thiserror::Error;

/// Fixed key a value is persisted under.
pub trait StorageKey {
    const KEY: &'static str;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Minimal key-value capability the leaderboard persists through.
///
/// A `put` replaces the whole value for `key` or fails without touching it.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}

/// In-process storage, lost when dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    values: BTreeMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.values.remove(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_overwrites_previous_value() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), Ok(None));

        storage.put("k", b"one").unwrap();
        storage.put("k", b"two").unwrap();

        assert_eq!(storage.get("k"), Ok(Some(b"two".to_vec())));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.remove("k"), Some(b"two".to_vec()));
        assert!(storage.is_empty());
    }

    #[test]
    fn borrowed_storage_writes_through() {
        fn write(mut storage: impl KeyValueStorage) {
            storage.put("k", b"v").unwrap();
        }

        let mut storage = MemoryStorage::new();
        write(&mut storage);
        write(Box::new(MemoryStorage::new()));
        assert_eq!(storage.get("k"), Ok(Some(b"v".to_vec())));
    }
}
