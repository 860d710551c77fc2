use async_trait::async_trait;
use jwkset::KeyWithMeta;
use tokio::sync::RwLock;

use super::Storage;
use crate::{Error, ErrorKind};

/// Storage backed by an insertion-ordered list held in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    keys: RwLock<Vec<KeyWithMeta>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage holding `keys`, in the given order.
    pub fn with_keys(keys: Vec<KeyWithMeta>) -> Self {
        Self {
            keys: RwLock::new(keys),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn snapshot_keys(&self) -> Result<Vec<KeyWithMeta>, Error> {
        Ok(self.keys.read().await.clone())
    }

    async fn read_key(&self, kid: &str) -> Result<KeyWithMeta, Error> {
        let keys = self.keys.read().await;
        keys.iter()
            .find(|meta| meta.key_id == kid)
            .cloned()
            .ok_or_else(|| Error::msg(ErrorKind::KeyNotFound, format!("no key with id {kid:?}")))
    }

    async fn write_key(&self, meta: KeyWithMeta) -> Result<(), Error> {
        let mut keys = self.keys.write().await;
        match keys.iter_mut().find(|stored| stored.key_id == meta.key_id) {
            Some(stored) => {
                tracing::trace!(kid = %meta.key_id, "replacing stored key");
                *stored = meta;
            }
            None => {
                tracing::trace!(kid = %meta.key_id, "storing new key");
                keys.push(meta);
            }
        }
        Ok(())
    }

    async fn delete_key(&self, kid: &str) -> Result<bool, Error> {
        let mut keys = self.keys.write().await;
        let index = keys.iter().position(|meta| meta.key_id == kid);
        if let Some(index) = index {
            tracing::trace!(kid, "deleting stored key");
            keys.remove(index);
        }
        Ok(index.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwkset::Key;

    fn secret(kid: &str, bytes: &[u8]) -> KeyWithMeta {
        KeyWithMeta::new(Key::symmetric(bytes.to_vec()), kid)
    }

    #[tokio::test]
    async fn test_write_replaces_in_place_and_keeps_order() {
        let storage = MemoryStorage::with_keys(vec![secret("a", b"1"), secret("b", b"2")]);

        storage.write_key(secret("c", b"3")).await.unwrap();
        storage.write_key(secret("a", b"4")).await.unwrap();

        let snapshot = storage.snapshot_keys().await.unwrap();
        let kids: Vec<_> = snapshot.iter().map(|meta| meta.key_id.as_str()).collect();
        assert_eq!(kids, ["a", "b", "c"]);
        assert_eq!(snapshot[0], secret("a", b"4"));
    }

    #[tokio::test]
    async fn test_read_missing_key() {
        let storage = MemoryStorage::new();
        storage.write_key(secret("present", b"x")).await.unwrap();

        assert_eq!(storage.read_key("present").await.unwrap(), secret("present", b"x"));

        let err = storage.read_key("absent").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let storage = MemoryStorage::with_keys(vec![secret("a", b"1")]);

        assert!(storage.delete_key("a").await.unwrap());
        assert!(!storage.delete_key("a").await.unwrap());
        assert!(storage.snapshot_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_not_affected_by_later_writes() {
        let storage = MemoryStorage::with_keys(vec![secret("a", b"1")]);

        let snapshot = storage.snapshot_keys().await.unwrap();
        storage.write_key(secret("b", b"2")).await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(storage.snapshot_keys().await.unwrap().len(), 2);
    }
}
