pub(crate) mod memory;

use async_trait::async_trait;
use jwkset::KeyWithMeta;

use crate::Error;

/// Abstract interface for key storage backends.
///
/// Keys are identified by their key id. Implementations must keep insertion
/// order so that key sets assembled from a snapshot are deterministic.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns a consistent, point-in-time copy of every stored key, in order.
    async fn snapshot_keys(&self) -> Result<Vec<KeyWithMeta>, Error>;

    /// Retrieve the key stored under `kid`.
    ///
    /// Fails with [`ErrorKind::KeyNotFound`](crate::ErrorKind::KeyNotFound) when there is none.
    async fn read_key(&self, kid: &str) -> Result<KeyWithMeta, Error>;

    /// Store a key, replacing any key with the same id.
    async fn write_key(&self, meta: KeyWithMeta) -> Result<(), Error>;

    /// Delete the key stored under `kid`, returning whether one was removed.
    async fn delete_key(&self, kid: &str) -> Result<bool, Error>;
}
