//! Key storage and JWK Set assembly.
//!
//! [`JwkSet`] publishes the keys held by a [`Storage`] backend as a JWK Set
//! document, and loads keys back from one. Key conversion is delegated to the
//! [`jwkset`] codec.

mod error;
mod storage;

pub use error::{Error, ErrorKind};
pub use storage::{memory::MemoryStorage, Storage};

use jwkset::{
    key_marshal, key_unmarshal, JwkMarshal, JwksMarshal, KeyMarshalOptions, KeyUnmarshalOptions,
};

/// A set of keys that can be rendered as a JWK Set.
#[derive(Debug, Default)]
pub struct JwkSet<S> {
    storage: S,
}

impl JwkSet<MemoryStorage> {
    /// Creates a key set backed by an empty [`MemoryStorage`].
    pub fn new_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<S: Storage> JwkSet<S> {
    /// Creates a key set on top of `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Marshals every stored key to its public JWK.
    ///
    /// Keys the codec cannot publish, such as symmetric secrets, are left out.
    /// Any other conversion failure aborts the whole operation.
    pub async fn marshal(&self) -> Result<JwksMarshal, Error> {
        let snapshot = self
            .storage
            .snapshot_keys()
            .await
            .map_err(|err| err.wrap("failed to read snapshot from storage"))?;

        let mut keys = Vec::with_capacity(snapshot.len());
        for meta in &snapshot {
            match key_marshal(meta, KeyMarshalOptions::public_only()) {
                Ok(jwk) => keys.push(jwk),
                Err(err) if err.kind() == jwkset::ErrorKind::UnsupportedKeyType => {
                    tracing::debug!(
                        kid = %meta.key_id,
                        kind = %err.kind(),
                        "skipping key in JWK Set"
                    );
                }
                Err(err) => {
                    let kid = meta.key_id.clone();
                    return Err(Error::from(err).wrap(format!("failed to marshal key {kid:?}")));
                }
            }
        }

        Ok(JwksMarshal { keys })
    }

    /// Returns the JWK Set document, `{"keys": [...]}`.
    pub async fn json(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(self.marshal().await?)?)
    }

    /// Returns the JWK Set document serialized as a string.
    pub async fn json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.marshal().await?)?)
    }

    /// Stores every key of a JWK Set document, returning how many were stored.
    ///
    /// Records of an unsupported type are skipped. A record with invalid
    /// parameters aborts the import; keys stored before it are kept.
    pub async fn import(&self, raw: &str, options: KeyUnmarshalOptions) -> Result<usize, Error> {
        let document: JwksMarshal = serde_json::from_str(raw)?;
        self.import_records(&document.keys, options).await
    }

    /// Creates a key set on top of `storage` and imports a JWK Set document into it.
    pub async fn from_json(
        storage: S,
        raw: &str,
        options: KeyUnmarshalOptions,
    ) -> Result<Self, Error> {
        let set = Self::new(storage);
        set.import(raw, options).await?;
        Ok(set)
    }

    async fn import_records(
        &self,
        records: &[JwkMarshal],
        options: KeyUnmarshalOptions,
    ) -> Result<usize, Error> {
        let mut stored = 0;
        for jwk in records {
            let meta = match key_unmarshal(jwk, options) {
                Ok(meta) => meta,
                Err(err) if err.kind() == jwkset::ErrorKind::UnsupportedKeyType => {
                    tracing::warn!(
                        kid = jwk.kid.as_deref().unwrap_or_default(),
                        kty = jwk.kty.as_deref().unwrap_or_default(),
                        "skipping unsupported key: {err}"
                    );
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            self.storage.write_key(meta).await?;
            stored += 1;
        }
        Ok(stored)
    }
}
