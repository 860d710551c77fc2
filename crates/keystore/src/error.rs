use core::fmt::{Debug, Display};
use std::error::Error as StdError;

use serde_json::error::Category;

/// Kind of error that can occur during key store operations.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// The error was caused by the storage backend.
    #[error("Storage failure")]
    StorageFailure,
    /// No key with the requested id is stored.
    #[error("Key not found")]
    KeyNotFound,
    /// A key could not be converted to or from its JWK.
    #[error("Codec error: {0}")]
    Codec(jwkset::ErrorKind),
    /// The JWK Set document is not valid JSON or has the wrong shape.
    #[error("The JWK Set document is malformed")]
    MalformedJson,
}

/// Represents all possible errors that can occur during key store operations.
pub struct Error {
    kind: ErrorKind,
    source: eyre::Report,
}

impl Error {
    /// Returns the kind of the error that occurred.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the lowest level error that caused this error.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        self.source.root_cause()
    }

    /// Returns the context of the error.
    pub fn context(&self) -> &(dyn StdError) {
        self.source.as_ref()
    }

    /// Wraps a backend failure. Intended for [`Storage`](crate::Storage) implementations.
    pub fn storage<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::new(ErrorKind::StorageFailure, source)
    }

    pub(crate) fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error {
            kind,
            source: eyre::Report::new(source),
        }
    }

    pub(crate) fn msg<M>(kind: ErrorKind, msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Error {
            kind,
            source: eyre::Report::msg(msg),
        }
    }

    /// Adds a layer of context, keeping the kind.
    pub(crate) fn wrap<M>(self, msg: M) -> Self
    where
        M: Display + Send + Sync + 'static,
    {
        Error {
            kind: self.kind,
            source: self.source.wrap_err(msg),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("context", &self.context())
            .field("source", &self.root_cause())
            .finish()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:#}", self.kind, self.source)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let source: &(dyn StdError + 'static) = self.source.as_ref();
        Some(source)
    }
}

impl From<jwkset::Error> for Error {
    fn from(err: jwkset::Error) -> Self {
        Error::new(ErrorKind::Codec(err.kind()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => Error::new(ErrorKind::StorageFailure, err),
            _ => Error::new(ErrorKind::MalformedJson, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_json_errors_are_malformed_json() {
        let err = serde_json::from_str::<serde_json::Value>("{\"keys\":").unwrap_err();
        let err = Error::from(err);

        assert_eq!(err.kind(), ErrorKind::MalformedJson);
    }

    #[test]
    fn test_wrap_keeps_kind_and_adds_context() {
        let err = Error::msg(ErrorKind::KeyNotFound, "no key with id \"k1\"")
            .wrap("failed to read key");

        assert_eq!(err.kind(), ErrorKind::KeyNotFound);
        assert_eq!(err.to_string(), "Key not found: failed to read key: no key with id \"k1\"");
        assert_eq!(err.root_cause().to_string(), "no key with id \"k1\"");

        let context = StdError::source(&err).unwrap();
        assert_eq!(context.to_string(), "failed to read key");
        assert_eq!(context.source().unwrap().to_string(), "no key with id \"k1\"");
    }
}
