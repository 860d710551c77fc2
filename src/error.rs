use core::fmt::{Debug, Display};
use std::error::Error as StdError;

use crate::jwk::KeyType;

/// Kind of error that can occur while converting keys to and from JWKs.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The JWK's attributes are missing, malformed or inconsistent for its declared type.
    #[error("unable to unmarshal JWK due to invalid attributes")]
    KeyUnmarshalParameter,
    /// The key type, curve or requested conversion is not supported.
    #[error("unsupported key type")]
    UnsupportedKeyType,
}

/// Represents all possible errors returned by the codec.
///
/// Callers should branch on [`Error::kind`]. The key type and the offending
/// JWK parameter are kept alongside so a failure can be diagnosed without
/// decoding the record again.
pub struct Error {
    kind: ErrorKind,
    key_type: Option<KeyType>,
    parameter: Option<&'static str>,
    source: eyre::Report,
}

impl Error {
    /// Returns the kind of the error that occurred.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the key type being processed when the error occurred, if known.
    pub fn key_type(&self) -> Option<KeyType> {
        self.key_type
    }

    /// Returns the name of the JWK parameter that caused the error, if any.
    pub fn parameter(&self) -> Option<&'static str> {
        self.parameter
    }

    /// Returns the lowest level error that caused this error.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        self.source.root_cause()
    }

    pub(crate) fn msg<M>(kind: ErrorKind, msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Error {
            kind,
            key_type: None,
            parameter: None,
            source: eyre::Report::msg(msg),
        }
    }

    pub(crate) fn unsupported<M>(msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::msg(ErrorKind::UnsupportedKeyType, msg)
    }

    /// A required parameter is absent or holds an invalid value.
    pub(crate) fn bad_parameter<M>(key_type: KeyType, parameter: &'static str, msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::msg(ErrorKind::KeyUnmarshalParameter, msg)
            .with_key_type(key_type)
            .with_parameter(parameter)
    }

    /// A parameter was present but could not be decoded or validated.
    pub(crate) fn invalid<E>(key_type: KeyType, parameter: &'static str, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error {
            kind: ErrorKind::KeyUnmarshalParameter,
            key_type: Some(key_type),
            parameter: Some(parameter),
            source: eyre::Report::new(source)
                .wrap_err(format!(r#"failed to decode {key_type} key parameter "{parameter}""#)),
        }
    }

    pub(crate) fn with_key_type(mut self, key_type: KeyType) -> Self {
        self.key_type = Some(key_type);
        self
    }

    pub(crate) fn with_parameter(mut self, parameter: &'static str) -> Self {
        self.parameter = Some(parameter);
        self
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("key_type", &self.key_type)
            .field("parameter", &self.parameter)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_carries_context() {
        let err = Error::bad_parameter(KeyType::Ec, "x", r#"EC requires parameter "x""#);

        assert_eq!(err.kind(), ErrorKind::KeyUnmarshalParameter);
        assert_eq!(err.key_type(), Some(KeyType::Ec));
        assert_eq!(err.parameter(), Some("x"));
        assert_eq!(
            err.to_string(),
            r#"unable to unmarshal JWK due to invalid attributes: EC requires parameter "x""#
        );
    }

    #[test]
    fn test_invalid_error_keeps_source_chain() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad byte");
        let err = Error::invalid(KeyType::Oct, "k", source);

        assert_eq!(err.kind(), ErrorKind::KeyUnmarshalParameter);
        assert_eq!(err.root_cause().to_string(), "bad byte");
        assert!(err.to_string().contains(r#"failed to decode oct key parameter "k""#));
        assert!(err.to_string().ends_with("bad byte"));
    }

    #[test]
    fn test_source_chain_walks_each_layer() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad byte");
        let err = Error::invalid(KeyType::Rsa, "n", source);

        let context = StdError::source(&err).unwrap();
        assert_eq!(context.to_string(), r#"failed to decode RSA key parameter "n""#);

        let cause = context.source().unwrap();
        assert_eq!(cause.to_string(), "bad byte");
        assert!(cause.source().is_none());
    }

    #[test]
    fn test_unsupported_error_has_no_parameter() {
        let err = Error::unsupported("RSA-OAEP");

        assert_eq!(err.kind(), ErrorKind::UnsupportedKeyType);
        assert_eq!(err.key_type(), None);
        assert_eq!(err.parameter(), None);
    }
}
