use ed25519_dalek::{SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use super::params::{EcCurve, KeyType};

/// An elliptic-curve public key on one of the supported NIST curves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcPublicKey {
    /// P-256
    P256(p256::PublicKey),
    /// P-384
    P384(p384::PublicKey),
    /// P-521
    P521(p521::PublicKey),
}

/// An elliptic-curve private key on one of the supported NIST curves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EcPrivateKey {
    /// P-256
    P256(p256::SecretKey),
    /// P-384
    P384(p384::SecretKey),
    /// P-521
    P521(p521::SecretKey),
}

impl EcPublicKey {
    /// Decodes a point from its big-endian affine coordinates.
    ///
    /// Both coordinates must be exactly [`EcCurve::field_size`] bytes long.
    pub fn from_coordinates(
        curve: EcCurve,
        x: &[u8],
        y: &[u8],
    ) -> Result<Self, p256::elliptic_curve::Error> {
        // Uncompressed SEC1 encoding: 0x04 || x || y.
        let mut sec1 = Vec::with_capacity(1 + x.len() + y.len());
        sec1.push(0x04);
        sec1.extend_from_slice(x);
        sec1.extend_from_slice(y);

        match curve {
            EcCurve::P256 => p256::PublicKey::from_sec1_bytes(&sec1).map(Self::P256),
            EcCurve::P384 => p384::PublicKey::from_sec1_bytes(&sec1).map(Self::P384),
            EcCurve::P521 => p521::PublicKey::from_sec1_bytes(&sec1).map(Self::P521),
        }
    }

    /// The curve this key lives on.
    pub fn curve(&self) -> EcCurve {
        match self {
            EcPublicKey::P256(_) => EcCurve::P256,
            EcPublicKey::P384(_) => EcCurve::P384,
            EcPublicKey::P521(_) => EcCurve::P521,
        }
    }

    /// The big-endian affine `(x, y)` coordinates, each padded to the field size.
    pub fn coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        macro_rules! affine {
            ($key:expr) => {{
                let point = $key.to_encoded_point(false);
                (
                    point.x().map(|x| x.to_vec()).unwrap_or_default(),
                    point.y().map(|y| y.to_vec()).unwrap_or_default(),
                )
            }};
        }

        match self {
            EcPublicKey::P256(key) => affine!(key),
            EcPublicKey::P384(key) => affine!(key),
            EcPublicKey::P521(key) => affine!(key),
        }
    }
}

impl EcPrivateKey {
    /// Builds a private key from its big-endian scalar.
    ///
    /// The scalar must be exactly [`EcCurve::field_size`] bytes long.
    pub fn from_scalar(curve: EcCurve, d: &[u8]) -> Result<Self, p256::elliptic_curve::Error> {
        match curve {
            EcCurve::P256 => p256::SecretKey::from_slice(d).map(Self::P256),
            EcCurve::P384 => p384::SecretKey::from_slice(d).map(Self::P384),
            EcCurve::P521 => p521::SecretKey::from_slice(d).map(Self::P521),
        }
    }

    /// The curve this key lives on.
    pub fn curve(&self) -> EcCurve {
        match self {
            EcPrivateKey::P256(_) => EcCurve::P256,
            EcPrivateKey::P384(_) => EcCurve::P384,
            EcPrivateKey::P521(_) => EcCurve::P521,
        }
    }

    /// The public half of this key.
    pub fn public_key(&self) -> EcPublicKey {
        match self {
            EcPrivateKey::P256(key) => EcPublicKey::P256(key.public_key()),
            EcPrivateKey::P384(key) => EcPublicKey::P384(key.public_key()),
            EcPrivateKey::P521(key) => EcPublicKey::P521(key.public_key()),
        }
    }

    /// The big-endian private scalar, padded to the field size.
    pub fn scalar(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(match self {
            EcPrivateKey::P256(key) => key.to_bytes().to_vec(),
            EcPrivateKey::P384(key) => key.to_bytes().to_vec(),
            EcPrivateKey::P521(key) => key.to_bytes().to_vec(),
        })
    }
}

/// Key material that can be converted to and from a JWK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// An elliptic-curve public key.
    EcPublic(EcPublicKey),
    /// An elliptic-curve private key.
    EcPrivate(EcPrivateKey),
    /// An Ed25519 public key.
    Ed25519Public(VerifyingKey),
    /// An Ed25519 private key.
    Ed25519Private(SigningKey),
    /// An RSA public key.
    RsaPublic(RsaPublicKey),
    /// An RSA private key.
    RsaPrivate(RsaPrivateKey),
    /// Raw bytes of a symmetric secret.
    Symmetric(Zeroizing<Vec<u8>>),
}

impl Key {
    /// Wraps raw bytes as a symmetric secret.
    pub fn symmetric(bytes: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(Zeroizing::new(bytes.into()))
    }

    /// The JWK key type this key is encoded as.
    pub fn key_type(&self) -> KeyType {
        match self {
            Key::EcPublic(_) | Key::EcPrivate(_) => KeyType::Ec,
            Key::Ed25519Public(_) | Key::Ed25519Private(_) => KeyType::Okp,
            Key::RsaPublic(_) | Key::RsaPrivate(_) => KeyType::Rsa,
            Key::Symmetric(_) => KeyType::Oct,
        }
    }

    /// Whether this is an asymmetric private key.
    pub fn is_private(&self) -> bool {
        matches!(self, Key::EcPrivate(_) | Key::Ed25519Private(_) | Key::RsaPrivate(_))
    }

    /// The public counterpart of an asymmetric key.
    ///
    /// Public keys are returned unchanged; symmetric secrets have none.
    pub fn to_public(&self) -> Option<Key> {
        match self {
            Key::EcPrivate(key) => Some(Key::EcPublic(key.public_key())),
            Key::Ed25519Private(key) => Some(Key::Ed25519Public(key.verifying_key())),
            Key::RsaPrivate(key) => Some(Key::RsaPublic(key.to_public_key())),
            Key::EcPublic(_) | Key::Ed25519Public(_) | Key::RsaPublic(_) => Some(self.clone()),
            Key::Symmetric(_) => None,
        }
    }
}

macro_rules! impl_from {
    ($($source:ty => $variant:expr),+ $(,)?) => {
        $(
            impl From<$source> for Key {
                #[inline(always)]
                fn from(key: $source) -> Self {
                    $variant(key)
                }
            }
        )+
    };
}

impl_from! {
    EcPublicKey => Key::EcPublic,
    EcPrivateKey => Key::EcPrivate,
    VerifyingKey => Key::Ed25519Public,
    SigningKey => Key::Ed25519Private,
    RsaPublicKey => Key::RsaPublic,
    RsaPrivateKey => Key::RsaPrivate,
}

macro_rules! impl_from_ec {
    ($($curve:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$curve::PublicKey> for Key {
                fn from(key: $curve::PublicKey) -> Self {
                    Key::EcPublic(EcPublicKey::$variant(key))
                }
            }

            impl From<$curve::SecretKey> for Key {
                fn from(key: $curve::SecretKey) -> Self {
                    Key::EcPrivate(EcPrivateKey::$variant(key))
                }
            }
        )+
    };
}

impl_from_ec! {
    p256 => P256,
    p384 => P384,
    p521 => P521,
}

/// A key paired with its identifier.
///
/// The key id is opaque and may be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyWithMeta {
    /// The key material.
    pub key: Key,
    /// The key identifier, copied to and from the `kid` parameter.
    pub key_id: String,
}

impl KeyWithMeta {
    /// Creates a new `KeyWithMeta`.
    pub fn new(key: impl Into<Key>, key_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            key_id: key_id.into(),
        }
    }
}
