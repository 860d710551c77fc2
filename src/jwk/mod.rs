//! This module converts keys to and from JSON Web Keys (JWKs).
//!
//! ## Submodules
//!
//! - [`encoding`]:  base64url and big-integer encoding shared by every parameter.
//! - [`key`]:       the key types the codec understands.
//! - [`marshal`]:   key to JWK conversion.
//! - [`params`]:    the `kty`, `crv` and `alg` vocabularies.
//! - [`record`]:    the JWK and JWK Set wire records.
//! - [`unmarshal`]: JWK to key conversion.

pub mod encoding;
pub mod key;
pub mod marshal;
pub mod params;
pub mod record;
mod rsa_crt;
pub mod unmarshal;

// Re-exports
pub use key::{EcPrivateKey, EcPublicKey, Key, KeyWithMeta};
pub use marshal::{key_marshal, KeyMarshalOptions};
pub use params::{Algorithm, Curve, EcCurve, KeyType};
pub use record::{JwkMarshal, JwksMarshal, OtherPrimes};
pub use unmarshal::{key_unmarshal, KeyUnmarshalOptions};
