/*! # jwkset

This library converts native cryptographic keys to and from JSON Web Keys.

## Supported keys

- **EC**: P-256, P-384 and P-521 public and private keys.
- **OKP**: Ed25519 public and private keys.
- **RSA**: public keys and private keys, including multi-prime keys.
- **oct**: raw symmetric secrets, only when explicitly requested.

The codec is stateless: [`key_marshal`] and [`key_unmarshal`] read only their
arguments, never log and never perform I/O.

```
use jwkset::{key_marshal, KeyMarshalOptions, KeyWithMeta, Key};

let secret = b"not a very good secret".to_vec();
let meta = KeyWithMeta::new(Key::symmetric(secret), "hmac-1");
let jwk = key_marshal(&meta, KeyMarshalOptions::all()).unwrap();
assert_eq!(jwk.kty.as_deref(), Some("oct"));
```
*/
pub mod error;
pub mod jwk;

pub use error::{Error, ErrorKind};
pub use jwk::{
    key_marshal, key_unmarshal, Algorithm, Curve, EcCurve, EcPrivateKey, EcPublicKey, JwkMarshal,
    JwksMarshal, Key, KeyMarshalOptions, KeyType, KeyUnmarshalOptions, KeyWithMeta, OtherPrimes,
};
