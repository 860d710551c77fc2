use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use super::encoding::{encode, encode_biguint, encode_uint_bytes};
use super::key::{EcPublicKey, Key, KeyWithMeta};
use super::params::{Algorithm, Curve, KeyType};
use super::record::{JwkMarshal, OtherPrimes};
use super::rsa_crt;
use crate::error::Error;

/// Options controlling which key material [`key_marshal`] may emit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMarshalOptions {
    /// Emit private parameters (`d` and the RSA CRT parameters).
    pub asymmetric_private: bool,
    /// Permit raw bytes to be encoded as `oct` keys.
    pub symmetric: bool,
}

impl KeyMarshalOptions {
    /// Public parameters only. This is the default.
    pub const fn public_only() -> Self {
        Self {
            asymmetric_private: false,
            symmetric: false,
        }
    }

    /// Public and private asymmetric parameters.
    pub const fn private() -> Self {
        Self {
            asymmetric_private: true,
            symmetric: false,
        }
    }

    /// Everything, including symmetric secrets.
    pub const fn all() -> Self {
        Self {
            asymmetric_private: true,
            symmetric: true,
        }
    }
}

/// Transforms a key into its JWK wire record.
///
/// The public parameters are always emitted. Private parameters are only
/// emitted with [`KeyMarshalOptions::asymmetric_private`], and symmetric keys
/// are refused with [`ErrorKind::UnsupportedKeyType`] unless
/// [`KeyMarshalOptions::symmetric`] is set.
///
/// [`ErrorKind::UnsupportedKeyType`]: crate::ErrorKind::UnsupportedKeyType
pub fn key_marshal(meta: &KeyWithMeta, options: KeyMarshalOptions) -> Result<JwkMarshal, Error> {
    let mut jwk = match &meta.key {
        Key::EcPublic(key) => ec_public(key),
        Key::EcPrivate(key) => {
            let mut jwk = ec_public(&key.public_key());
            if options.asymmetric_private {
                jwk.d = Some(encode_uint_bytes(&key.scalar()));
            }
            jwk
        }
        Key::Ed25519Public(key) => okp_public(key.as_bytes()),
        Key::Ed25519Private(key) => {
            let mut jwk = okp_public(key.verifying_key().as_bytes());
            if options.asymmetric_private {
                // Only the seed half of the keypair goes on the wire.
                jwk.d = Some(encode(key.as_bytes()));
            }
            jwk
        }
        Key::RsaPublic(key) => rsa_public(key),
        Key::RsaPrivate(key) => {
            let mut jwk = rsa_public(key.as_ref());
            if options.asymmetric_private {
                rsa_private(&mut jwk, key)?;
            }
            jwk
        }
        Key::Symmetric(secret) => {
            if !options.symmetric {
                return Err(Error::unsupported("incorrect options to marshal symmetric key (oct)")
                    .with_key_type(KeyType::Oct));
            }
            JwkMarshal {
                kty: Some(KeyType::Oct.to_string()),
                k: Some(encode(secret)),
                ..Default::default()
            }
        }
    };

    jwk.kid = Some(meta.key_id.clone()).filter(|kid| !kid.is_empty());
    Ok(jwk)
}

fn ec_public(key: &EcPublicKey) -> JwkMarshal {
    let (x, y) = key.coordinates();
    JwkMarshal {
        kty: Some(KeyType::Ec.to_string()),
        crv: Some(key.curve().to_string()),
        x: Some(encode_uint_bytes(&x)),
        y: Some(encode_uint_bytes(&y)),
        ..Default::default()
    }
}

fn okp_public(x: &[u8]) -> JwkMarshal {
    JwkMarshal {
        kty: Some(KeyType::Okp.to_string()),
        crv: Some(Curve::Ed25519.to_string()),
        alg: Some(Algorithm::EdDsa.to_string()),
        x: Some(encode(x)),
        ..Default::default()
    }
}

fn rsa_public(key: &RsaPublicKey) -> JwkMarshal {
    JwkMarshal {
        kty: Some(KeyType::Rsa.to_string()),
        n: Some(encode_biguint(key.n())),
        e: Some(encode_biguint(key.e())),
        ..Default::default()
    }
}

fn rsa_private(jwk: &mut JwkMarshal, key: &RsaPrivateKey) -> Result<(), Error> {
    let primes = key.primes();
    let [p, q, others @ ..] = primes else {
        return Err(Error::unsupported("RSA private key has fewer than two primes")
            .with_key_type(KeyType::Rsa));
    };
    let d = key.d();

    jwk.d = Some(encode_biguint(d));
    jwk.p = Some(encode_biguint(p));
    jwk.q = Some(encode_biguint(q));
    jwk.dp = Some(encode_biguint(&rsa_crt::exponent(d, p)));
    jwk.dq = Some(encode_biguint(&rsa_crt::exponent(d, q)));
    jwk.qi = Some(encode_biguint(&rsa_crt::inverse(q, p)));

    let mut product: BigUint = p * q;
    for r in others {
        jwk.oth.push(OtherPrimes {
            d: Some(encode_biguint(&rsa_crt::exponent(d, r))),
            r: Some(encode_biguint(r)),
            t: Some(encode_biguint(&rsa_crt::inverse(&product, r))),
        });
        product *= r;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::jwk::key::EcPrivateKey;
    use crate::jwk::params::EcCurve;
    use ed25519_dalek::SigningKey;

    const SEED: &[u8; 32] = b"Sample seed bytes of thirtytwo!b";
    const PUBLIC_HEX: &str = "412328b0201b71d0144a27d028057b6fdf58d22e0f3baaebaa5388140e57bbbd";

    #[test]
    fn test_ed25519_public_exact_output() {
        let public = SigningKey::from_bytes(SEED).verifying_key();
        let meta = KeyWithMeta::new(public, "k1");

        let jwk = key_marshal(&meta, KeyMarshalOptions::default()).unwrap();

        assert_eq!(
            jwk.to_json().unwrap(),
            format!(
                r#"{{"kty":"OKP","crv":"Ed25519","alg":"EdDSA","x":"{}","kid":"k1"}}"#,
                encode(public.as_bytes())
            )
        );
    }

    #[test]
    fn test_ed25519_private_emits_seed_only_when_requested() {
        let meta = KeyWithMeta::new(SigningKey::from_bytes(SEED), "k1");

        let public = key_marshal(&meta, KeyMarshalOptions::public_only()).unwrap();
        assert!(public.d.is_none());
        assert_eq!(
            public.x.as_deref(),
            Some(encode(&hex::decode(PUBLIC_HEX).unwrap()).as_str())
        );

        let private = key_marshal(&meta, KeyMarshalOptions::private()).unwrap();
        assert_eq!(private.d.as_deref(), Some(encode(SEED).as_str()));
        assert_eq!(private.x, public.x);
    }

    #[test]
    fn test_ec_private_keeps_public_coordinates() {
        let secret = EcPrivateKey::from_scalar(EcCurve::P384, &[9u8; 48]).unwrap();
        let meta = KeyWithMeta::new(secret, "");

        let public = key_marshal(&meta, KeyMarshalOptions::public_only()).unwrap();
        assert_eq!(public.kty.as_deref(), Some("EC"));
        assert_eq!(public.crv.as_deref(), Some("P-384"));
        assert!(public.x.is_some() && public.y.is_some());
        assert!(public.d.is_none());
        assert!(public.kid.is_none());
        assert!(public.alg.is_none());

        let private = key_marshal(&meta, KeyMarshalOptions::private()).unwrap();
        assert_eq!(private.d.as_deref(), Some(encode(&[9u8; 48]).as_str()));
        assert_eq!((private.x, private.y), (public.x, public.y));
    }

    #[test]
    fn test_symmetric_requires_option() {
        let meta = KeyWithMeta::new(Key::symmetric(b"hello".to_vec()), "hmac");

        let err = key_marshal(&meta, KeyMarshalOptions::private()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedKeyType);
        assert_eq!(err.key_type(), Some(KeyType::Oct));

        let jwk = key_marshal(&meta, KeyMarshalOptions::all()).unwrap();
        assert_eq!(jwk.to_json().unwrap(), r#"{"kty":"oct","k":"aGVsbG8","kid":"hmac"}"#);
    }

    #[test]
    fn test_rsa_public_parameters() {
        let n = "c5b3a1f1d2e4f6a8b9c7d5e3f1a2b4c6d8e0f1a3b5c7d9e1f3a5b7c9d1e3f5a7";
        let n = BigUint::from_bytes_be(&hex::decode(n).unwrap());
        let key = RsaPublicKey::new_unchecked(n.clone(), BigUint::from(65537u32));
        let meta = KeyWithMeta::new(key, "rsa");

        let jwk = key_marshal(&meta, KeyMarshalOptions::all()).unwrap();

        assert_eq!(jwk.kty.as_deref(), Some("RSA"));
        assert_eq!(jwk.e.as_deref(), Some("AQAB"));
        assert_eq!(jwk.n.as_deref(), Some(encode_biguint(&n).as_str()));
        assert!(jwk.d.is_none() && jwk.p.is_none() && jwk.oth.is_empty());
    }
}
