use ed25519_dalek::{SigningKey, VerifyingKey, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::encoding::{decode, decode_biguint, left_pad};
use super::key::{EcPrivateKey, EcPublicKey, Key, KeyWithMeta};
use super::params::{Curve, EcCurve, KeyType};
use super::record::JwkMarshal;
use super::rsa_crt;
use crate::error::Error;

/// Largest RSA modulus accepted on decode, in bits.
pub const MAX_RSA_MODULUS_BITS: usize = 16384;

/// Options controlling which keys [`key_unmarshal`] may reconstruct.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyUnmarshalOptions {
    /// Reconstruct private keys when the record carries private parameters.
    pub asymmetric_private: bool,
    /// Permit `oct` records to be decoded.
    pub symmetric: bool,
}

impl KeyUnmarshalOptions {
    /// Public keys only. This is the default.
    pub const fn public_only() -> Self {
        Self {
            asymmetric_private: false,
            symmetric: false,
        }
    }

    /// Public and private asymmetric keys.
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

/// Transforms a JWK wire record into a key.
///
/// Fails with [`ErrorKind::KeyUnmarshalParameter`] when a parameter required
/// by the record's `kty` is missing, undecodable or inconsistent, and with
/// [`ErrorKind::UnsupportedKeyType`] when the `kty`, the OKP curve or the
/// requested reconstruction is not supported.
///
/// [`ErrorKind::KeyUnmarshalParameter`]: crate::ErrorKind::KeyUnmarshalParameter
/// [`ErrorKind::UnsupportedKeyType`]: crate::ErrorKind::UnsupportedKeyType
pub fn key_unmarshal(jwk: &JwkMarshal, options: KeyUnmarshalOptions) -> Result<KeyWithMeta, Error> {
    let kty: KeyType = jwk.kty.as_deref().unwrap_or_default().parse()?;

    let key = match kty {
        KeyType::Ec => ec(jwk, options)?,
        KeyType::Okp => okp(jwk, options)?,
        KeyType::Rsa => rsa(jwk, options)?,
        KeyType::Oct => oct(jwk, options)?,
    };

    Ok(KeyWithMeta {
        key,
        key_id: jwk.kid.clone().unwrap_or_default(),
    })
}

fn ec(jwk: &JwkMarshal, options: KeyUnmarshalOptions) -> Result<Key, Error> {
    const KTY: KeyType = KeyType::Ec;

    let crv = require(KTY, "crv", &jwk.crv)?;
    let x = decode_param(KTY, "x", require(KTY, "x", &jwk.x)?)?;
    let y = decode_param(KTY, "y", require(KTY, "y", &jwk.y)?)?;

    let curve: EcCurve = crv
        .parse()
        .map_err(|_| Error::bad_parameter(KTY, "crv", format!("unsupported curve type {crv:?}")))?;

    let size = curve.field_size();
    let x = pad_field(KTY, "x", &x, size)?;
    let y = pad_field(KTY, "y", &y, size)?;
    let public = EcPublicKey::from_coordinates(curve, &x, &y)
        .map_err(|_| Error::bad_parameter(KTY, "x", format!("point is not on curve {curve}")))?;

    let d = match optional(&jwk.d) {
        Some(d) if options.asymmetric_private => Zeroizing::new(decode_param(KTY, "d", d)?),
        _ => return Ok(Key::EcPublic(public)),
    };
    let d = Zeroizing::new(pad_field(KTY, "d", &d, size)?);
    let private =
        EcPrivateKey::from_scalar(curve, &d).map_err(|err| Error::invalid(KTY, "d", err))?;
    if private.public_key() != public {
        return Err(Error::bad_parameter(
            KTY,
            "d",
            "private scalar does not match the public point",
        ));
    }

    Ok(Key::EcPrivate(private))
}

fn okp(jwk: &JwkMarshal, options: KeyUnmarshalOptions) -> Result<Key, Error> {
    const KTY: KeyType = KeyType::Okp;

    if optional(&jwk.crv) != Some(Curve::Ed25519.as_str()) {
        let msg = format!("{KTY} key type should have {:?} curve", Curve::Ed25519.as_str());
        return Err(Error::unsupported(msg)
            .with_key_type(KTY)
            .with_parameter("crv"));
    }

    let x = decode_param(KTY, "x", require(KTY, "x", &jwk.x)?)?;
    let x: [u8; PUBLIC_KEY_LENGTH] = x.as_slice().try_into().map_err(|_| {
        let msg = format!("{KTY} public key should be {PUBLIC_KEY_LENGTH} bytes");
        Error::bad_parameter(KTY, "x", msg)
    })?;
    let public = VerifyingKey::from_bytes(&x).map_err(|err| Error::invalid(KTY, "x", err))?;

    let seed = match optional(&jwk.d) {
        Some(d) if options.asymmetric_private => Zeroizing::new(decode_param(KTY, "d", d)?),
        _ => return Ok(Key::Ed25519Public(public)),
    };
    if seed.len() != SECRET_KEY_LENGTH {
        return Err(Error::bad_parameter(
            KTY,
            "d",
            format!("{KTY} private key should be {SECRET_KEY_LENGTH} bytes"),
        ));
    }

    // The keypair is the seed followed by the public key from the record.
    let mut keypair = Zeroizing::new([0u8; KEYPAIR_LENGTH]);
    keypair[..SECRET_KEY_LENGTH].copy_from_slice(&seed);
    keypair[SECRET_KEY_LENGTH..].copy_from_slice(&x);
    let private =
        SigningKey::from_keypair_bytes(&keypair).map_err(|err| Error::invalid(KTY, "d", err))?;

    Ok(Key::Ed25519Private(private))
}

fn rsa(jwk: &JwkMarshal, options: KeyUnmarshalOptions) -> Result<Key, Error> {
    const KTY: KeyType = KeyType::Rsa;

    let n = decode_uint(KTY, "n", require(KTY, "n", &jwk.n)?)?;
    let e = decode_uint(KTY, "e", require(KTY, "e", &jwk.e)?)?;
    let public = RsaPublicKey::new_with_max_size(n.clone(), e.clone(), MAX_RSA_MODULUS_BITS)
        .map_err(|err| Error::invalid(KTY, "n", err))?;

    let private = (
        optional(&jwk.d),
        optional(&jwk.p),
        optional(&jwk.q),
        optional(&jwk.dp),
        optional(&jwk.dq),
        optional(&jwk.qi),
    );
    let (d, p, q, dp, dq, qi) = match private {
        (Some(d), Some(p), Some(q), Some(dp), Some(dq), Some(qi)) if options.asymmetric_private => (
            decode_uint(KTY, "d", d)?,
            decode_uint(KTY, "p", p)?,
            decode_uint(KTY, "q", q)?,
            decode_uint(KTY, "dp", dp)?,
            decode_uint(KTY, "dq", dq)?,
            decode_uint(KTY, "qi", qi)?,
        ),
        _ => return Ok(Key::RsaPublic(public)),
    };

    // Additional primes, each with its CRT exponent and coefficient.
    let mut others = Vec::with_capacity(jwk.oth.len());
    for other in &jwk.oth {
        let triple = (optional(&other.r), optional(&other.d), optional(&other.t));
        let (Some(r), Some(exp), Some(coeff)) = triple else {
            return Err(Error::bad_parameter(
                KTY,
                "oth",
                format!(r#"{KTY} requires parameters "r", "d", and "t" for each "oth""#),
            ));
        };
        others.push((
            decode_uint(KTY, "r", r)?,
            decode_uint(KTY, "d", exp)?,
            decode_uint(KTY, "t", coeff)?,
        ));
    }

    let mut primes = vec![p.clone(), q.clone()];
    primes.extend(others.iter().map(|(r, _, _)| r.clone()));

    let key = RsaPrivateKey::from_components(n, e, d.clone(), primes)
        .map_err(|err| Error::invalid(KTY, "d", err))?;
    key.validate().map_err(|err| Error::invalid(KTY, "d", err))?;

    if dp != rsa_crt::exponent(&d, &p) {
        return Err(Error::bad_parameter(
            KTY,
            "dp",
            "first factor CRT exponent is inconsistent",
        ));
    }
    if dq != rsa_crt::exponent(&d, &q) {
        return Err(Error::bad_parameter(
            KTY,
            "dq",
            "second factor CRT exponent is inconsistent",
        ));
    }
    if !rsa_crt::is_inverse(&q, &qi, &p) {
        return Err(Error::bad_parameter(KTY, "qi", "first CRT coefficient is inconsistent"));
    }

    let mut product: BigUint = &p * &q;
    for (r, exp, coeff) in &others {
        if *exp != rsa_crt::exponent(&d, r) || !rsa_crt::is_inverse(&product, coeff, r) {
            return Err(Error::bad_parameter(KTY, "oth", "other prime CRT values are inconsistent"));
        }
        product *= r;
    }

    Ok(Key::RsaPrivate(key))
}

fn oct(jwk: &JwkMarshal, options: KeyUnmarshalOptions) -> Result<Key, Error> {
    const KTY: KeyType = KeyType::Oct;

    if !options.symmetric {
        let msg = format!("incorrect options to unmarshal symmetric key ({KTY})");
        return Err(Error::unsupported(msg).with_key_type(KTY));
    }

    let k = decode_param(KTY, "k", require(KTY, "k", &jwk.k)?)?;
    Ok(Key::Symmetric(Zeroizing::new(k)))
}

/// An empty string is treated the same as an absent parameter.
fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn require<'a>(
    kty: KeyType,
    name: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, Error> {
    optional(value).ok_or_else(|| {
        Error::bad_parameter(kty, name, format!(r#"{kty} requires parameter "{name}""#))
    })
}

/// Left-pads a field element to the curve size, rejecting longer values.
fn pad_field(
    kty: KeyType,
    name: &'static str,
    bytes: &[u8],
    size: usize,
) -> Result<Vec<u8>, Error> {
    left_pad(bytes, size).ok_or_else(|| {
        Error::bad_parameter(kty, name, format!("value is longer than {size} bytes"))
    })
}

fn decode_param(kty: KeyType, name: &'static str, value: &str) -> Result<Vec<u8>, Error> {
    decode(value).map_err(|err| Error::invalid(kty, name, err))
}

fn decode_uint(kty: KeyType, name: &'static str, value: &str) -> Result<BigUint, Error> {
    decode_biguint(value).map_err(|err| Error::invalid(kty, name, err))
}
