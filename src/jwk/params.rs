use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// JSON Web Key Types, as registered in [RFC7518 Section 6.1].
///
/// [RFC7518 Section 6.1]: https://www.rfc-editor.org/rfc/rfc7518#section-6.1
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Elliptic curve keys.
    #[serde(rename = "EC")]
    Ec,

    /// Octet key pairs, i.e. Edwards-curve keys ([RFC8037]).
    ///
    /// [RFC8037]: https://www.rfc-editor.org/rfc/rfc8037
    #[serde(rename = "OKP")]
    Okp,

    /// RSA keys.
    #[serde(rename = "RSA")]
    Rsa,

    /// Octet sequences, used for symmetric secrets such as HMAC keys.
    #[serde(rename = "oct")]
    Oct,
}

impl KeyType {
    /// The wire value of the `kty` parameter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ec => "EC",
            KeyType::Okp => "OKP",
            KeyType::Rsa => "RSA",
            KeyType::Oct => "oct",
        }
    }
}

/// JSON Web Key curves from [RFC7518 Section 6.2.1.1] and [RFC8037 Section 2].
///
/// [RFC7518 Section 6.2.1.1]: https://www.rfc-editor.org/rfc/rfc7518#section-6.2.1.1
/// [RFC8037 Section 2]: https://www.rfc-editor.org/rfc/rfc8037#section-2
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// P-256
    #[serde(rename = "P-256")]
    P256,

    /// P-384
    #[serde(rename = "P-384")]
    P384,

    /// P-521
    #[serde(rename = "P-521")]
    P521,

    /// Ed25519
    Ed25519,
}

impl Curve {
    /// The wire value of the `crv` parameter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::Ed25519 => "Ed25519",
        }
    }

    /// The key type this curve belongs to.
    pub const fn key_type(&self) -> KeyType {
        match self {
            Curve::P256 | Curve::P384 | Curve::P521 => KeyType::Ec,
            Curve::Ed25519 => KeyType::Okp,
        }
    }

}

/// The NIST curves usable with `EC` keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// P-256
    P256,
    /// P-384
    P384,
    /// P-521
    P521,
}

impl EcCurve {
    /// The wire value of the `crv` parameter.
    pub const fn as_str(&self) -> &'static str {
        self.curve().as_str()
    }

    /// The general curve identifier.
    pub const fn curve(&self) -> Curve {
        match self {
            EcCurve::P256 => Curve::P256,
            EcCurve::P384 => Curve::P384,
            EcCurve::P521 => Curve::P521,
        }
    }

    /// Size in bytes of a field element (coordinate or scalar) on this curve.
    pub const fn field_size(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }
}

impl From<EcCurve> for Curve {
    fn from(curve: EcCurve) -> Self {
        curve.curve()
    }
}

impl TryFrom<Curve> for EcCurve {
    type Error = Error;

    fn try_from(curve: Curve) -> Result<Self, Self::Error> {
        match curve {
            Curve::P256 => Ok(EcCurve::P256),
            Curve::P384 => Ok(EcCurve::P384),
            Curve::P521 => Ok(EcCurve::P521),
            Curve::Ed25519 => Err(Error::unsupported(format!("{curve} is not an EC curve"))),
        }
    }
}

/// Algorithm hints carried in the `alg` parameter.
///
/// Only the algorithm emitted by the codec is represented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// EdDSA signature algorithms ([RFC8037 Section 3.1]).
    ///
    /// [RFC8037 Section 3.1]: https://www.rfc-editor.org/rfc/rfc8037#section-3.1
    #[serde(rename = "EdDSA")]
    EdDsa,
}

impl Algorithm {
    /// The wire value of the `alg` parameter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::EdDsa => "EdDSA",
        }
    }
}

macro_rules! wire_string {
    ($ty:ty, $what:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| Error::unsupported(format!("unknown {} {s:?}", $what)))
            }
        }
    };
}

wire_string!(KeyType, "key type", [KeyType::Ec, KeyType::Okp, KeyType::Rsa, KeyType::Oct]);
wire_string!(Curve, "curve", [Curve::P256, Curve::P384, Curve::P521, Curve::Ed25519]);
wire_string!(EcCurve, "EC curve", [EcCurve::P256, EcCurve::P384, EcCurve::P521]);
wire_string!(Algorithm, "algorithm", [Algorithm::EdDsa]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_key_types_round_trip_through_wire_strings() {
        use KeyType::*;

        let input = vec![Ec, Okp, Rsa, Oct];
        let ser = serde_json::to_string(&input).expect("serialization failed");

        assert_eq!(ser, r#"["EC","OKP","RSA","oct"]"#);
        let de: Vec<KeyType> = serde_json::from_str(&ser).expect("deserialization failed");
        assert_eq!(de, input);

        for kty in input {
            assert_eq!(kty.to_string().parse::<KeyType>().unwrap(), kty);
        }
    }

    #[test]
    fn test_curves_round_trip_through_wire_strings() {
        use Curve::*;

        let input = vec![P256, P384, P521, Ed25519];
        let ser = serde_json::to_string(&input).expect("serialization failed");

        assert_eq!(ser, r#"["P-256","P-384","P-521","Ed25519"]"#);
        for crv in input {
            assert_eq!(crv.as_str().parse::<Curve>().unwrap(), crv);
        }
    }

    #[test]
    fn test_wire_strings_are_case_sensitive() {
        // "oct" is lower case on the wire, the others are upper case.
        assert!("OCT".parse::<KeyType>().is_err());
        assert!("ec".parse::<KeyType>().is_err());
        assert!("p-256".parse::<Curve>().is_err());
        assert!("eddsa".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_unknown_wire_string_is_unsupported() {
        let err = "X25519".parse::<Curve>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedKeyType);

        let err = "AKP".parse::<KeyType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedKeyType);
    }

    #[test]
    fn test_curve_metadata() {
        assert_eq!(EcCurve::P521.field_size(), 66);
        assert_eq!(Curve::P384.key_type(), KeyType::Ec);
        assert_eq!(Curve::Ed25519.key_type(), KeyType::Okp);
        assert_eq!(Algorithm::EdDsa.to_string(), "EdDSA");
    }

    #[test]
    fn test_ec_curves_exclude_edwards_curves() {
        assert_eq!("P-384".parse::<EcCurve>().unwrap(), EcCurve::P384);
        assert_eq!(Curve::from(EcCurve::P521), Curve::P521);
        assert_eq!(EcCurve::try_from(Curve::P256).unwrap(), EcCurve::P256);

        let err = "Ed25519".parse::<EcCurve>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedKeyType);
        assert!(EcCurve::try_from(Curve::Ed25519).is_err());
    }
}
