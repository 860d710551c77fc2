use serde::{Deserialize, Serialize};

/// CRT parameters of one additional prime of a multi-prime RSA private key.
///
/// This type is defined in [RFC7518 Section 6.3.2.7].
///
/// [RFC7518 Section 6.3.2.7]: https://www.rfc-editor.org/rfc/rfc7518#section-6.3.2.7
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherPrimes {
    /// Factor CRT exponent, `d mod (r - 1)`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub d: Option<String>,

    /// Prime factor.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub r: Option<String>,

    /// Factor CRT coefficient.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub t: Option<String>,
}

/// The wire form of a JSON Web Key.
///
/// Every parameter is optional and only present when relevant to the key
/// type. Values are kept as their JSON strings; [`key_unmarshal`] decodes and
/// validates them, so a set containing keys this crate does not understand
/// still parses. Unknown members are ignored.
///
/// See [RFC7517 Section 4], [RFC7518 Section 6] and [RFC8037 Section 2].
///
/// [`key_unmarshal`]: crate::key_unmarshal
/// [RFC7517 Section 4]: https://www.rfc-editor.org/rfc/rfc7517#section-4
/// [RFC7518 Section 6]: https://www.rfc-editor.org/rfc/rfc7518#section-6
/// [RFC8037 Section 2]: https://www.rfc-editor.org/rfc/rfc8037#section-2
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkMarshal {
    /// Key type.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kty: Option<String>,

    /// Curve of an EC or OKP key.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub crv: Option<String>,

    /// Algorithm hint.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alg: Option<String>,

    /// Public x coordinate (EC) or public key (OKP).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub x: Option<String>,

    /// Public y coordinate (EC).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub y: Option<String>,

    /// Private scalar (EC), seed (OKP) or private exponent (RSA).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub d: Option<String>,

    /// RSA modulus.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub n: Option<String>,

    /// RSA public exponent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub e: Option<String>,

    /// RSA first prime factor.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub p: Option<String>,

    /// RSA second prime factor.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub q: Option<String>,

    /// RSA first factor CRT exponent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dp: Option<String>,

    /// RSA second factor CRT exponent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dq: Option<String>,

    /// RSA first CRT coefficient.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub qi: Option<String>,

    /// RSA other primes info.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub oth: Vec<OtherPrimes>,

    /// Symmetric key value.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub k: Option<String>,

    /// Key identifier.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kid: Option<String>,
}

impl JwkMarshal {
    /// Parses a single JWK from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes this JWK to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A set of JSON Web Keys, as defined in [RFC7517 Section 5].
///
/// Keys keep the order in which they were inserted.
///
/// [RFC7517 Section 5]: https://datatracker.ietf.org/doc/html/rfc7517#section-5
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwksMarshal {
    /// The keys in the set.
    #[serde(default)]
    pub keys: Vec<JwkMarshal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_parameters_are_not_serialized() {
        let jwk = JwkMarshal {
            kty: Some("oct".to_owned()),
            k: Some("c2VjcmV0".to_owned()),
            ..Default::default()
        };

        assert_eq!(jwk.to_json().unwrap(), r#"{"kty":"oct","k":"c2VjcmV0"}"#);
    }

    #[test]
    fn test_unknown_members_are_ignored() {
        let jwk = JwkMarshal::from_json(
            r#"{
                "kty": "EC",
                "crv": "P-256",
                "use": "sig",
                "key_ops": ["verify"],
                "x5t#S256": "ignored",
                "x": "f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU",
                "y": "x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0",
                "kid": "RFC 7515 A.3 example key"
            }"#,
        )
        .unwrap();

        assert_eq!(jwk.kty.as_deref(), Some("EC"));
        assert_eq!(jwk.crv.as_deref(), Some("P-256"));
        assert!(jwk.d.is_none());
        assert!(jwk.oth.is_empty());
    }

    #[test]
    fn test_other_primes() {
        let raw = r#"{"kty":"RSA","oth":[{"r":"Cw","d":"Aw","t":"Bw"}]}"#;
        let jwk = JwkMarshal::from_json(raw).unwrap();

        assert_eq!(
            jwk.oth,
            vec![OtherPrimes {
                d: Some("Aw".to_owned()),
                r: Some("Cw".to_owned()),
                t: Some("Bw".to_owned()),
            }]
        );
        assert_eq!(jwk.to_json().unwrap(), r#"{"kty":"RSA","oth":[{"d":"Aw","r":"Cw","t":"Bw"}]}"#);
    }

    #[test]
    fn test_empty_set() {
        let set = JwksMarshal::default();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"{"keys":[]}"#);

        let set: JwksMarshal = serde_json::from_str("{}").unwrap();
        assert!(set.keys.is_empty());
    }
}
