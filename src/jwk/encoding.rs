//! Base64url and big-integer encoding shared by every JWK parameter.
//!
//! [RFC7517] defines base64url as in [RFC7515 Section 2]: the URL-safe
//! alphabet with all trailing `=` characters omitted. Some producers still
//! emit padding, so decoding strips it before applying the strict decoder.
//!
//! [RFC7517]: https://datatracker.ietf.org/doc/html/rfc7517#section-1.1
//! [RFC7515 Section 2]: https://datatracker.ietf.org/doc/html/rfc7515#section-2

use base64ct::{Base64UrlUnpadded, Encoding};
use rsa::BigUint;

/// Encodes bytes as unpadded base64url.
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decodes a base64url string, tolerating trailing padding characters.
pub fn decode(value: &str) -> Result<Vec<u8>, base64ct::Error> {
    Base64UrlUnpadded::decode_vec(value.trim_end_matches('='))
}

/// Encodes a non-negative integer as its minimal big-endian bytes in base64url.
///
/// Zero has no significant bytes and therefore encodes as the empty string.
pub fn encode_biguint(value: &BigUint) -> String {
    encode_uint_bytes(&value.to_bytes_be())
}

/// Encodes big-endian unsigned integer bytes after dropping leading zero bytes.
pub fn encode_uint_bytes(bytes: &[u8]) -> String {
    encode(strip_leading_zeros(bytes))
}

/// Decodes a base64url string as a big-endian unsigned integer.
pub fn decode_biguint(value: &str) -> Result<BigUint, base64ct::Error> {
    decode(value).map(|bytes| BigUint::from_bytes_be(&bytes))
}

/// Left-pads big-endian integer bytes with zeros to exactly `size` bytes.
///
/// Returns `None` when the integer does not fit.
pub fn left_pad(bytes: &[u8], size: usize) -> Option<Vec<u8>> {
    let significant = strip_leading_zeros(bytes);
    if significant.len() > size {
        return None;
    }

    let mut padded = vec![0u8; size - significant.len()];
    padded.extend_from_slice(significant);
    Some(padded)
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
