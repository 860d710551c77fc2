//! Chinese Remainder Theorem parameters of RSA private keys ([RFC7518 Section 6.3.2]).
//!
//! [RFC7518 Section 6.3.2]: https://www.rfc-editor.org/rfc/rfc7518#section-6.3.2

use rsa::BigUint;

/// The CRT exponent of `prime`: `d mod (prime - 1)`.
pub(crate) fn exponent(d: &BigUint, prime: &BigUint) -> BigUint {
    let one = BigUint::from(1u8);
    if *prime <= one {
        return BigUint::from(0u8);
    }
    d % (prime - &one)
}

/// The inverse of `value` modulo `prime`, computed as `value^(prime - 2) mod prime`.
///
/// Only meaningful when `prime` is prime.
pub(crate) fn inverse(value: &BigUint, prime: &BigUint) -> BigUint {
    let two = BigUint::from(2u8);
    if *prime <= two {
        return BigUint::from(0u8);
    }
    value.modpow(&(prime - &two), prime)
}

/// Whether `coefficient` is the reduced inverse of `value` modulo `modulus`,
/// i.e. `coefficient < modulus` and `value * coefficient ≡ 1 (mod modulus)`.
pub(crate) fn is_inverse(value: &BigUint, coefficient: &BigUint, modulus: &BigUint) -> bool {
    let one = BigUint::from(1u8);
    *modulus > one && coefficient < modulus && (value * coefficient) % modulus == one
}
