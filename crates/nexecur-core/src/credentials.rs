// ── Credential derivation ──
//
// The vendor's own scheme: salt bytes followed by the UTF-16LE password,
// hashed once with SHA-1 (pin) and once with SHA-256 (password), both
// base64-encoded. Not a KDF, but the server checks these exact bytes.

use std::fmt;

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Decoder that tolerates missing padding and non-zero trailing bits.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// The hashed credentials sent in place of the plaintext password and pin.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialKeys {
    /// SHA-256 of the salted buffer, base64.
    pub password_hash: String,
    /// SHA-1 of the salted buffer, base64.
    pub pin_hash: String,
}

impl fmt::Debug for CredentialKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialKeys")
            .field("password_hash", &"[REDACTED]")
            .field("pin_hash", &"[REDACTED]")
            .finish()
    }
}

/// Derive both hashes from a plaintext password and a base64 salt.
///
/// Pure and infallible: a malformed salt decodes to whatever bytes can be
/// recovered from it instead of failing.
pub fn derive(password: &str, salt: &str) -> CredentialKeys {
    let buffer = salted_buffer(password, salt);

    CredentialKeys {
        pin_hash: STANDARD.encode(Sha1::digest(&buffer)),
        password_hash: STANDARD.encode(Sha256::digest(&buffer)),
    }
}

/// Salt bytes first, then the password as UTF-16LE.
pub(crate) fn salted_buffer(password: &str, salt: &str) -> Vec<u8> {
    let mut buffer = decode_salt(salt);
    buffer.extend(password.encode_utf16().flat_map(u16::to_le_bytes));
    buffer
}

/// Best-effort base64 decoding.
///
/// Accepts the URL-safe alphabet, stops at the first `=`, skips characters
/// outside the alphabet and drops a dangling sextet that cannot form a byte.
fn decode_salt(salt: &str) -> Vec<u8> {
    let mut cleaned: String = salt
        .chars()
        .take_while(|&c| c != '=')
        .filter_map(|c| match c {
            '-' => Some('+'),
            '_' => Some('/'),
            c if c.is_ascii_alphanumeric() || c == '+' || c == '/' => Some(c),
            _ => None,
        })
        .collect();

    if cleaned.len() % 4 == 1 {
        cleaned.pop();
    }

    LENIENT.decode(cleaned.as_bytes()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::{assert_eq, assert_ne};

    use super::*;

    const PASSWORD: &str = "testPassword123";
    const SALT: &str = "dGVzdFNhbHQ=";

    #[test]
    fn known_vector() {
        let keys = derive(PASSWORD, SALT);
        assert_eq!(keys.password_hash, "VMt7Z7YeKMxi7OE2ctTukCKDmCLysNLS+75KnjHvDuI=");
        assert_eq!(keys.pin_hash, "cWN0z6/lfBe7PKmaOyXAiPe2kLw=");
    }

    #[test]
    fn deterministic() {
        assert_eq!(derive(PASSWORD, SALT), derive(PASSWORD, SALT));
    }

    #[test]
    fn sensitive_to_password_and_salt() {
        let base = derive("password1", SALT);
        let other_password = derive("password2", SALT);
        assert_ne!(base.password_hash, other_password.password_hash);
        assert_ne!(base.pin_hash, other_password.pin_hash);

        let salt1 = derive(PASSWORD, "c2FsdDE=");
        let salt2 = derive(PASSWORD, "c2FsdDI=");
        assert_ne!(salt1.password_hash, salt2.password_hash);
        assert_ne!(salt1.pin_hash, salt2.pin_hash);
    }

    #[test]
    fn salt_precedes_password() {
        assert_eq!(salted_buffer("x", "AQ=="), vec![0x01, b'x', 0x00]);

        let keys = derive("x", "AQ==");
        assert_eq!(keys.pin_hash, "RK4HBJt40wOw3M6eAglyvuJbD/c=");
        assert_eq!(keys.password_hash, "m8Onwx5jzb9XyMvG8vV888ylIboYJG0NeXaCIPbeCbw=");
    }

    #[test]
    fn non_ascii_password_is_utf16() {
        assert_eq!(salted_buffer("é", ""), vec![0xe9, 0x00]);
    }

    #[test]
    fn malformed_salt_is_decoded_leniently() {
        assert_eq!(
            decode_salt("invalid-base64!"),
            vec![138, 123, 218, 150, 39, 126, 109, 171, 30, 235]
        );

        let keys = derive("pw", "invalid-base64!");
        assert_eq!(keys.password_hash, "YEyqoZaweTWas+5+bvDjaB6/IJDVArpt83+JzllnqCk=");
        assert_eq!(keys.pin_hash, "pJo6xEDY10jlsd2CVRJslhuUFn8=");
    }

    #[test]
    fn missing_padding_and_garbage_never_fail() {
        assert_eq!(decode_salt("AQ"), vec![0x01]);
        assert_eq!(decode_salt("A"), Vec::<u8>::new());
        assert_eq!(decode_salt("!!!"), Vec::<u8>::new());
    }

    #[test]
    fn debug_redacts_hashes() {
        let rendered = format!("{:?}", derive(PASSWORD, SALT));
        assert!(!rendered.contains("VMt7"));
    }
}
