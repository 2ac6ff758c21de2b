//! Request signing for the keyword statistics API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::SearchAdError;

type HmacSha256 = Hmac<Sha256>;

/// Signs `"{timestamp}.{method}.{uri}"` with HMAC-SHA256 and returns the
/// base64-encoded digest.
///
/// # Errors
///
/// Returns [`SearchAdError::Signature`] if the MAC cannot be keyed.
pub fn sign(timestamp: &str, method: &str, uri: &str, secret: &str) -> Result<String, SearchAdError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| SearchAdError::Signature(e.to_string()))?;
    mac.update(format!("{timestamp}.{method}.{uri}").as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_matches_reference_digest() {
        let signature = sign("1700000000000", "GET", "/keywordstool", "secret").unwrap();
        assert_eq!(signature, "A6Gzu+sW9C2ovLsH+T+rFrie81KwHy1xrodUFQERKf4=");
    }

    #[test]
    fn sign_changes_with_timestamp() {
        let a = sign("1", "GET", "/keywordstool", "secret").unwrap();
        let b = sign("2", "GET", "/keywordstool", "secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_secret_still_signs() {
        assert!(sign("1", "GET", "/keywordstool", "").is_ok());
    }
}
