//! Session token signing.
//!
//! Token format: `"{session_uuid}.{base64url(HMAC-SHA256(secret, session_uuid))}"`.
//! The signature lets a forged or truncated cookie be rejected without a
//! database round trip.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use kernel::id::AuthSessionId;
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &[u8; 32], session_id: &str) -> AuthResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AuthError::Internal(format!("Invalid session secret: {e}")))?;
    mac.update(session_id.as_bytes());
    Ok(mac)
}

pub fn sign(secret: &[u8; 32], session_id: AuthSessionId) -> AuthResult<String> {
    let session_id = session_id.to_string();
    let signature = mac(secret, &session_id)?.finalize().into_bytes();
    Ok(format!("{session_id}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

/// Checks the signature and returns the session id it covers.
/// Any malformed or forged token is `Unauthenticated`.
pub fn verify(secret: &[u8; 32], token: &str) -> AuthResult<AuthSessionId> {
    let (session_id, signature_b64) = token
        .split_once('.')
        .ok_or(AuthError::Unauthenticated)?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::Unauthenticated)?;

    mac(secret, session_id)?
        .verify_slice(&signature)
        .map_err(|_| AuthError::Unauthenticated)?;

    AuthSessionId::parse(session_id).ok_or(AuthError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_then_verify() {
        let id = AuthSessionId::new();
        let token = sign(&SECRET, id).unwrap();

        assert!(token.starts_with(&id.to_string()));
        assert_eq!(verify(&SECRET, &token).unwrap(), id);
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = sign(&SECRET, AuthSessionId::new()).unwrap();
        assert!(matches!(
            verify(&[8u8; 32], &token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_rejects_tampered_id() {
        let token = sign(&SECRET, AuthSessionId::new()).unwrap();
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{signature}", AuthSessionId::new());

        assert!(verify(&SECRET, &forged).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        for token in ["", "no-dot", "a.b", "abc.!!!"] {
            assert!(verify(&SECRET, token).is_err(), "{token}");
        }
    }
}
