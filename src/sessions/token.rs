// src/sessions/token.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

/// What the session store is keyed by. The raw cookie value is never kept.
pub type SessionKey = [u8; 32];

/// Fresh cookie value for a new browser session.
pub fn new_session_token() -> String {
    session_token_from(&mut OsRng)
}

/// Cookie-safe (URL-safe base64, unpadded) token drawn from `rng`.
pub fn session_token_from<R: RngCore>(rng: &mut R) -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    rng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

pub fn session_key(token: &str) -> SessionKey {
    let digest = Sha256::digest(token.as_bytes());
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    key
}
