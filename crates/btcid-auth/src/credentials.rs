//! API credentials for the Bitcoin.co.id trade API
//!
//! Implements HMAC-SHA512 signing as required by the private `/tapi` endpoint.
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha512;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

use crate::error::{AuthError, AuthResult};
use crate::form::encode_form;

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BTCID_API_KEY";
/// Environment variable holding the API secret
pub const SECRET_ENV: &str = "BTCID_SECRET";

/// API credentials for authenticated requests
///
/// Clones share the same nonce high-water mark, so every request signed with
/// one key pair gets a strictly larger nonce than the one before it.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret (zeroized on drop)
    secret: SecretBox<Vec<u8>>,
    /// Last nonce handed out
    last_nonce: Arc<AtomicU64>,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// No format validation is done here; bad credentials are reported by the
    /// exchange when a private call is made.
    pub fn new(api_key: impl Into<String>, secret: impl AsRef<str>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: SecretBox::new(Box::new(secret.as_ref().as_bytes().to_vec())),
            last_nonce: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BTCID_API_KEY` and `BTCID_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let secret = std::env::var(SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_ENV.to_string()))?;

        Ok(Self::new(api_key, secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Generate the next nonce for this key pair
    ///
    /// Millisecond wall-clock time, bumped past the previous nonce when two
    /// requests land in the same millisecond or the clock steps backwards.
    pub fn next_nonce(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        let previous = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);

        now.max(previous + 1)
    }

    /// Sign an encoded form body
    ///
    /// Returns the lowercase hex HMAC-SHA512 digest of `body` keyed by the secret.
    pub fn sign(&self, body: &str) -> String {
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (new SecretBox, shared nonce counter)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
            last_nonce: Arc::clone(&self.last_nonce),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(idx, _)| &self.api_key[..idx]);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Request signer for one private call
///
/// Fixes the method name and nonce, then produces the canonical form body and
/// its signature.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    method: String,
    nonce: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with a fresh nonce
    pub fn new(credentials: &'a Credentials, method: impl Into<String>) -> Self {
        let nonce = credentials.next_nonce().to_string();
        Self::with_nonce(credentials, method, nonce)
    }

    /// Create a request signer with an explicit nonce
    pub fn with_nonce(
        credentials: &'a Credentials,
        method: impl Into<String>,
        nonce: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            method: method.into(),
            nonce: nonce.into(),
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Get the private method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Build the form body: `method`, `nonce` and any extra parameters
    pub fn encode_body(&self, params: &[(&str, &str)]) -> AuthResult<String> {
        if let Some((key, _)) = params.iter().find(|(k, _)| *k == "method" || *k == "nonce") {
            return Err(AuthError::ReservedParameter((*key).to_string()));
        }

        let mut form: Vec<(&str, &str)> = vec![
            ("method", self.method.as_str()),
            ("nonce", self.nonce.as_str()),
        ];
        form.extend_from_slice(params);

        let body = encode_form(&form)?;
        trace!(method = %self.method, nonce = %self.nonce, "Encoded private request body");
        Ok(body)
    }

    /// Sign the request with the given form body
    pub fn sign(&self, body: &str) -> String {
        self.credentials.sign(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_INFO_SIGNATURE: &str = "b093e1552730fa19e63e95f3c41f90a9f9d5bbd4c0e581dce0b6f9d693c025da6e77ae345a9a1ef5118e9fe7fc8cad26c5f96c58e6105f21d5fc7f9c8913b5aa";

    #[test]
    fn test_nonce_generation() {
        let creds = Credentials::new("key", "secret");
        let nonce1 = creds.next_nonce();
        let nonce2 = creds.next_nonce();
        assert!(nonce2 > nonce1);
    }

    #[test]
    fn test_nonce_strictly_increasing_burst() {
        let creds = Credentials::new("key", "secret");
        let mut last = 0;
        for _ in 0..10_000 {
            let nonce = creds.next_nonce();
            assert!(nonce > last);
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_shared_between_clones() {
        let creds = Credentials::new("key", "secret");
        let clone = creds.clone();
        let a = creds.next_nonce();
        let b = clone.next_nonce();
        let c = creds.next_nonce();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_nonce_concurrent_unique() {
        let creds = Credentials::new("key", "secret");
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let creds = creds.clone();
                std::thread::spawn(move || (0..1000).map(|_| creds.next_nonce()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key_123", "hush-hush");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hush-hush"));
        assert!(!debug.contains("test_api_key_123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_signing_vector() {
        let creds = Credentials::new("API_KEY", "hush");
        let signer = RequestSigner::with_nonce(&creds, "getInfo", "1000");

        let body = signer.encode_body(&[]).unwrap();
        assert_eq!(body, "method=getInfo&nonce=1000");
        assert_eq!(signer.sign(&body), GET_INFO_SIGNATURE);
    }

    #[test]
    fn test_signing_with_extra_params() {
        let creds = Credentials::new("API_KEY", "hush");
        let signer = RequestSigner::with_nonce(&creds, "tradeHistory", "1000");

        let body = signer.encode_body(&[("pair", "btc_idr")]).unwrap();
        assert_eq!(body, "method=tradeHistory&nonce=1000&pair=btc_idr");
        assert_eq!(
            signer.sign(&body),
            "bc020e39937d10bc82fde3fabdfa98436cb88747a76d833a083ebb2c5da38efac7ffc49eea61f32632c3e6f82d7415f1558c2edc6e84b8bf8c1aad8fa9b5fa04"
        );
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let creds = Credentials::new("API_KEY", "another secret");
        let signature = creds.sign("method=getInfo&nonce=1");
        assert_eq!(signature.len(), 128);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_reserved_parameters_rejected() {
        let creds = Credentials::new("API_KEY", "hush");
        let signer = RequestSigner::with_nonce(&creds, "getInfo", "1000");

        let err = signer.encode_body(&[("nonce", "1")]).unwrap_err();
        assert!(matches!(err, AuthError::ReservedParameter(ref k) if k == "nonce"));
    }

    #[test]
    fn test_signer_uses_fresh_nonce() {
        let creds = Credentials::new("API_KEY", "hush");
        let first = RequestSigner::new(&creds, "getInfo");
        let second = RequestSigner::new(&creds, "getInfo");

        let a: u64 = first.nonce().parse().unwrap();
        let b: u64 = second.nonce().parse().unwrap();
        assert!(b > a);
        assert_eq!(first.api_key(), "API_KEY");
        assert_eq!(first.method(), "getInfo");
    }
}
