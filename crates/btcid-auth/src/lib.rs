//! Credentials and request signing for the Bitcoin.co.id trade API
//!
//! Private calls go to `POST /tapi` with a form body carrying `method` and
//! `nonce`. The body is signed with HMAC-SHA512 keyed by the API secret and the
//! hex digest travels in the `Sign` header next to the `Key` header.
//!
//! # Example
//!
//! ```
//! use btcid_auth::{Credentials, RequestSigner};
//!
//! let creds = Credentials::new("my-api-key", "my-secret");
//! let signer = RequestSigner::new(&creds, "getInfo");
//!
//! let body = signer.encode_body(&[]).unwrap();
//! let signature = signer.sign(&body);
//! assert_eq!(signature.len(), 128);
//! ```

mod credentials;
mod error;
mod form;

pub use credentials::{Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
pub use form::encode_form;
