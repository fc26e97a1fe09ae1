//! Response validators.
//!
//! A validator is a pure predicate over `(status, body)` that turns an
//! out-of-contract response into a [`TransportError`]. The client runs its
//! validators in order against every response; the first failure wins and
//! is returned to the caller (or handed to the recovery protocol).

use std::sync::Arc;

use crate::clients::errors::TransportError;

/// A pure check over a response's status code and raw body.
///
/// Validators are shareable closures so callers can pass ad-hoc checks per
/// request without implementing a trait.
pub type ResponseValidator = Arc<dyn Fn(u16, &[u8]) -> Result<(), TransportError> + Send + Sync>;

/// Returns the default validator: status must be in `[200, 300)`.
///
/// On failure the error captures the exact status code and the exact raw
/// body bytes, which downstream classification depends on.
///
/// # Example
///
/// ```rust
/// use caresync_api::clients::status_validator;
///
/// let validator = status_validator();
/// assert!(validator(204, b"").is_ok());
/// assert!(validator(404, b"missing").is_err());
/// ```
#[must_use]
pub fn status_validator() -> ResponseValidator {
    Arc::new(|status, body| {
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(TransportError::Response {
                status,
                body: body.to_vec(),
            })
        }
    })
}
