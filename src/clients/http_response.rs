//! Response types for the CareSync API SDK.
//!
//! [`RawResponse`] is the transport-level view of a response: status code,
//! header map, and the raw body bytes. It is produced once per transport
//! call and consumed immediately by validators and decoders; nothing is
//! retained across requests.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::TransportError;

/// Text encodings supported when decoding a response body as a string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8.
    #[default]
    Utf8,
    /// Seven-bit ASCII.
    Ascii,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Ascii => write!(f, "ASCII"),
        }
    }
}

/// A raw HTTP response from the API.
///
/// Header keys are lower-cased on construction; headers may carry multiple
/// values. The body is kept as unmodified bytes so that downstream error
/// classification can match exact upstream wording.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers with lower-cased keys.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a new response, lower-casing header keys.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(key, values)| (key.to_lowercase(), values))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the first value of the given header, if present.
    ///
    /// Lookup is case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    ///
    /// This id should be included in error reports.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Decodes the body as text in the given encoding.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::StringDecode`] if the body is not valid in
    /// the requested encoding.
    pub fn text(&self, encoding: TextEncoding) -> Result<String, TransportError> {
        decode_text(&self.body, encoding)
    }
}

/// Decodes raw bytes as text in the given encoding.
pub(crate) fn decode_text(bytes: &[u8], encoding: TextEncoding) -> Result<String, TransportError> {
    match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(ToString::to_string)
            .map_err(|_| TransportError::StringDecode { encoding }),
        TextEncoding::Ascii => {
            if bytes.is_ascii() {
                // ASCII is a UTF-8 subset, so this cannot fail.
                Ok(String::from_utf8_lossy(bytes).into_owned())
            } else {
                Err(TransportError::StringDecode { encoding })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_header(key: &str, value: &str) -> RawResponse {
        let mut headers = HashMap::new();
        headers.insert(key.to_string(), vec![value.to_string()]);
        RawResponse::new(200, headers, Vec::new())
    }

    #[test]
    fn test_is_ok_for_2xx_range() {
        for status in 200..300 {
            assert!(RawResponse::new(status, HashMap::new(), Vec::new()).is_ok());
        }
    }

    #[test]
    fn test_is_not_ok_outside_2xx_range() {
        for status in [199, 300, 301, 400, 401, 404, 409, 423, 432, 500] {
            assert!(!RawResponse::new(status, HashMap::new(), Vec::new()).is_ok());
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response_with_header("X-Request-Id", "req-123");
        assert_eq!(response.header("x-request-id"), Some("req-123"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("req-123"));
    }

    #[test]
    fn test_request_id_extraction() {
        let response = response_with_header("X-Request-Id", "abc-123-xyz");
        assert_eq!(response.request_id(), Some("abc-123-xyz"));

        let empty = RawResponse::new(200, HashMap::new(), Vec::new());
        assert!(empty.request_id().is_none());
    }

    #[test]
    fn test_text_utf8_success() {
        let response = RawResponse::new(200, HashMap::new(), "héllo".as_bytes().to_vec());
        assert_eq!(response.text(TextEncoding::Utf8).unwrap(), "héllo");
    }

    #[test]
    fn test_text_utf8_failure() {
        let response = RawResponse::new(200, HashMap::new(), vec![0xff, 0xfe]);
        assert!(matches!(
            response.text(TextEncoding::Utf8),
            Err(TransportError::StringDecode {
                encoding: TextEncoding::Utf8
            })
        ));
    }

    #[test]
    fn test_text_ascii_rejects_non_ascii() {
        let response = RawResponse::new(200, HashMap::new(), "héllo".as_bytes().to_vec());
        assert!(matches!(
            response.text(TextEncoding::Ascii),
            Err(TransportError::StringDecode {
                encoding: TextEncoding::Ascii
            })
        ));
    }

    #[test]
    fn test_text_ascii_accepts_ascii() {
        let response = RawResponse::new(200, HashMap::new(), b"plain".to_vec());
        assert_eq!(response.text(TextEncoding::Ascii).unwrap(), "plain");
    }
}
