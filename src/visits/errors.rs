//! Error classification for the virtual-visit endpoint family.
//!
//! Virtual-visit calls share one closed error set, [`VisitError`]. A
//! transport failure is checked against an ordered rule table of
//! `(status, body-substring)` pairs; the first match wins, and anything
//! unmatched falls through to the generic [`ApiError`] classifier wrapped
//! in [`VisitError::Api`].
//!
//! The body matching is deliberately confined to the [`RULES`] table:
//! upstream ties these codes to incidental message wording, so adding a
//! new code is a one-row change and the match semantics (case-sensitive,
//! no normalization) stay in one place.

use thiserror::Error;

use crate::clients::TransportError;
use crate::error::ApiError;

/// Device capabilities a virtual visit may require.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DevicePermission {
    /// Camera access.
    Camera,
    /// Microphone access.
    Microphone,
}

impl std::fmt::Display for DevicePermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Microphone => write!(f, "microphone"),
        }
    }
}

/// Errors surfaced by virtual-visit calls.
///
/// The variant set is closed; [`Api`](Self::Api) carries everything the
/// family does not specifically recognize.
#[derive(Debug, Error)]
pub enum VisitError {
    /// The requested practice region is at capacity (HTTP 400 with
    /// `REGION_BUSY` in the body).
    #[error("the practice region is busy and cannot accept new visits")]
    RegionBusy,

    /// The visit does not exist (HTTP 404).
    #[error("the visit was not found")]
    VisitNotFound,

    /// The patient's account is locked (HTTP 423).
    #[error("the account is locked")]
    AccountLocked,

    /// The server failed while handling the visit call (HTTP 500).
    #[error("the server failed to process the visit request")]
    InternalServerError,

    /// The caller lacks the listed device permissions. Constructed by
    /// feature code before a visit is started, never by the rule table.
    #[error("missing device permissions: {0:?}")]
    PermissionDenied(Vec<DevicePermission>),

    /// Anything the family does not specifically recognize.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One row of the classification table.
struct Rule {
    status: u16,
    needle: &'static str,
    make: fn() -> VisitError,
}

/// Ordered classification rules; first match wins. An empty needle makes a
/// status-only rule, since every body contains the empty string.
const RULES: &[Rule] = &[
    Rule {
        status: 400,
        needle: "REGION_BUSY",
        make: || VisitError::RegionBusy,
    },
    Rule {
        status: 404,
        needle: "",
        make: || VisitError::VisitNotFound,
    },
    Rule {
        status: 423,
        needle: "",
        make: || VisitError::AccountLocked,
    },
    Rule {
        status: 500,
        needle: "",
        make: || VisitError::InternalServerError,
    },
];

impl VisitError {
    /// Classifies a transport failure into this family.
    ///
    /// Matching is case-sensitive and exact, per the upstream contract; no
    /// normalization is applied to the body text.
    #[must_use]
    pub fn classify(error: TransportError) -> Self {
        if let (Some(status), Some(body)) = (error.status(), error.body_text()) {
            for rule in RULES {
                if rule.status == status && body.contains(rule.needle) {
                    return (rule.make)();
                }
            }
        }
        Self::Api(ApiError::classify(error))
    }
}

impl From<TransportError> for VisitError {
    fn from(error: TransportError) -> Self {
        Self::classify(error)
    }
}
