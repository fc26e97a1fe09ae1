//! Error classification for the retail-scheduling endpoint family.
//!
//! Scheduling calls (slot search, booking, coupons) share one closed error
//! set, [`SchedulingError`]. Classification works the same way as the
//! virtual-visit family: an ordered `(status, body-substring)` rule table,
//! first match wins, generic fallback wrapped in
//! [`SchedulingError::Api`]. Adding an upstream code is a one-row change.

use thiserror::Error;

use crate::clients::TransportError;
use crate::error::ApiError;

/// Errors surfaced by retail-scheduling calls.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The requested time slot is no longer available (HTTP 409 with
    /// `SlotUnavailable` in the body).
    #[error("the requested time slot is unavailable")]
    SlotUnavailable,

    /// The patient already holds a booking for this time (HTTP 409 with
    /// `DoubleBooked` in the body).
    #[error("the patient is already booked for this time")]
    DoubleBooked,

    /// The supplied coupon is not active (HTTP 400 with `CouponInactive`
    /// in the body).
    #[error("the coupon is not active")]
    CouponInactive,

    /// The appointment does not exist (HTTP 404).
    #[error("the appointment was not found")]
    AppointmentNotFound,

    /// The server failed while handling the scheduling call (HTTP 500).
    #[error("the server failed to process the scheduling request")]
    InternalServerError,

    /// Anything the family does not specifically recognize.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One row of the classification table.
struct Rule {
    status: u16,
    needle: &'static str,
    make: fn() -> SchedulingError,
}

/// Ordered classification rules; first match wins. An empty needle makes a
/// status-only rule, since every body contains the empty string.
const RULES: &[Rule] = &[
    Rule {
        status: 409,
        needle: "SlotUnavailable",
        make: || SchedulingError::SlotUnavailable,
    },
    Rule {
        status: 409,
        needle: "DoubleBooked",
        make: || SchedulingError::DoubleBooked,
    },
    Rule {
        status: 400,
        needle: "CouponInactive",
        make: || SchedulingError::CouponInactive,
    },
    Rule {
        status: 404,
        needle: "",
        make: || SchedulingError::AppointmentNotFound,
    },
    Rule {
        status: 500,
        needle: "",
        make: || SchedulingError::InternalServerError,
    },
];

impl SchedulingError {
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

impl From<TransportError> for SchedulingError {
    fn from(error: TransportError) -> Self {
        Self::classify(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> TransportError {
        TransportError::Response {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_slot_unavailable_beats_generic_fallback() {
        let classified = SchedulingError::classify(response(
            409,
            r#"{"error":"SlotUnavailable","slot":"2026-08-05T09:30:00+00:00"}"#,
        ));
        assert!(matches!(classified, SchedulingError::SlotUnavailable));
    }

    #[test]
    fn test_double_booked_on_409() {
        let classified = SchedulingError::classify(response(409, r#"{"error":"DoubleBooked"}"#));
        assert!(matches!(classified, SchedulingError::DoubleBooked));
    }

    #[test]
    fn test_slot_unavailable_precedes_double_booked() {
        // Both needles present: the earlier table row wins.
        let classified =
            SchedulingError::classify(response(409, "SlotUnavailable then DoubleBooked"));
        assert!(matches!(classified, SchedulingError::SlotUnavailable));
    }

    #[test]
    fn test_coupon_inactive_on_400() {
        let classified = SchedulingError::classify(response(400, "CouponInactive"));
        assert!(matches!(classified, SchedulingError::CouponInactive));
    }

    #[test]
    fn test_plain_400_falls_through_to_generic() {
        let classified = SchedulingError::classify(response(400, "malformed payload"));
        assert!(matches!(
            classified,
            SchedulingError::Api(ApiError::BadRequest)
        ));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let classified = SchedulingError::classify(response(409, "slotunavailable"));
        assert!(matches!(
            classified,
            SchedulingError::Api(ApiError::Unknown(_))
        ));
    }

    #[test]
    fn test_404_maps_to_appointment_not_found() {
        let classified = SchedulingError::classify(response(404, ""));
        assert!(matches!(classified, SchedulingError::AppointmentNotFound));
    }

    #[test]
    fn test_500_maps_to_internal_server_error() {
        let classified = SchedulingError::classify(response(500, "stack trace"));
        assert!(matches!(classified, SchedulingError::InternalServerError));
    }

    #[test]
    fn test_local_errors_wrap_generic_unknown() {
        let classified = SchedulingError::classify(TransportError::InvalidResponse);
        assert!(matches!(
            classified,
            SchedulingError::Api(ApiError::Unknown(TransportError::InvalidResponse))
        ));
    }
}
