//! The retail-scheduling endpoint family.
//!
//! Feature code driving clinic scheduling executes its calls through
//! [`ApiClient`](crate::ApiClient) and classifies failures with
//! [`SchedulingError::classify`], surfacing specific cases like
//! [`SchedulingError::SlotUnavailable`] instead of a generic failure
//! whenever the upstream body matches a known pattern.

mod errors;

pub use errors::SchedulingError;
