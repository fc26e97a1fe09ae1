//! The virtual-visit endpoint family.
//!
//! Feature code driving virtual visits executes its calls through
//! [`ApiClient`](crate::ApiClient) and classifies failures with
//! [`VisitError::classify`], surfacing specific cases like
//! [`VisitError::RegionBusy`] instead of a generic failure whenever the
//! upstream body matches a known pattern.

mod errors;

pub use errors::{DevicePermission, VisitError};
