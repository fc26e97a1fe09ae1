//! Wire date format helpers.
//!
//! The API exchanges timestamps as full ISO-8601 strings with an explicit
//! pattern so date fields serialize deterministically. Fractional seconds
//! are not part of the contract: values round-trip at whole-second
//! precision only.
//!
//! Annotate date fields with these modules:
//!
//! ```rust
//! use caresync_api::datetime::iso8601;
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Appointment {
//!     #[serde(with = "iso8601")]
//!     starts_at: DateTime<Utc>,
//!     #[serde(with = "iso8601::option")]
//!     checked_in_at: Option<DateTime<Utc>>,
//! }
//! ```

/// Serde support for the fixed `%Y-%m-%dT%H:%M:%S%:z` wire pattern.
pub mod iso8601 {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// The exact pattern used on the wire, e.g. `2026-08-05T09:30:00+00:00`.
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

    /// Serializes a timestamp using the fixed wire pattern.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    /// Deserializes a timestamp from the fixed wire pattern.
    ///
    /// # Errors
    ///
    /// Fails if the string does not match the pattern exactly.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }

    /// Serde support for optional timestamps using the same pattern.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        use super::FORMAT;

        /// Serializes an optional timestamp using the fixed wire pattern.
        ///
        /// # Errors
        ///
        /// Propagates serializer failures.
        pub fn serialize<S>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => serializer.serialize_some(&dt.format(FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional timestamp from the fixed wire pattern.
        ///
        /// # Errors
        ///
        /// Fails if a present string does not match the pattern exactly.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|s| {
                DateTime::parse_from_str(&s, FORMAT)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(de::Error::custom)
            })
            .transpose()
        }
    }
}
