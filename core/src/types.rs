//! Shared primitive types used across the forecasters.

use chrono::{NaiveDate, NaiveDateTime};

/// A stable identifier for one reservation within a batch.
pub type ReservationId = String;

/// Calendar day of a stay night, checkout or arrival.
pub type Day = NaiveDate;

/// Start of a demand bucket (local, naive wall-clock time).
pub type BucketTime = NaiveDateTime;

/// String sentinel stored in text fields that were absent in the input row.
pub const MISSING_TEXT: &str = "nan";
