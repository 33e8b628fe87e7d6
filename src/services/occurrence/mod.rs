//! Recurrence resolver: composite occurrence ids and next-occurrence math.
//!
//! Both halves are pure functions over `chrono::DateTime<Utc>` and can be
//! called from any thread.

mod calendar;
pub mod codec;
pub mod error;
pub mod next;

pub use codec::{decode_occurrence_id, encode_occurrence_id};
pub use error::{OccurrenceError, OccurrenceResult};
pub use next::{next_occurrence, next_occurrence_from_now, occurrences_from, Occurrences};
