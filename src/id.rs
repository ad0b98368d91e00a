//! Record identifier generation
//!
//! Records are keyed by UUID v7: 128 bits, globally unique with
//! overwhelming probability, and lexicographically sortable by creation
//! time in both binary and hyphenated-string form. The generator is called
//! exactly once per newly observed URL; refreshes keep the original id.

use uuid::Uuid;

/// Generate a fresh time-ordered record identifier
pub fn new_record_id() -> Uuid {
    Uuid::now_v7()
}
