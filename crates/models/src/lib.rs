//! Entities and in-memory records for the reservation book.
//! - `customer` / `reservation`: sea-orm entities plus the records the stores hand out.
//! - `db`: pooled connection setup.

pub mod errors;
pub mod db;
pub mod customer;
pub mod reservation;

/// Notes are never null: absent or empty input becomes `""`.
pub fn normalize_notes<S: Into<String>>(value: Option<S>) -> String {
    value.map(Into::into).unwrap_or_default()
}
