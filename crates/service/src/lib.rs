//! Customer and reservation stores on top of `models`.
//! - Every operation is one awaited query (two for composed reads) on the shared pool.
//! - Misses on lookups are reported as `ServiceError::NotFound`; store failures pass through.

pub mod errors;
pub mod customer_service;
pub mod reservation_service;
#[cfg(test)]
pub mod test_support;
