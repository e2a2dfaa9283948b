//! Search entry points.
//!
//! # Responsibility
//! - Provide case-insensitive substring search over book fields.
//!
//! # See also
//! - `service::catalog_service` for the catalog-level wrapper.

pub mod substring;
