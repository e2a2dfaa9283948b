//! Core use-case services.
//!
//! # Responsibility
//! - Expose catalog operations to UI drivers.
//! - Keep drivers decoupled from storage details.

pub mod catalog_service;
