//! Core types shared across matchx facilities
//!
//! This crate provides foundational types used by the assertion handler
//! and the logging facility:
//!
//! - **Correlation types**: RequestId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
