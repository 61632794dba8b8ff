//! Core types shared across matchtree facilities
//!
//! This crate provides foundational types used by the matching engine,
//! the error facility and the logging facility:
//!
//! - **Scalar values**: the leaf value carried by atomic tree nodes
//! - **Schema constants**: Canonical field keys and event names

pub mod scalar;
pub mod schema;

pub use scalar::Scalar;
