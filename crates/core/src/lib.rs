//! ProteinAdmin Core - Shared domain types.
//!
//! This crate provides the record shapes used by the admin panel:
//! - members (subscription customers)
//! - shipping addresses (owned by exactly one member)
//! - orders (one member, one of that member's addresses, a lifecycle status)
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP,
//! no storage. Stores and views live in the `protein-admin` crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, records, statuses, email and form normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
