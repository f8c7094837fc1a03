//! Core types for ProteinAdmin.
//!
//! This module provides type-safe wrappers and records for the dashboard domain.

pub mod address;
pub mod email;
pub mod id;
pub mod member;
pub mod normalize;
pub mod order;
pub mod status;

pub use address::ShippingAddress;
pub use email::{Email, EmailError};
pub use id::*;
pub use member::Member;
pub use normalize::{normalize_phone, normalize_postal_code};
pub use order::Order;
pub use status::{OrderStatus, ParseStatusError};
