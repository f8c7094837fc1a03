//! Startup snapshot of members, shipping addresses and orders.
//!
//! The snapshot is compiled into the binary and validated on load, so a
//! malformed email in the fixture fails startup instead of a later request.

use serde::Deserialize;
use thiserror::Error;

use protein_admin_core::{Member, Order, ShippingAddress};

const SNAPSHOT: &str = include_str!("../seed/snapshot.json");

/// Failure to load the embedded snapshot.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Invalid seed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The three collections the panel starts with.
#[derive(Debug, Clone, Deserialize)]
pub struct Seed {
    pub members: Vec<Member>,
    pub addresses: Vec<ShippingAddress>,
    pub orders: Vec<Order>,
}

impl Seed {
    /// Load the embedded snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot does not deserialize.
    pub fn load() -> Result<Self, SeedError> {
        Ok(serde_json::from_str(SNAPSHOT)?)
    }
}
