//! Shipping address record.

use serde::{Deserialize, Serialize};

use super::{AddressId, MemberId};

/// A delivery destination owned by exactly one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub id: AddressId,
    pub member_id: MemberId,
    /// Short name such as 自宅 or オフィス.
    pub label: String,
    pub postal_code: String,
    /// Prefecture and city.
    pub address1: String,
    /// Street and building.
    pub address2: String,
    pub recipient_name: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl ShippingAddress {
    /// Whether this address belongs to `member_id`.
    #[must_use]
    pub fn is_owned_by(&self, member_id: &MemberId) -> bool {
        &self.member_id == member_id
    }

    /// One-line summary used in select boxes: `自宅 - 東京都千代田区千代田1-1`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} - {}{}", self.label, self.address1, self.address2)
    }
}
