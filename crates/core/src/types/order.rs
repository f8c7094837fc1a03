//! Order record.

use serde::{Deserialize, Serialize};

use super::{AddressId, MemberId, OrderId, OrderStatus};

/// A purchase record.
///
/// `member_name` and `shipping_address_label` are copied from the member and
/// address at creation time and are not refreshed when those records change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub member_id: MemberId,
    pub member_name: String,
    pub shipping_address_id: AddressId,
    pub shipping_address_label: String,
    pub status: OrderStatus,
    pub memo: Option<String>,
    /// Creation timestamp, `YYYY-MM-DD HH:MM`.
    pub created_at: String,
    /// Total in yen.
    pub total_amount: Option<u32>,
}

impl Order {
    /// Case-insensitive substring match against order id and member name.
    ///
    /// An empty needle matches every order.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.id.as_str().to_lowercase().contains(&needle)
            || self.member_name.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            id: OrderId::new("ORD-003"),
            member_id: MemberId::new("m1"),
            member_name: "田中 太郎".to_string(),
            shipping_address_id: AddressId::new("a2"),
            shipping_address_label: "実家".to_string(),
            status: OrderStatus::InProgress,
            memo: None,
            created_at: "2023-10-05 09:15".to_string(),
            total_amount: Some(3980),
        }
    }

    #[test]
    fn test_matches_search_on_id_case_insensitive() {
        let o = order();
        assert!(o.matches_search("ord-003"));
        assert!(o.matches_search("003"));
        assert!(!o.matches_search("ORD-004"));
    }

    #[test]
    fn test_matches_search_on_member_name() {
        let o = order();
        assert!(o.matches_search("太郎"));
        assert!(o.matches_search("  "));
        assert!(!o.matches_search("花子"));
    }
}
