//! In-memory data store for members, shipping addresses and orders.
//!
//! All three collections sit behind one lock so every operation observes
//! and leaves a consistent state. Every applied mutation bumps a revision
//! counter under the same lock.
//!
//! Mutators do not validate references between collections. Callers check
//! that a member or address exists before writing records that point at it.

use tokio::sync::RwLock;

use protein_admin_core::{AddressId, Member, MemberId, Order, ShippingAddress};

use crate::seed::Seed;

#[derive(Debug, Default)]
struct Collections {
    members: Vec<Member>,
    addresses: Vec<ShippingAddress>,
    orders: Vec<Order>,
    revision: u64,
}

/// Point-in-time copy of every collection.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub addresses: Vec<ShippingAddress>,
    pub orders: Vec<Order>,
}

/// Shared store of admin records.
#[derive(Debug)]
pub struct DataStore {
    collections: RwLock<Collections>,
}

impl DataStore {
    /// Create a store holding the given collections.
    #[must_use]
    pub fn new(members: Vec<Member>, addresses: Vec<ShippingAddress>, orders: Vec<Order>) -> Self {
        Self {
            collections: RwLock::new(Collections {
                members,
                addresses,
                orders,
                revision: 0,
            }),
        }
    }

    /// Create a store from a seed snapshot.
    #[must_use]
    pub fn from_seed(seed: Seed) -> Self {
        Self::new(seed.members, seed.addresses, seed.orders)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn members(&self) -> Vec<Member> {
        self.collections.read().await.members.clone()
    }

    pub async fn addresses(&self) -> Vec<ShippingAddress> {
        self.collections.read().await.addresses.clone()
    }

    /// Orders, newest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.collections.read().await.orders.clone()
    }

    /// All three collections read under one lock.
    pub async fn snapshot(&self) -> Snapshot {
        let c = self.collections.read().await;
        Snapshot {
            members: c.members.clone(),
            addresses: c.addresses.clone(),
            orders: c.orders.clone(),
        }
    }

    pub async fn member(&self, id: &MemberId) -> Option<Member> {
        self.collections
            .read()
            .await
            .members
            .iter()
            .find(|m| &m.id == id)
            .cloned()
    }

    pub async fn address(&self, id: &AddressId) -> Option<ShippingAddress> {
        self.collections
            .read()
            .await
            .addresses
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }

    /// Addresses owned by `member_id`, in collection order.
    pub async fn addresses_for_member(&self, member_id: &MemberId) -> Vec<ShippingAddress> {
        addresses_owned_by(&self.collections.read().await.addresses, member_id)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert an order at the head of the order list.
    pub async fn add_order(&self, order: Order) {
        let mut c = self.collections.write().await;
        tracing::info!(order_id = %order.id, member_id = %order.member_id, "Order added");
        c.orders.insert(0, order);
        c.revision += 1;
    }

    /// Replace the member with the same id.
    ///
    /// Returns `false` and leaves the store untouched when no member has
    /// that id.
    pub async fn update_member(&self, member: Member) -> bool {
        let mut c = self.collections.write().await;
        let Some(slot) = c.members.iter_mut().find(|m| m.id == member.id) else {
            return false;
        };
        tracing::info!(member_id = %member.id, "Member updated");
        *slot = member;
        c.revision += 1;
        true
    }

    /// Append a shipping address.
    pub async fn add_address(&self, address: ShippingAddress) {
        let mut c = self.collections.write().await;
        tracing::info!(address_id = %address.id, member_id = %address.member_id, "Address added");
        c.addresses.push(address);
        c.revision += 1;
    }

    /// Number of mutations applied since startup.
    pub async fn revision(&self) -> u64 {
        self.collections.read().await.revision
    }
}

/// Addresses owned by `member_id`, in slice order.
#[must_use]
pub fn addresses_owned_by(addresses: &[ShippingAddress], member_id: &MemberId) -> Vec<ShippingAddress> {
    addresses
        .iter()
        .filter(|a| a.is_owned_by(member_id))
        .cloned()
        .collect()
}
