//! Order creation form state.
//!
//! A draft tracks the chosen member, the chosen address among that member's
//! addresses, a status and a memo. Choosing a member always replaces the
//! address choice with the member's first address.

use std::ops::Range;

use chrono::NaiveDateTime;
use rand::Rng;
use thiserror::Error;

use protein_admin_core::{AddressId, Member, MemberId, Order, OrderId, OrderStatus, ShippingAddress};

use crate::store::addresses_owned_by;

/// Placeholder total, in yen. Orders carry no line items.
pub const AMOUNT_RANGE: Range<u32> = 3000..23000;

/// Random draws before giving up on finding an unused order id.
pub const ID_ATTEMPTS: usize = 32;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Reasons a draft cannot become an order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("member and shipping address are both required")]
    MissingSelection,

    #[error("unknown member {0}")]
    UnknownMember(MemberId),

    #[error("address {0} is not a shipping address of the selected member")]
    UnknownAddress(AddressId),

    #[error("no unused order id after {0} attempts")]
    IdSpaceExhausted(usize),

    #[error("unknown order status {0:?}")]
    UnknownStatus(String),
}

impl DraftError {
    /// Message shown above the form.
    #[must_use]
    pub const fn alert(&self) -> &'static str {
        match self {
            Self::MissingSelection => "会員と配送先を選択してください",
            Self::UnknownMember(_) => "選択された会員が見つかりません",
            Self::UnknownAddress(_) => "選択された配送先はこの会員に登録されていません",
            Self::IdSpaceExhausted(_) => "注文IDを採番できませんでした。再度お試しください",
            Self::UnknownStatus(_) => "ステータスを選択し直してください",
        }
    }
}

/// In-progress order form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    member_id: Option<MemberId>,
    address_id: Option<AddressId>,
    candidates: Vec<ShippingAddress>,
    pub status: OrderStatus,
    memo: String,
}

impl OrderDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a member, or clear the choice with `None`.
    ///
    /// The candidate list becomes the member's addresses in collection
    /// order, and the first of them is selected.
    pub fn select_member(&mut self, member_id: Option<MemberId>, addresses: &[ShippingAddress]) {
        self.candidates = member_id
            .as_ref()
            .map(|id| addresses_owned_by(addresses, id))
            .unwrap_or_default();
        self.address_id = self.candidates.first().map(|a| a.id.clone());
        self.member_id = member_id;
    }

    /// Choose one of the candidate addresses, or clear the choice.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::UnknownAddress`] and keeps the current choice
    /// when `address_id` is not a candidate.
    pub fn select_address(&mut self, address_id: Option<AddressId>) -> Result<(), DraftError> {
        match address_id {
            None => {
                self.address_id = None;
                Ok(())
            }
            Some(id) if self.candidates.iter().any(|a| a.id == id) => {
                self.address_id = Some(id);
                Ok(())
            }
            Some(id) => Err(DraftError::UnknownAddress(id)),
        }
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.memo = memo.into();
    }

    #[must_use]
    pub fn member_id(&self) -> Option<&MemberId> {
        self.member_id.as_ref()
    }

    #[must_use]
    pub fn address_id(&self) -> Option<&AddressId> {
        self.address_id.as_ref()
    }

    /// Addresses the current member can ship to.
    #[must_use]
    pub fn candidates(&self) -> &[ShippingAddress] {
        &self.candidates
    }

    #[must_use]
    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Build the order this draft describes.
    ///
    /// Member and address are looked up in the given collections, so a
    /// draft built from an older read still resolves against current data.
    ///
    /// # Errors
    ///
    /// Returns an error if a selection is missing, the member or address no
    /// longer resolves, or no unused order id could be drawn.
    pub fn submit(
        &self,
        members: &[Member],
        addresses: &[ShippingAddress],
        existing: &[Order],
        rng: &mut impl Rng,
        now: NaiveDateTime,
    ) -> Result<Order, DraftError> {
        let (Some(member_id), Some(address_id)) = (&self.member_id, &self.address_id) else {
            return Err(DraftError::MissingSelection);
        };

        let member = members
            .iter()
            .find(|m| &m.id == member_id)
            .ok_or_else(|| DraftError::UnknownMember(member_id.clone()))?;
        let address = addresses
            .iter()
            .find(|a| &a.id == address_id && a.is_owned_by(member_id))
            .ok_or_else(|| DraftError::UnknownAddress(address_id.clone()))?;

        Ok(Order {
            id: generate_order_id(&mut *rng, existing)?,
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            shipping_address_id: address.id.clone(),
            shipping_address_label: address.label.clone(),
            status: self.status,
            memo: (!self.memo.trim().is_empty()).then(|| self.memo.clone()),
            created_at: now.format(CREATED_AT_FORMAT).to_string(),
            total_amount: Some(rng.random_range(AMOUNT_RANGE)),
        })
    }
}

/// Draw `ORD-0000`..`ORD-9999` ids until one is unused.
///
/// # Errors
///
/// Returns [`DraftError::IdSpaceExhausted`] after [`ID_ATTEMPTS`] collisions.
pub fn generate_order_id(rng: &mut impl Rng, existing: &[Order]) -> Result<OrderId, DraftError> {
    for _ in 0..ID_ATTEMPTS {
        let candidate = OrderId::from_number(rng.random_range(0..=9999));
        if !existing.iter().any(|o| o.id == candidate) {
            return Ok(candidate);
        }
    }
    tracing::warn!(existing = existing.len(), "Order id space looks exhausted");
    Err(DraftError::IdSpaceExhausted(ID_ATTEMPTS))
}
