//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create string-backed ID wrappers that
//! prevent accidentally passing an address id where a member id is expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>`, `Display` and `AsRef<str>`
///
/// # Example
///
/// ```rust
/// # use protein_admin_core::define_id;
/// define_id!(CouponId);
/// define_id!(CampaignId);
///
/// let coupon = CouponId::new("c1");
/// let campaign = CampaignId::new("c1");
///
/// assert_eq!(coupon.as_str(), campaign.as_str());
/// // These are different types, so this won't compile:
/// // let _: CouponId = campaign;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(MemberId);
define_id!(AddressId);
define_id!(OrderId);

impl OrderId {
    /// Prefix shared by every order id (`ORD-0042`).
    pub const PREFIX: &'static str = "ORD-";

    /// Build an order id from its numeric part, zero-padded to four digits.
    ///
    /// ```rust
    /// # use protein_admin_core::OrderId;
    /// assert_eq!(OrderId::from_number(42).as_str(), "ORD-0042");
    /// ```
    #[must_use]
    pub fn from_number(number: u16) -> Self {
        Self(format!("{}{number:04}", Self::PREFIX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_as_str_agree() {
        let id = MemberId::new("m1");
        assert_eq!(id.to_string(), "m1");
        assert_eq!(id.as_str(), "m1");
    }

    #[test]
    fn test_compare_with_str() {
        let id = AddressId::from("a2");
        assert!(id == "a2");
        assert!(id != "a3");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = MemberId::new("m4");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m4\"");
        let back: MemberId = serde_json::from_str("\"m4\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_order_id_zero_padding() {
        assert_eq!(OrderId::from_number(0).as_str(), "ORD-0000");
        assert_eq!(OrderId::from_number(7).as_str(), "ORD-0007");
        assert_eq!(OrderId::from_number(9999).as_str(), "ORD-9999");
    }
}
