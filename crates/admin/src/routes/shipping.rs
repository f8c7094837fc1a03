//! Shipping address list and creation handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use protein_admin_core::{
    AddressId, Member, MemberId, ShippingAddress, normalize_phone, normalize_postal_code,
};

use crate::{
    middleware::RequireAuth,
    router::Route,
    routes::{
        Layout,
        forms::{FormErrors, checked, non_blank, required},
        orders::SelectOption,
    },
    state::AppState,
};

/// Owner name shown when an address points at no known member.
const UNKNOWN_OWNER: &str = "不明";

fn member_options(members: &[Member], selected: Option<&MemberId>) -> Vec<SelectOption> {
    members
        .iter()
        .map(|m| SelectOption {
            value: m.id.to_string(),
            label: m.name.clone(),
            selected: selected == Some(&m.id),
        })
        .collect()
}

// =============================================================================
// Address List
// =============================================================================

/// Address card on the list page.
#[derive(Debug, Clone)]
pub struct AddressCardView {
    pub id: String,
    pub label: String,
    pub owner_name: String,
    pub recipient_name: String,
    pub postal_code: String,
    pub address1: String,
    pub address2: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

impl AddressCardView {
    fn new(address: &ShippingAddress, members: &[Member]) -> Self {
        Self {
            id: address.id.to_string(),
            label: address.label.clone(),
            owner_name: owner_name(members, &address.member_id).to_string(),
            recipient_name: address.recipient_name.clone(),
            postal_code: address.postal_code.clone(),
            address1: address.address1.clone(),
            address2: address.address2.clone(),
            phone: address.phone.clone(),
            is_active: address.is_active,
        }
    }
}

/// Name of the member owning an address, or 不明.
#[must_use]
pub fn owner_name<'a>(members: &'a [Member], member_id: &MemberId) -> &'a str {
    members
        .iter()
        .find(|m| &m.id == member_id)
        .map_or(UNKNOWN_OWNER, |m| m.name.as_str())
}

/// Query parameters for the address list.
#[derive(Debug, Default, Deserialize)]
pub struct ShippingListQuery {
    pub member_id: Option<String>,
}

impl ShippingListQuery {
    /// Selected member, or `None` for `all` and blank.
    fn member_id(&self) -> Option<MemberId> {
        non_blank(self.member_id.as_deref())
            .filter(|id| id != "all")
            .map(MemberId::new)
    }
}

/// Address list template.
#[derive(Template, WebTemplate)]
#[template(path = "shipping/index.html")]
pub struct ShippingIndexTemplate {
    pub layout: Layout,
    pub addresses: Vec<AddressCardView>,
    pub member_options: Vec<SelectOption>,
    pub all_selected: bool,
    pub new_href: String,
}

/// Address list page handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ShippingListQuery>,
) -> ShippingIndexTemplate {
    let snapshot = state.store().snapshot().await;
    let filter = query.member_id();

    let addresses = snapshot
        .addresses
        .iter()
        .filter(|a| filter.as_ref().is_none_or(|id| a.is_owned_by(id)))
        .map(|a| AddressCardView::new(a, &snapshot.members))
        .collect();

    let new_href = filter.as_ref().map_or_else(
        || Route::NewAddress.path(),
        |id| {
            format!(
                "{}?member_id={}",
                Route::NewAddress.path(),
                urlencoding::encode(id.as_str())
            )
        },
    );

    ShippingIndexTemplate {
        layout: Layout::new(&operator, &Route::Shipping),
        addresses,
        member_options: member_options(&snapshot.members, filter.as_ref()),
        all_selected: filter.is_none(),
        new_href,
    }
}

// =============================================================================
// New Address
// =============================================================================

/// New address form fields.
#[derive(Debug, Default, Deserialize)]
pub struct AddressInput {
    pub member_id: Option<String>,
    pub label: Option<String>,
    pub postal_code: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub recipient_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<String>,
}

impl AddressInput {
    /// Validate the form into a new address with the next free id.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    pub fn build(
        &self,
        members: &[Member],
        addresses: &[ShippingAddress],
    ) -> Result<ShippingAddress, FormErrors> {
        let mut errors = FormErrors::default();

        let member_id = non_blank(self.member_id.as_deref()).map(MemberId::new);
        match &member_id {
            None => errors.add("member_id", "会員を選択してください"),
            Some(id) if !members.iter().any(|m| &m.id == id) => {
                errors.add("member_id", "選択された会員が見つかりません");
            }
            Some(_) => {}
        }

        let label = required(&mut errors, "label", self.label.as_deref(), "ラベルを入力してください");
        let postal_code = required(
            &mut errors,
            "postal_code",
            self.postal_code.as_deref(),
            "郵便番号を入力してください",
        );
        let address1 = required(
            &mut errors,
            "address1",
            self.address1.as_deref(),
            "都道府県・市区町村を入力してください",
        );
        let address2 = required(
            &mut errors,
            "address2",
            self.address2.as_deref(),
            "番地・建物名を入力してください",
        );
        let recipient_name = required(
            &mut errors,
            "recipient_name",
            self.recipient_name.as_deref(),
            "受取人名を入力してください",
        );

        match member_id {
            Some(member_id) if errors.is_empty() => Ok(ShippingAddress {
                id: next_address_id(addresses),
                member_id,
                label,
                postal_code: normalize_postal_code(&postal_code),
                address1,
                address2,
                recipient_name,
                phone: non_blank(self.phone.as_deref()).map(|p| normalize_phone(&p)),
                is_active: checked(self.is_active.as_deref()),
            }),
            _ => Err(errors),
        }
    }
}

/// Next `a{n}` id after the highest numbered existing address.
#[must_use]
pub fn next_address_id(addresses: &[ShippingAddress]) -> AddressId {
    let max = addresses
        .iter()
        .filter_map(|a| a.id.as_str().strip_prefix('a')?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    AddressId::new(format!("a{}", max + 1))
}

/// Field values shown in the new address form.
#[derive(Debug, Clone, Default)]
pub struct AddressFormView {
    pub label: String,
    pub postal_code: String,
    pub address1: String,
    pub address2: String,
    pub recipient_name: String,
    pub phone: String,
    pub is_active: bool,
}

impl From<&AddressInput> for AddressFormView {
    fn from(input: &AddressInput) -> Self {
        Self {
            label: input.label.clone().unwrap_or_default(),
            postal_code: input.postal_code.clone().unwrap_or_default(),
            address1: input.address1.clone().unwrap_or_default(),
            address2: input.address2.clone().unwrap_or_default(),
            recipient_name: input.recipient_name.clone().unwrap_or_default(),
            phone: input.phone.clone().unwrap_or_default(),
            is_active: checked(input.is_active.as_deref()),
        }
    }
}

/// New address template.
#[derive(Template, WebTemplate)]
#[template(path = "shipping/new.html")]
pub struct NewAddressTemplate {
    pub layout: Layout,
    pub member_options: Vec<SelectOption>,
    pub form: AddressFormView,
    pub errors: FormErrors,
}

/// New address form handler.
///
/// `?member_id=` preselects the owner.
#[instrument(skip_all)]
pub async fn new_page(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ShippingListQuery>,
) -> NewAddressTemplate {
    let members = state.store().members().await;

    NewAddressTemplate {
        layout: Layout::new(&operator, &Route::NewAddress),
        member_options: member_options(&members, query.member_id().as_ref()),
        form: AddressFormView {
            is_active: true,
            ..AddressFormView::default()
        },
        errors: FormErrors::default(),
    }
}

/// Create a shipping address.
#[instrument(skip_all)]
pub async fn create(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Form(input): Form<AddressInput>,
) -> Response {
    let snapshot = state.store().snapshot().await;

    match input.build(&snapshot.members, &snapshot.addresses) {
        Ok(address) => {
            state.store().add_address(address).await;
            Redirect::to(&Route::Shipping.path()).into_response()
        }
        Err(errors) => {
            let selected = non_blank(input.member_id.as_deref()).map(MemberId::new);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                NewAddressTemplate {
                    layout: Layout::new(&operator, &Route::NewAddress),
                    member_options: member_options(&snapshot.members, selected.as_ref()),
                    form: AddressFormView::from(&input),
                    errors,
                },
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::seed::Seed;

    use super::*;

    fn input(member_id: &str) -> AddressInput {
        AddressInput {
            member_id: Some(member_id.to_string()),
            label: Some("オフィス".to_string()),
            postal_code: Some("5300001".to_string()),
            address1: Some("大阪府大阪市北区".to_string()),
            address2: Some("梅田2-2".to_string()),
            recipient_name: Some("佐藤 花子".to_string()),
            phone: Some("0612345678".to_string()),
            is_active: Some("on".to_string()),
        }
    }

    #[test]
    fn test_build_normalizes_and_numbers() {
        let seed = Seed::load().unwrap();
        let address = input("m2").build(&seed.members, &seed.addresses).unwrap();
        assert_eq!(address.id, "a6");
        assert_eq!(address.member_id, "m2");
        assert_eq!(address.postal_code, "530-0001");
        assert_eq!(address.phone.as_deref(), Some("061-234-5678"));
        assert!(address.is_active);
    }

    #[test]
    fn test_build_rejects_unknown_member_and_blank_fields() {
        let seed = Seed::load().unwrap();
        let mut bad = input("m9");
        bad.label = Some("  ".to_string());
        bad.recipient_name = None;

        let errors = bad.build(&seed.members, &seed.addresses).unwrap_err();
        assert_eq!(errors.get("member_id"), Some("選択された会員が見つかりません"));
        assert!(errors.get("label").is_some());
        assert!(errors.get("recipient_name").is_some());
        assert!(errors.get("postal_code").is_none());
    }

    #[test]
    fn test_unchecked_box_is_inactive_and_blank_phone_is_none() {
        let seed = Seed::load().unwrap();
        let mut form = input("m1");
        form.is_active = None;
        form.phone = Some(String::new());
        let address = form.build(&seed.members, &seed.addresses).unwrap();
        assert!(!address.is_active);
        assert_eq!(address.phone, None);
    }

    #[test]
    fn test_next_address_id() {
        assert_eq!(next_address_id(&[]), "a1");
        let mut addresses = Seed::load().unwrap().addresses;
        if let Some(last) = addresses.last_mut() {
            last.id = AddressId::new("a12");
        }
        assert_eq!(next_address_id(&addresses), "a13");
    }

    #[test]
    fn test_owner_name_fallback() {
        let members = Seed::load().unwrap().members;
        assert_eq!(owner_name(&members, &MemberId::new("m3")), "鈴木 一郎");
        assert_eq!(owner_name(&members, &MemberId::new("m0")), "不明");
    }

    #[test]
    fn test_list_query_all_means_no_filter() {
        let query = ShippingListQuery {
            member_id: Some("all".to_string()),
        };
        assert!(query.member_id().is_none());
        let query = ShippingListQuery {
            member_id: Some("m2".to_string()),
        };
        assert_eq!(query.member_id(), Some(MemberId::new("m2")));
    }
}
