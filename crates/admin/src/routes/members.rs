//! Member list and member edit handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use protein_admin_core::{Email, Member, MemberId, normalize_phone};

use crate::{
    error::AppError,
    middleware::RequireAuth,
    router::Route,
    routes::{
        Layout,
        forms::{FormErrors, checked, non_blank, required},
    },
    state::AppState,
};

// =============================================================================
// Member List
// =============================================================================

/// Member row for the list table.
#[derive(Debug, Clone)]
pub struct MemberRowView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub joined_at: String,
    pub is_active: bool,
    pub edit_href: String,
}

impl From<&Member> for MemberRowView {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            email: member.email.to_string(),
            phone: member.phone.clone(),
            joined_at: member.joined_at.clone(),
            is_active: member.is_active,
            edit_href: Route::EditMember(member.id.clone()).path(),
        }
    }
}

/// Query parameters for the member list.
#[derive(Debug, Default, Deserialize)]
pub struct MemberListQuery {
    pub q: Option<String>,
}

/// Member list template.
#[derive(Template, WebTemplate)]
#[template(path = "members/index.html")]
pub struct MembersIndexTemplate {
    pub layout: Layout,
    pub members: Vec<MemberRowView>,
    pub q: String,
}

/// Member list page handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<MemberListQuery>,
) -> MembersIndexTemplate {
    let q = query.q.unwrap_or_default();
    let members = state.store().members().await;

    MembersIndexTemplate {
        layout: Layout::new(&operator, &Route::Members),
        members: members
            .iter()
            .filter(|m| m.matches_search(&q))
            .map(MemberRowView::from)
            .collect(),
        q,
    }
}

// =============================================================================
// Member Edit
// =============================================================================

/// Member edit form fields.
#[derive(Debug, Default, Deserialize)]
pub struct MemberInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<String>,
}

impl MemberInput {
    /// Apply the form to `current`.
    ///
    /// Id and join date are carried over. The email must be well formed and
    /// not used by any other member. A phone number is normalized; a blank
    /// one clears the field.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    pub fn apply(&self, current: &Member, members: &[Member]) -> Result<Member, FormErrors> {
        let mut errors = FormErrors::default();

        let name = required(&mut errors, "name", self.name.as_deref(), "氏名を入力してください");

        let email = match non_blank(self.email.as_deref()) {
            None => {
                errors.add("email", "メールアドレスを入力してください");
                None
            }
            Some(raw) => match Email::parse(&raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected member email");
                    errors.add("email", "メールアドレスの形式が正しくありません");
                    None
                }
            },
        };
        if let Some(email) = &email {
            let taken = members
                .iter()
                .any(|m| m.id != current.id && m.email.as_str().eq_ignore_ascii_case(email.as_str()));
            if taken {
                errors.add("email", "このメールアドレスは既に登録されています");
            }
        }

        match email {
            Some(email) if errors.is_empty() => Ok(Member {
                id: current.id.clone(),
                name,
                email,
                phone: non_blank(self.phone.as_deref()).map(|p| normalize_phone(&p)),
                is_active: checked(self.is_active.as_deref()),
                joined_at: current.joined_at.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Field values shown in the edit form.
#[derive(Debug, Clone)]
pub struct MemberFormView {
    pub id: String,
    pub joined_at: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
}

impl MemberFormView {
    fn from_member(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            joined_at: member.joined_at.clone(),
            name: member.name.clone(),
            email: member.email.to_string(),
            phone: member.phone.clone().unwrap_or_default(),
            is_active: member.is_active,
        }
    }

    fn from_input(member: &Member, input: &MemberInput) -> Self {
        Self {
            id: member.id.to_string(),
            joined_at: member.joined_at.clone(),
            name: input.name.clone().unwrap_or_default(),
            email: input.email.clone().unwrap_or_default(),
            phone: input.phone.clone().unwrap_or_default(),
            is_active: checked(input.is_active.as_deref()),
        }
    }
}

/// Member edit template.
#[derive(Template, WebTemplate)]
#[template(path = "members/edit.html")]
pub struct MemberEditTemplate {
    pub layout: Layout,
    pub action: String,
    pub form: MemberFormView,
    pub errors: FormErrors,
}

/// Member edit form handler.
#[instrument(skip(operator, state))]
pub async fn edit_page(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<MemberEditTemplate, AppError> {
    let id = MemberId::new(id);
    let member = state
        .store()
        .member(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("member {id}")))?;
    let route = Route::EditMember(id);

    Ok(MemberEditTemplate {
        layout: Layout::new(&operator, &route),
        action: route.path(),
        form: MemberFormView::from_member(&member),
        errors: FormErrors::default(),
    })
}

/// Save an edited member.
#[instrument(skip(operator, state, input))]
pub async fn update(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(input): Form<MemberInput>,
) -> Result<Response, AppError> {
    let id = MemberId::new(id);
    let members = state.store().members().await;
    let current = members
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::NotFound(format!("member {id}")))?;

    match input.apply(current, &members) {
        Ok(updated) => {
            state.store().update_member(updated).await;
            Ok(Redirect::to(&Route::Members.path()).into_response())
        }
        Err(errors) => {
            let route = Route::EditMember(id);
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                MemberEditTemplate {
                    layout: Layout::new(&operator, &route),
                    action: route.path(),
                    form: MemberFormView::from_input(current, &input),
                    errors,
                },
            )
                .into_response())
        }
    }
}
