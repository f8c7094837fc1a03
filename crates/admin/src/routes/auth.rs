//! Login and logout handlers.
//!
//! Any non-empty email and password pair is accepted.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_operator};
use crate::middleware::AuthSession;
use crate::router::Route;

const LOGIN_FAILED: &str = "メールアドレスまたはパスワードが正しくありません。";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
}

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        email: String::new(),
        error: None,
    }
}

/// Handle login form submission.
///
/// Success always lands on the dashboard.
#[instrument(skip_all)]
pub async fn login(auth: AuthSession, Form(form): Form<LoginForm>) -> Result<Response, AppError> {
    let LoginForm { email, password } = form;
    let password = SecretString::from(password);

    if auth.login(&email, &password).await? {
        set_sentry_operator(&email);
        tracing::info!(email = %email, "Operator logged in");
        return Ok(Redirect::to(&Route::DEFAULT.path()).into_response());
    }

    tracing::info!(email = %email, "Login rejected");
    Ok((
        StatusCode::UNAUTHORIZED,
        LoginTemplate {
            email,
            error: Some(LOGIN_FAILED.to_string()),
        },
    )
        .into_response())
}

/// Log out and return to the login page.
#[instrument(skip(auth))]
pub async fn logout(auth: AuthSession) -> Result<Redirect, AppError> {
    let state = auth.logout().await?;
    clear_sentry_user();
    tracing::info!(authenticated = state.is_authenticated(), "Operator logged out");
    Ok(Redirect::to(&Route::Login.path()))
}

/// `GET /logout` does not end the session; logging out takes the POST form.
pub async fn logout_page() -> Redirect {
    Redirect::to(&Route::DEFAULT.path())
}
