//! Authentication extractors for admin.
//!
//! [`AuthSession`] owns the login flag stored in the session.
//! [`RequireAuth`] hands the logged-in operator to page handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::Session;

use crate::models::{AUTH_SENTINEL, CurrentOperator, session::is_sentinel, session_keys};
use crate::router::AuthState;

/// Whether a login form submission is accepted.
///
/// Any non-empty email and password pair logs in. There is no user
/// directory behind the panel.
#[must_use]
pub fn credentials_accepted(email: &str, password: &SecretString) -> bool {
    !email.is_empty() && !password.expose_secret().is_empty()
}

/// Session handle scoped to authentication.
#[derive(Debug, Clone)]
pub struct AuthSession {
    session: Session,
}

impl AuthSession {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Current authentication state.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn state(&self) -> Result<AuthState, tower_sessions::session::Error> {
        let flag: Option<String> = self.session.get(session_keys::AUTH_TOKEN).await?;
        Ok(if is_sentinel(flag.as_deref()) {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        })
    }

    /// Whether the session is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool, tower_sessions::session::Error> {
        Ok(self.state().await?.is_authenticated())
    }

    /// Attempt a login.
    ///
    /// Returns `Ok(false)` without touching the session when the
    /// credentials are rejected, whatever state the session was in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<bool, tower_sessions::session::Error> {
        let accepted = credentials_accepted(email, password);
        let next = self.state().await?.after_login(accepted);
        if !accepted {
            return Ok(false);
        }

        self.session.cycle_id().await?;
        self.session
            .insert(
                session_keys::OPERATOR,
                CurrentOperator {
                    email: email.to_string(),
                },
            )
            .await?;
        self.store_state(next).await?;
        Ok(true)
    }

    /// Clear the login flag and operator identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read or written.
    pub async fn logout(&self) -> Result<AuthState, tower_sessions::session::Error> {
        let next = self.state().await?.after_logout();
        self.store_state(next).await?;
        Ok(next)
    }

    async fn store_state(&self, state: AuthState) -> Result<(), tower_sessions::session::Error> {
        match state {
            AuthState::Authenticated => {
                self.session
                    .insert(session_keys::AUTH_TOKEN, AUTH_SENTINEL)
                    .await
            }
            AuthState::Unauthenticated => {
                self.session.remove::<String>(session_keys::AUTH_TOKEN).await?;
                self.session
                    .remove::<CurrentOperator>(session_keys::OPERATOR)
                    .await?;
                Ok(())
            }
        }
    }

    /// The logged-in operator, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn operator(&self) -> Result<Option<CurrentOperator>, tower_sessions::session::Error> {
        if !self.is_authenticated().await? {
            return Ok(None);
        }
        let operator = self
            .session
            .get::<CurrentOperator>(session_keys::OPERATOR)
            .await?
            .unwrap_or(CurrentOperator {
                email: String::new(),
            });
        Ok(Some(operator))
    }
}

/// Missing session layer; a wiring bug rather than a client error.
pub struct MissingSession;

impl IntoResponse for MissingSession {
    fn into_response(self) -> Response {
        tracing::error!("session layer not installed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self::new)
            .ok_or(MissingSession)
    }
}

/// Extractor that requires a logged-in operator.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(operator): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", operator.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentOperator);

/// Rejection for [`RequireAuth`].
pub enum AuthRejection {
    RedirectToLogin,
    Session(tower_sessions::session::Error),
    MissingSession,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Session(e) => crate::error::AppError::from(e).into_response(),
            Self::MissingSession => MissingSession.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthSession::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRejection::MissingSession)?;

        auth.operator()
            .await
            .map_err(AuthRejection::Session)?
            .map(Self)
            .ok_or(AuthRejection::RedirectToLogin)
    }
}
