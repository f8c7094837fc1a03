//! Request guard applying the route table to every page request.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::auth::AuthSession;
use crate::error::AppError;
use crate::router::{Resolution, resolve};

/// Redirect requests the current session may not see.
pub async fn route_guard(auth: AuthSession, request: Request, next: Next) -> Response {
    let state = match auth.state().await {
        Ok(state) => state,
        Err(e) => return AppError::from(e).into_response(),
    };

    match resolve(request.uri().path(), state) {
        Resolution::Render(_) => next.run(request).await,
        Resolution::Redirect(target) => {
            tracing::debug!(
                path = %request.uri().path(),
                target = %target.path(),
                "Redirecting guarded request"
            );
            Redirect::to(&target.path()).into_response()
        }
    }
}
