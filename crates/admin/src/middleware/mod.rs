//! HTTP middleware for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (binary only)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//! 4. Session layer (tower-sessions with in-memory store)
//! 5. Route guard (login redirects, unknown paths)

pub mod auth;
pub mod guard;
pub mod session;

pub use auth::{AuthSession, RequireAuth};
pub use guard::route_guard;
pub use session::create_session_layer;
