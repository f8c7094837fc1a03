//! End-to-end tests for the ProteinAdmin dashboard.
//!
//! Each test boots the full application (router, session layer, route guard
//! and seeded store) on an ephemeral local port and drives it over HTTP with
//! a cookie-keeping client, the way a browser would.
//!
//! ```bash
//! cargo test -p protein-admin-integration-tests
//! ```

use std::net::SocketAddr;

use protein_admin::{app, config::AdminConfig, state::AppState};
use reqwest::{Client, Response, redirect};

/// A running admin server plus a client bound to it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    pub client: Client,
}

impl TestServer {
    /// Start a server seeded with the bundled snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the seed cannot be loaded or the port cannot be bound.
    pub async fn start() -> Self {
        let state = AppState::new(AdminConfig::default()).expect("Failed to load seed data");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let router = app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            addr,
            state,
            client,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET `path` without following redirects.
    ///
    /// # Panics
    ///
    /// Panics on transport errors.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    /// POST a urlencoded form to `path` without following redirects.
    ///
    /// # Panics
    ///
    /// Panics on transport errors.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// Log in with demo credentials; the session cookie is kept by the client.
    ///
    /// # Panics
    ///
    /// Panics if the login is not accepted.
    pub async fn login(&self) {
        let resp = self
            .post_form(
                "/login",
                &[("email", "operator@example.com"), ("password", "demo")],
            )
            .await;
        assert!(
            resp.status().is_redirection(),
            "login returned {}",
            resp.status()
        );
        assert_eq!(location(&resp), "/");
    }
}

/// `Location` header of a redirect, or an empty string.
#[must_use]
pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
