//! In-memory session state and login credentials.
//!
//! The session is owned by the [`SimplytrackClient`](crate::SimplytrackClient)
//! and lives exactly as long as it: created logged-out, mutated only by
//! `login`/`logout`, never persisted.

use serde::Serialize;

/// Whether the user is authenticated and which token to present.
///
/// Both fields start empty; a successful login sets both, logout clears both.
/// There is no refresh or expiry handling -- the token is trusted until the
/// client logs out or is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    logged_in: bool,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Authorization` header value for the current token, if logged in.
    pub(crate) fn bearer(&self) -> Option<String> {
        if !self.logged_in {
            return None;
        }
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub(crate) fn set_logged_in(&mut self, token: String) {
        self.token = Some(token);
        self.logged_in = true;
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.logged_in = false;
    }
}

/// Login request body for the auth endpoint.
///
/// Serializes as `{"email": ..., "password": ..., "roles": [...]}`, the
/// contract the auth service expects.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

impl Credentials {
    /// Credentials with the default `ROLE_USER` role.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            roles: vec!["ROLE_USER".to_string()],
        }
    }

    /// Replace the role list.
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }
}
