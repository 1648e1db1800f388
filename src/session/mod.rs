//! Authentication context consumed by the vote controller and the HTTP adapter.
//!
//! The session is an explicit object handed to whoever needs it. Nothing here
//! reads process-wide storage.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
#[cfg(test)]
use mockall::automock;
use tracing::debug;

#[cfg_attr(test, automock)]
pub trait AuthContext: Send + Sync + 'static {
    /// Whether a user is signed in right now
    fn is_authenticated(&self) -> bool;

    /// Bearer credential attached to every remote call
    fn bearer_token(&self) -> Option<String>;
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub user_id: Option<u64>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(
        mut self,
        user_id: u64,
    ) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

impl fmt::Debug for Credential {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Signed-in state shared between controllers and the HTTP adapter.
///
/// Sign-in and sign-out swap the credential atomically; readers never block.
#[derive(Default)]
pub struct Session {
    credential: ArcSwapOption<Credential>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: ArcSwapOption::from_pointee(credential),
        }
    }

    pub fn sign_in(
        &self,
        credential: Credential,
    ) {
        debug!(user_id = ?credential.user_id, "session signed in");
        self.credential.store(Some(Arc::new(credential)));
    }

    pub fn sign_out(&self) {
        debug!("session signed out");
        self.credential.store(None);
    }

    pub fn current(&self) -> Option<Arc<Credential>> {
        self.credential.load_full()
    }
}

impl fmt::Debug for Session {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Session").field("credential", &self.current()).finish()
    }
}

impl AuthContext for Session {
    fn is_authenticated(&self) -> bool {
        self.credential.load().is_some()
    }

    fn bearer_token(&self) -> Option<String> {
        self.credential.load().as_ref().map(|c| c.token.clone())
    }
}
