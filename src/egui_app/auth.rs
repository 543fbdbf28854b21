/**
 * Authentication State Module
 *
 * Tracks where the user is in the sign-in lifecycle. Transitions not listed
 * on `AuthPhase` are ignored.
 */

use crate::shared::api::UserProfile;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    SessionExpired,
}

/// Authentication state shown by the header and the auth views
#[derive(Debug, Clone)]
pub struct AuthState {
    phase: AuthPhase,
    pub user: Option<UserProfile>,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            phase: AuthPhase::Anonymous,
            user: None,
            error: None,
        }
    }
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start already signed in, from a restored session
    pub fn restored(user: UserProfile) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            user: Some(user),
            error: None,
        }
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.phase == AuthPhase::Authenticating
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn transition(&mut self, from: AuthPhase, to: AuthPhase) -> bool {
        if self.phase != from {
            tracing::debug!("Ignoring auth transition {:?} -> {:?} while {:?}", from, to, self.phase);
            return false;
        }
        tracing::debug!("Auth phase {:?} -> {:?}", from, to);
        self.phase = to;
        true
    }

    /// Anonymous --submit credentials--> Authenticating
    pub fn submit(&mut self) -> bool {
        let moved = self.transition(AuthPhase::Anonymous, AuthPhase::Authenticating);
        if moved {
            self.error = None;
        }
        moved
    }

    /// Authenticating --2xx+token--> Authenticated
    pub fn succeed(&mut self, user: UserProfile) -> bool {
        let moved = self.transition(AuthPhase::Authenticating, AuthPhase::Authenticated);
        if moved {
            self.user = Some(user);
            self.error = None;
        }
        moved
    }

    /// Authenticating --4xx/network error--> Anonymous
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        let moved = self.transition(AuthPhase::Authenticating, AuthPhase::Anonymous);
        if moved {
            self.error = Some(error.into());
        }
        moved
    }

    /// Authenticated --401 on any call--> SessionExpired
    pub fn expire(&mut self) -> bool {
        self.transition(AuthPhase::Authenticated, AuthPhase::SessionExpired)
    }

    /// SessionExpired --clear+redirect--> Anonymous
    pub fn acknowledge_expiry(&mut self) -> bool {
        let moved = self.transition(AuthPhase::SessionExpired, AuthPhase::Anonymous);
        if moved {
            self.user = None;
        }
        moved
    }

    /// Voluntary logout from any phase
    pub fn sign_out(&mut self) {
        *self = Self::new();
    }
}
