//! Explicit login session.
//!
//! The dashboard only needs to know whether someone is signed in. Instead of a
//! flag read from ambient storage, the session is an object created by the host,
//! passed to whatever needs it, started with [`Session::login`] and torn down
//! with [`Session::logout`]. Credentials are not verified here.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::domain::forms::is_valid_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { email: String, since: DateTime<Utc> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
    #[error("Already signed in as {0}; log out first")]
    AlreadyAuthenticated(String),
    #[error("Not signed in")]
    NotAuthenticated,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    pub fn login(&mut self, email: &str) -> Result<(), SessionError> {
        let email = email.trim();
        if let SessionState::Authenticated { email: current, .. } = &self.state {
            return Err(SessionError::AlreadyAuthenticated(current.clone()));
        }
        if !is_valid_email(email) {
            return Err(SessionError::InvalidEmail(email.to_string()));
        }

        self.state = SessionState::Authenticated {
            email: email.to_string(),
            since: Utc::now(),
        };
        info!("Session started for {}", email);
        Ok(())
    }

    /// End the session; returns whether anyone was signed in
    pub fn logout(&mut self) -> bool {
        match std::mem::replace(&mut self.state, SessionState::Anonymous) {
            SessionState::Authenticated { email, .. } => {
                info!("Session ended for {}", email);
                true
            }
            SessionState::Anonymous => false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// E-mail of the signed-in user, or an error for guarded views
    pub fn require_authenticated(&self) -> Result<&str, SessionError> {
        match &self.state {
            SessionState::Authenticated { email, .. } => Ok(email),
            SessionState::Anonymous => Err(SessionError::NotAuthenticated),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
