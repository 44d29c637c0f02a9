//! Password-gated admin mode.
//!
//! Admin mode only unlocks the image upload controls. The secret is a shared
//! literal shipped with the storefront; it is not an authentication boundary
//! and must not be treated as one.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

/// Errors from the admin gate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdminError {
    /// The entered password did not match the configured secret.
    #[error("wrong password")]
    WrongPassword,

    /// The action requires admin mode.
    #[error("admin mode required")]
    NotAdmin,
}

/// Admin gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminState {
    #[default]
    Guest,
    Admin,
}

/// Guest/Admin state machine.
///
/// `Guest -> Admin` on an exact password match, `Admin -> Guest` on logout.
/// No expiry, and nothing is persisted.
#[derive(Debug)]
pub struct AdminGate {
    secret: SecretString,
    state: AdminState,
}

impl AdminGate {
    /// Create a gate in the `Guest` state.
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            state: AdminState::Guest,
        }
    }

    #[must_use]
    pub const fn state(&self) -> AdminState {
        self.state
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state == AdminState::Admin
    }

    /// Compare `attempt` against the secret and enter admin mode on a match.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::WrongPassword`] on mismatch; the state is unchanged.
    pub fn login(&mut self, attempt: &str) -> Result<(), AdminError> {
        if attempt == self.secret.expose_secret() {
            self.state = AdminState::Admin;
            Ok(())
        } else {
            Err(AdminError::WrongPassword)
        }
    }

    /// Leave admin mode. Returns `true` if the state changed.
    pub fn logout(&mut self) -> bool {
        let was_admin = self.is_admin();
        self.state = AdminState::Guest;
        was_admin
    }

    /// # Errors
    ///
    /// Returns [`AdminError::NotAdmin`] in the `Guest` state.
    pub fn require_admin(&self) -> Result<(), AdminError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AdminError::NotAdmin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AdminGate {
        AdminGate::new(SecretString::from("plumpadmin"))
    }

    #[test]
    fn test_starts_as_guest() {
        let gate = gate();
        assert_eq!(gate.state(), AdminState::Guest);
        assert_eq!(gate.require_admin(), Err(AdminError::NotAdmin));
    }

    #[test]
    fn test_exact_secret_enters_admin() {
        let mut gate = gate();
        assert_eq!(gate.login("plumpadmin"), Ok(()));
        assert_eq!(gate.state(), AdminState::Admin);
        assert_eq!(gate.require_admin(), Ok(()));
    }

    #[test]
    fn test_wrong_secret_stays_guest() {
        let mut gate = gate();
        for attempt in ["", "plumpadmin ", "PLUMPADMIN", "plump", "letmein"] {
            assert_eq!(gate.login(attempt), Err(AdminError::WrongPassword));
            assert_eq!(gate.state(), AdminState::Guest);
        }
    }

    #[test]
    fn test_logout_returns_to_guest() {
        let mut gate = gate();
        assert!(!gate.logout());

        gate.login("plumpadmin").ok();
        assert!(gate.logout());
        assert_eq!(gate.state(), AdminState::Guest);
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let output = format!("{:?}", gate());
        assert!(!output.contains("plumpadmin"));
    }
}
