use crate::db::queries::any_pomodoro_exists;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use serde::Serialize;
use std::fmt;

/// Shared-secret check in front of every mutation.
///
/// The comparison is plain string equality: it is not constant-time and
/// there is no rate limiting. The secret only keeps stray writes out of a
/// personal log; it is not a credential system.
#[derive(Clone, Default)]
pub struct AccessGate {
    secret: Option<String>,
}

/// Answer to a liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Liveness {
    pub authorized: bool,
    pub any_pomodoros_exist: bool,
}

impl AccessGate {
    /// An empty secret counts as no secret: nothing is ever authorized.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn authorize(&self, candidate: &str) -> bool {
        match &self.secret {
            Some(secret) => secret == candidate,
            None => false,
        }
    }

    /// `authorize`, as a `Result` for call sites that must stop on refusal.
    pub fn require(&self, candidate: Option<&str>) -> AppResult<()> {
        match candidate {
            Some(key) if self.authorize(key) => Ok(()),
            _ => {
                tracing::debug!(configured = self.is_configured(), "mutation refused");
                Err(AppError::Unauthorized)
            }
        }
    }

    /// Authorization outcome plus whether any pomodoro exists. The probe
    /// reads at most one row and is reported whatever the key.
    pub fn liveness(&self, conn: &Connection, candidate: Option<&str>) -> AppResult<Liveness> {
        Ok(Liveness {
            authorized: candidate.is_some_and(|k| self.authorize(k)),
            any_pomodoros_exist: any_pomodoro_exists(conn)?,
        })
    }
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AccessGate;

    #[test]
    fn matching_key_is_authorized() {
        let gate = AccessGate::new(Some("s3cret".into()));
        assert!(gate.authorize("s3cret"));
        assert!(!gate.authorize("S3CRET"));
        assert!(!gate.authorize(""));
        assert!(gate.require(Some("s3cret")).is_ok());
        assert!(gate.require(None).is_err());
    }

    #[test]
    fn unconfigured_gate_refuses_everything() {
        for gate in [AccessGate::new(None), AccessGate::new(Some(String::new()))] {
            assert!(!gate.is_configured());
            assert!(!gate.authorize(""));
            assert!(!gate.authorize("anything"));
        }
    }

    #[test]
    fn debug_output_never_shows_the_secret() {
        let gate = AccessGate::new(Some("hunter2".into()));
        let shown = format!("{gate:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("redacted"));
    }
}
