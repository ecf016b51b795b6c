//! # Identifiers
//!
//! Session identifier minted by identity resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of a resolved-identity session.
///
/// # Examples
///
/// ```
/// use osago_quotes::domain::value_objects::SessionId;
///
/// let id = SessionId::new_v4();
/// let parsed: SessionId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mints a fresh random session id.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Builds the namespaced session-store key, `"<namespace>:session:<uuid>"`.
    #[must_use]
    pub fn store_key(&self, namespace: &str) -> String {
        format!("{}:session:{}", namespace, self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(SessionId::new_v4(), SessionId::new_v4());
    }

    #[test]
    fn store_key_is_namespaced() {
        let id: SessionId = "7f8d1c1e-7f3a-4c5b-9a0d-2f1e3b4c5d6e".parse().unwrap();
        assert_eq!(
            id.store_key("osago"),
            "osago:session:7f8d1c1e-7f3a-4c5b-9a0d-2f1e3b4c5d6e"
        );
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!("not-a-session".parse::<SessionId>().is_err());
    }
}
