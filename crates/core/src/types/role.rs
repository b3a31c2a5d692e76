//! Account roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The two kinds of account the platform supports.
///
/// Serialized in lowercase (`"investor"`, `"vineyard"`), matching the profile
/// records stored by the hosted auth backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Funds vineyard projects and buys wine.
    #[default]
    Investor,
    /// Owns a vineyard, publishes projects and sells wine.
    Vineyard,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Investor => "investor",
            Self::Vineyard => "vineyard",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserRole::Vineyard).unwrap(),
            "\"vineyard\""
        );
        let role: UserRole = serde_json::from_str("\"investor\"").unwrap();
        assert_eq!(role, UserRole::Investor);
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }
}
