//! Authenticated user profile as returned by the auth collaborator.

use serde::{Deserialize, Serialize};

use super::{Email, UserId, UserRole};

/// A signed-in investor or vineyard owner.
///
/// The cart never depends on this type; it is device scoped, not account scoped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
