//! Access token claim decoding
//!
//! The client never verifies tokens: the payload is decoded only to read the
//! user id and role for navigation decisions. The backend stays the
//! authority on every request.

use jsonwebtoken::dangerous::insecure_decode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User roles known to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    /// Resource owner
    Locateur,
    /// Tenant
    Locataire,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Locateur => "LOCATEUR",
            Role::Locataire => "LOCATAIRE",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ClaimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "LOCATEUR" => Ok(Role::Locateur),
            "LOCATAIRE" => Ok(Role::Locataire),
            other => Err(ClaimsError::UnknownRole(other.to_string())),
        }
    }
}

/// Claim decoding errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClaimsError {
    #[error("No access token")]
    MissingToken,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl From<jsonwebtoken::errors::Error> for ClaimsError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ClaimsError::Malformed(err.to_string())
    }
}

/// Claim fields the client reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimField {
    UserId,
    Role,
}

/// Decoded claims, never persisted
///
/// Each claim is read on its own: a token without an id still yields its
/// role, and an unknown role leaves the id readable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    pub user_id: Option<String>,
    pub role: Option<Role>,
}

impl Claims {
    pub fn field(&self, field: ClaimField) -> Option<String> {
        match field {
            ClaimField::UserId => self.user_id.clone(),
            ClaimField::Role => self.role.map(|role| role.to_string()),
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Some(Role::SuperAdmin)
    }
}

/// Payload as emitted by the backend
///
/// The backend puts the user id in `id`; `sub` and `userId` are read as
/// fallbacks.
#[derive(Debug, Default, Deserialize)]
struct RawClaims {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    sub: Option<serde_json::Value>,
    #[serde(default, rename = "userId")]
    user_id: Option<serde_json::Value>,
    #[serde(default)]
    role: Option<serde_json::Value>,
}

/// Ids are strings or numbers depending on the backend entity
fn id_value(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(id) if !id.is_empty() => Some(id),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Decode the payload segment of an access token
///
/// Neither the signature, its algorithm nor the expiry is checked. Only an
/// absent token or an undecodable payload is an error.
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ClaimsError::MissingToken);
    }

    let raw = insecure_decode::<RawClaims>(token)?.claims;

    let user_id = id_value(raw.id)
        .or_else(|| id_value(raw.sub))
        .or_else(|| id_value(raw.user_id));

    let role = match raw.role {
        Some(serde_json::Value::String(role)) => match role.parse::<Role>() {
            Ok(role) => Some(role),
            Err(err) => {
                tracing::debug!("Ignoring role claim: {}", err);
                None
            }
        },
        _ => None,
    };

    Ok(Claims { user_id, role })
}
