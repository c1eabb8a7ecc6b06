//! Current user profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::auth::TokenStorage;
use crate::core::error::SessionError;
use crate::core::http::{ApiRequest, AuthClient, HttpTransport};

const PROFILE_PATH: &str = "/users/me";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Name to show in the header: full name, then username, then email
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if !name.is_empty() {
            return name;
        }
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.email)
            .to_string()
    }
}

/// Profile edits; unset fields are left unchanged
///
/// Email and identifiers are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.is_empty() {
            return Err(SessionError::Validation("Aucune modification.".to_string()));
        }
        if self.username.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(SessionError::Validation(
                "Le nom d'utilisateur ne peut pas être vide.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Profile endpoints
pub struct ProfileApi<'a, S, T> {
    client: &'a AuthClient<S, T>,
}

impl<'a, S: TokenStorage, T: HttpTransport> ProfileApi<'a, S, T> {
    pub fn new(client: &'a AuthClient<S, T>) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Profile, SessionError> {
        self.client.send_json(ApiRequest::get(PROFILE_PATH)).await
    }

    pub async fn update(&self, update: &ProfileUpdate) -> Result<Profile, SessionError> {
        update.validate()?;
        let request = ApiRequest::patch(PROFILE_PATH).json(update)?;
        let profile: Profile = self.client.send_json(request).await?;
        tracing::info!("Profile {} updated", profile.id);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::RefreshPolicy;
    use crate::core::http::Method;
    use crate::core::http::testing::test_session;
    use serde_json::json;

    fn profile_json() -> serde_json::Value {
        json!({
            "id": "u-1",
            "email": "claire@resa-chap.fr",
            "username": "claire",
            "firstName": "Claire",
            "lastName": "Martin",
            "contactPhone": null,
            "createdAt": "2025-09-12T10:00:00.000Z",
            "updatedAt": "2025-10-02T16:45:00.000Z",
        })
    }

    #[test]
    fn test_display_name() {
        let mut profile: Profile = serde_json::from_value(profile_json()).unwrap();
        assert_eq!(profile.display_name(), "Claire Martin");

        profile.last_name = None;
        assert_eq!(profile.display_name(), "Claire");

        profile.first_name = Some(" ".to_string());
        assert_eq!(profile.display_name(), "claire");

        profile.username = None;
        assert_eq!(profile.display_name(), "claire@resa-chap.fr");
    }

    #[test]
    fn test_update_validation() {
        assert!(ProfileUpdate::default().validate().is_err());

        let blank_username = ProfileUpdate {
            username: Some("  ".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(blank_username.validate().is_err());

        let phone = ProfileUpdate {
            contact_phone: Some("0601020304".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(phone.validate().is_ok());
    }

    #[tokio::test]
    async fn test_update_profile() {
        let (session, _navigator) = test_session(RefreshPolicy::FailFast);
        let client = AuthClient::new(session);
        client
            .session()
            .transport()
            .respond(Method::Patch, PROFILE_PATH, 200, profile_json());

        let update = ProfileUpdate {
            first_name: Some("Claire".to_string()),
            ..ProfileUpdate::default()
        };
        let profile = ProfileApi::new(&client).update(&update).await.unwrap();

        assert_eq!(profile.username.as_deref(), Some("claire"));
        assert_eq!(profile.contact_phone, None);
        let sent = client.session().transport().requests_to(PROFILE_PATH);
        assert_eq!(sent[0].json_body(), Some(&json!({ "firstName": "Claire" })));
    }
}
