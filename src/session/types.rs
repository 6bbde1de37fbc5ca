//! Wire types for the Yggdrasil-style account API. Field names follow the
//! protocol's camelCase convention; unknown response fields are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimal identity reference to a game character, as supplied by the login
/// response. Not validated client-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
}

/// The persisted session. `access_token` is mandatory on the wire, which is
/// what makes a login response usable at all; the profile list is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(
        rename = "availableProfiles",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_profiles: Option<Vec<ProfileSummary>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthenticateRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub request_user: bool,
}

/// Body for `/extern/register/profile`. The password key must be absent from
/// the JSON when no password was supplied, so "no password" and "empty
/// password" stay distinguishable on the wire.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterProfileRequest<'a> {
    pub profile_name: &'a str,
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Full profile as served by the session server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetail {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<ProfileProperty>,
}

/// Best-effort server metadata from the API root.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerMeta {
    #[serde(default)]
    pub meta: serde_json::Value,
    #[serde(rename = "skinDomains", default, skip_serializing_if = "Vec::is_empty")]
    pub skin_domains: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureType {
    Skin,
    Cape,
}

impl TextureType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TextureType::Skin => "skin",
            TextureType::Cape => "cape",
        }
    }
}

impl fmt::Display for TextureType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{RegisterProfileRequest, Session, TextureType};
    use serde_json::json;

    #[test]
    fn session_deserializes_with_extra_fields() {
        let session: Session = serde_json::from_value(json!({
            "accessToken": "token-abc",
            "clientToken": "ignored",
            "availableProfiles": [{"id": "uuid-1", "name": "Steve"}],
            "user": {"id": "ignored"}
        }))
        .expect("should deserialize");

        assert_eq!(session.access_token, "token-abc");
        let profiles = session.available_profiles.expect("profiles present");
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Steve");
    }

    #[test]
    fn session_requires_access_token() {
        let result: Result<Session, _> = serde_json::from_value(json!({
            "availableProfiles": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn register_profile_request_omits_missing_password() {
        let without = serde_json::to_value(RegisterProfileRequest {
            profile_name: "Steve",
            username: "a@b.com",
            password: None,
        })
        .expect("should serialize");
        assert_eq!(without, json!({"profileName": "Steve", "username": "a@b.com"}));

        let with = serde_json::to_value(RegisterProfileRequest {
            profile_name: "Steve",
            username: "a@b.com",
            password: Some("pw"),
        })
        .expect("should serialize");
        assert_eq!(
            with,
            json!({"profileName": "Steve", "username": "a@b.com", "password": "pw"})
        );
    }

    #[test]
    fn texture_type_names_match_the_endpoint_segments() {
        assert_eq!(TextureType::Skin.to_string(), "skin");
        assert_eq!(TextureType::Cape.to_string(), "cape");
    }
}
