//! Auth API wire types
//!
//! Request and response bodies for the `/api/auth/*` endpoints. The backend
//! wraps every answer in `{ success, message, data }`; only `data` is
//! modelled per endpoint.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::shared::error::ApiError;

/// Opaque credential sent as `Authorization: Bearer <token>`.
///
/// Only constructible from a non-empty string, so holding one means the
/// header is safe to attach.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Never print the credential itself.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(<{} chars>)", self.0.len())
    }
}

impl TryFrom<String> for BearerToken {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "empty bearer token".to_string())
    }
}

impl From<BearerToken> for String {
    fn from(value: BearerToken) -> Self {
        value.0
    }
}

/// Body of `POST /api/auth/signup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/signin`. `login` accepts an email or a username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub login: String,
    pub password: String,
}

/// `data` of a successful sign-in or sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub user_id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl AuthPayload {
    /// Split the payload into the token and the user record kept in the session.
    pub fn into_session_parts(self) -> Result<(BearerToken, UserProfile), ApiError> {
        let token = self
            .token
            .and_then(BearerToken::new)
            .ok_or_else(|| ApiError::decode("response did not contain a token"))?;

        let user = UserProfile {
            user_id: self.user_id,
            username: self.username,
            email: self.email,
            phone: self.phone.filter(|p| !p.is_empty()),
            ..UserProfile::default()
        };

        Ok((token, user))
    }
}

/// User record shown in the header and on the profile page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: String,
    pub username: String,
    pub email: String,
    #[serde(default, alias = "memberSince", alias = "created_at")]
    pub member_since: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

impl UserProfile {
    /// "Month YYYY" when the server timestamp parses, the raw value otherwise.
    pub fn member_since_display(&self) -> String {
        let Some(raw) = self.member_since.as_deref().filter(|s| !s.is_empty()) else {
            return "Unknown".to_string();
        };

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.format("%B %Y").to_string();
        }
        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
                return parsed.format("%B %Y").to_string();
            }
        }
        raw.to_string()
    }
}

/// Body of `PUT /api/auth/profile`. The backend only accepts these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.profile_picture.is_none()
    }

    /// Copy the submitted fields onto a cached profile after a successful update.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(phone) = &self.phone {
            profile.phone = Some(phone.clone());
        }
        if let Some(dob) = &self.date_of_birth {
            profile.date_of_birth = Some(dob.clone());
        }
        if let Some(gender) = &self.gender {
            profile.gender = Some(gender.clone());
        }
        if let Some(picture) = &self.profile_picture {
            profile.profile_picture = Some(picture.clone());
        }
    }
}
