// User, registration and login models
//
// Passwords and tokens are `SecretString`s; they are exposed only while
// serializing a request body or read once from a login response.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validate::{Validate, ValidationError, require};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, rename = "avatar")]
    pub avatar_src: Option<String>,
    #[serde(default)]
    pub account_status: String,
    #[serde(default, rename = "serviceRoles")]
    pub service_role: String,
    #[serde(default)]
    pub requires_password_change: bool,
    #[serde(default)]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of the unauthenticated `POST /users` registration route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistrationInput {
    pub username: String,
    #[serde(serialize_with = "expose", deserialize_with = "conceal")]
    pub password: SecretString,
    pub email_address: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub household_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub invitation_token: String,
    #[serde(default, rename = "invitationID", skip_serializing_if = "String::is_empty")]
    pub invitation_id: String,
    #[serde(default, rename = "acceptedTOS")]
    pub accepted_tos: bool,
    #[serde(default)]
    pub accepted_privacy_policy: bool,
}

impl Validate for UserRegistrationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("emailAddress", &self.email_address)?;
        if !self.email_address.contains('@') {
            return Err(ValidationError::new("emailAddress", "must be an email address"));
        }
        if self.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        Ok(())
    }
}

/// Registration result. Carries the two-factor secret exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreationResponse {
    #[serde(rename = "createdUserID")]
    pub created_user_id: String,
    pub username: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub account_status: String,
    #[serde(serialize_with = "expose", deserialize_with = "conceal")]
    pub two_factor_secret: SecretString,
    #[serde(default, rename = "twoFactorQRCode")]
    pub two_factor_qr_code: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /users/login/jwt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginInput {
    pub username: String,
    #[serde(serialize_with = "expose", deserialize_with = "conceal")]
    pub password: SecretString,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub totp_token: String,
}

impl UserLoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            totp_token: String::new(),
        }
    }

    pub fn with_totp(mut self, token: impl Into<String>) -> Self {
        self.totp_token = token.into();
        self
    }
}

impl Validate for UserLoginInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("password", self.password.expose_secret())?;
        if !self.totp_token.is_empty()
            && (self.totp_token.len() != 6 || !self.totp_token.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(ValidationError::new("totpToken", "must be six digits"));
        }
        Ok(())
    }
}

/// JWT issued by the login route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(default, rename = "householdID")]
    pub household_id: String,
    #[serde(serialize_with = "expose", deserialize_with = "conceal")]
    pub token: SecretString,
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn conceal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}
