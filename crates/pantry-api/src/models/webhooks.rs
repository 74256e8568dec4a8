// Webhook models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::validate::{Validate, ValidationError, require};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub events: Vec<WebhookTriggerEvent>,
    #[serde(default)]
    pub belongs_to_household: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTriggerEvent {
    pub id: String,
    pub trigger_event: String,
    #[serde(default)]
    pub belongs_to_webhook: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreationRequestInput {
    pub name: String,
    pub content_type: String,
    pub url: String,
    pub method: String,
    pub events: Vec<String>,
}

const WEBHOOK_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

impl Validate for WebhookCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("contentType", &self.content_type)?;
        let url = Url::parse(&self.url).map_err(|e| ValidationError::new("url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::new("url", "must be an http(s) URL"));
        }
        if !WEBHOOK_METHODS.contains(&self.method.as_str()) {
            return Err(ValidationError::new("method", "must be POST, PUT, PATCH or DELETE"));
        }
        if self.events.is_empty() {
            return Err(ValidationError::new("events", "at least one event is required"));
        }
        Ok(())
    }
}

impl From<&Webhook> for WebhookCreationRequestInput {
    fn from(w: &Webhook) -> Self {
        Self {
            name: w.name.clone(),
            content_type: w.content_type.clone(),
            url: w.url.clone(),
            method: w.method.clone(),
            events: w.events.iter().map(|e| e.trigger_event.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> WebhookCreationRequestInput {
        WebhookCreationRequestInput {
            name: "notify".into(),
            content_type: "application/json".into(),
            url: "https://hooks.example.com/pantry".into(),
            method: "POST".into(),
            events: vec!["webhook_created".into()],
        }
    }

    #[test]
    fn accepts_a_complete_webhook() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_relative_urls_and_get() {
        let mut input = valid();
        input.url = "/relative".into();
        assert_eq!(input.validate().map_err(|e| e.field), Err("url"));

        let mut input = valid();
        input.method = "GET".into();
        assert_eq!(input.validate().map_err(|e| e.field), Err("method"));

        let mut input = valid();
        input.events.clear();
        assert_eq!(input.validate().map_err(|e| e.field), Err("events"));
    }
}
