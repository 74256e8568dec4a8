// Household models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{Validate, ValidationError, require, require_if_set};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub time_zone: String,
    #[serde(default)]
    pub belongs_to_user: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdCreationRequestInput {
    pub name: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub time_zone: String,
}

impl Validate for HouseholdCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

impl From<&Household> for HouseholdCreationRequestInput {
    fn from(h: &Household) -> Self {
        Self {
            name: h.name.clone(),
            contact_phone: h.contact_phone.clone(),
            address_line1: h.address_line1.clone(),
            address_line2: h.address_line2.clone(),
            city: h.city.clone(),
            state: h.state.clone(),
            zip_code: h.zip_code.clone(),
            country: h.country.clone(),
            time_zone: h.time_zone.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl Validate for HouseholdUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("name", self.name.as_deref())
    }
}

/// Body of `POST /api/v1/users/household/select`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeActiveHouseholdInput {
    #[serde(rename = "householdID")]
    pub household_id: String,
}

impl Validate for ChangeActiveHouseholdInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("householdID", &self.household_id)
    }
}
