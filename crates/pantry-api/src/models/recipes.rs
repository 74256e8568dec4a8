// Recipe models
//
// Steps, ingredients and media are carried opaquely in `extra`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{Validate, ValidationError, require, require_if_set};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "inspiredByRecipeID")]
    pub inspired_by_recipe_id: Option<String>,
    #[serde(default)]
    pub min_estimated_portions: f32,
    #[serde(default)]
    pub max_estimated_portions: Option<f32>,
    #[serde(default)]
    pub portion_name: String,
    #[serde(default)]
    pub plural_portion_name: String,
    #[serde(default)]
    pub seal_of_approval: bool,
    #[serde(default)]
    pub eligible_for_meals: bool,
    #[serde(default)]
    pub created_by_user: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreationRequestInput {
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID", skip_serializing_if = "Option::is_none")]
    pub inspired_by_recipe_id: Option<String>,
    pub min_estimated_portions: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_estimated_portions: Option<f32>,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub seal_of_approval: bool,
    pub eligible_for_meals: bool,
}

impl Validate for RecipeCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        if self.min_estimated_portions <= 0.0 {
            return Err(ValidationError::new("minEstimatedPortions", "must be positive"));
        }
        match self.max_estimated_portions {
            Some(max) if max < self.min_estimated_portions => Err(ValidationError::new(
                "maxEstimatedPortions",
                "must not be below the minimum",
            )),
            _ => Ok(()),
        }
    }
}

impl From<&Recipe> for RecipeCreationRequestInput {
    fn from(r: &Recipe) -> Self {
        Self {
            name: r.name.clone(),
            slug: r.slug.clone(),
            source: r.source.clone(),
            description: r.description.clone(),
            inspired_by_recipe_id: r.inspired_by_recipe_id.clone(),
            min_estimated_portions: r.min_estimated_portions,
            max_estimated_portions: r.max_estimated_portions,
            portion_name: r.portion_name.clone(),
            plural_portion_name: r.plural_portion_name.clone(),
            seal_of_approval: r.seal_of_approval,
            eligible_for_meals: r.eligible_for_meals,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_estimated_portions: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_for_meals: Option<bool>,
}

impl Validate for RecipeUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("name", self.name.as_deref())?;
        match self.min_estimated_portions {
            Some(min) if min <= 0.0 => {
                Err(ValidationError::new("minEstimatedPortions", "must be positive"))
            }
            _ => Ok(()),
        }
    }
}
