// Meal plan, grocery list and task models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::validate::{Validate, ValidationError, require, require_if_set};

// ── Meal plans ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub voting_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub belongs_to_household: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanCreationRequestInput {
    pub notes: String,
    pub voting_deadline: DateTime<Utc>,
}

impl Validate for MealPlanCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.voting_deadline.timestamp() <= 0 {
            return Err(ValidationError::required("votingDeadline"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<DateTime<Utc>>,
}

impl Validate for MealPlanUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

// ── Grocery list items ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GroceryListItemStatus {
    #[default]
    Unknown,
    AlreadyOwned,
    NeedsToBeBought,
    Unavailable,
    Acquired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItem {
    pub id: String,
    #[serde(default)]
    pub belongs_to_meal_plan: String,
    #[serde(default, rename = "validIngredientID")]
    pub valid_ingredient_id: String,
    #[serde(default, rename = "validMeasurementUnitID")]
    pub valid_measurement_unit_id: String,
    #[serde(default)]
    pub minimum_quantity_needed: f32,
    #[serde(default)]
    pub maximum_quantity_needed: Option<f32>,
    #[serde(default)]
    pub status: GroceryListItemStatus,
    #[serde(default)]
    pub status_explanation: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItemCreationRequestInput {
    pub belongs_to_meal_plan: String,
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
    #[serde(rename = "validMeasurementUnitID")]
    pub valid_measurement_unit_id: String,
    pub minimum_quantity_needed: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_quantity_needed: Option<f32>,
    pub status: GroceryListItemStatus,
    pub status_explanation: String,
}

impl Validate for MealPlanGroceryListItemCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("validIngredientID", &self.valid_ingredient_id)?;
        require("validMeasurementUnitID", &self.valid_measurement_unit_id)?;
        if self.minimum_quantity_needed <= 0.0 {
            return Err(ValidationError::new("minimumQuantityNeeded", "must be positive"));
        }
        Ok(())
    }
}

impl From<&MealPlanGroceryListItem> for MealPlanGroceryListItemCreationRequestInput {
    fn from(item: &MealPlanGroceryListItem) -> Self {
        Self {
            belongs_to_meal_plan: item.belongs_to_meal_plan.clone(),
            valid_ingredient_id: item.valid_ingredient_id.clone(),
            valid_measurement_unit_id: item.valid_measurement_unit_id.clone(),
            minimum_quantity_needed: item.minimum_quantity_needed,
            maximum_quantity_needed: item.maximum_quantity_needed,
            status: item.status,
            status_explanation: item.status_explanation.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanGroceryListItemUpdateRequestInput {
    #[serde(rename = "validMeasurementUnitID", skip_serializing_if = "Option::is_none")]
    pub valid_measurement_unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_quantity_needed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GroceryListItemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_explanation: Option<String>,
}

impl Validate for MealPlanGroceryListItemUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("validMeasurementUnitID", self.valid_measurement_unit_id.as_deref())
    }
}

// ── Tasks ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MealPlanTaskStatus {
    #[default]
    Unfinished,
    Postponed,
    Ignored,
    Canceled,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanTask {
    pub id: String,
    #[serde(default)]
    pub status: MealPlanTaskStatus,
    #[serde(default)]
    pub status_explanation: String,
    #[serde(default)]
    pub creation_explanation: String,
    #[serde(default)]
    pub assigned_to_user: Option<String>,
    #[serde(default, rename = "mealPlanOptionID")]
    pub meal_plan_option_id: String,
    #[serde(default, rename = "recipePrepTaskID")]
    pub recipe_prep_task_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanTaskCreationRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_user: Option<String>,
    pub status: MealPlanTaskStatus,
    pub creation_explanation: String,
    pub status_explanation: String,
    #[serde(rename = "mealPlanOptionID")]
    pub meal_plan_option_id: String,
    #[serde(rename = "recipePrepTaskID")]
    pub recipe_prep_task_id: String,
}

impl Validate for MealPlanTaskCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("mealPlanOptionID", &self.meal_plan_option_id)?;
        require("recipePrepTaskID", &self.recipe_prep_task_id)
    }
}

impl From<&MealPlanTask> for MealPlanTaskCreationRequestInput {
    fn from(task: &MealPlanTask) -> Self {
        Self {
            assigned_to_user: task.assigned_to_user.clone(),
            status: task.status,
            creation_explanation: task.creation_explanation.clone(),
            status_explanation: task.status_explanation.clone(),
            meal_plan_option_id: task.meal_plan_option_id.clone(),
            recipe_prep_task_id: task.recipe_prep_task_id.clone(),
        }
    }
}

/// Body of the task status change (`PATCH`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanTaskStatusChangeRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MealPlanTaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_user: Option<String>,
}

impl Validate for MealPlanTaskStatusChangeRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.status.is_none() && self.assigned_to_user.is_none() {
            return Err(ValidationError::new(
                "status",
                "either a status or an assignee is required",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn statuses_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(GroceryListItemStatus::NeedsToBeBought).unwrap(),
            json!("needs_to_be_bought")
        );
        assert_eq!(
            "canceled".parse::<MealPlanTaskStatus>().unwrap(),
            MealPlanTaskStatus::Canceled
        );
    }

    #[test]
    fn status_change_needs_something_to_change() {
        assert!(MealPlanTaskStatusChangeRequestInput::default().validate().is_err());
        let input = MealPlanTaskStatusChangeRequestInput {
            status: Some(MealPlanTaskStatus::Finished),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn grocery_item_requires_ingredient_and_unit() {
        let input = MealPlanGroceryListItemCreationRequestInput {
            valid_ingredient_id: "ing".into(),
            minimum_quantity_needed: 1.0,
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().field, "validMeasurementUnitID");
    }
}
