// Reference-data ("valid_*") models
//
// Instruments, ingredients, preparations, units and the links between
// them. These are curated by administrators and shared by every household.
// Only the commonly used fields are modelled; the rest land in `extra`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{Validate, ValidationError, require, require_if_set};

// ── Instruments ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstrument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plural_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub display_in_summary_lists: bool,
    #[serde(default)]
    pub include_in_generated_instructions: bool,
    #[serde(default)]
    pub usable_for_storage: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    /// Catch-all for fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstrumentCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub display_in_summary_lists: bool,
    pub include_in_generated_instructions: bool,
    pub usable_for_storage: bool,
}

impl Validate for ValidInstrumentCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

impl From<&ValidInstrument> for ValidInstrumentCreationRequestInput {
    fn from(v: &ValidInstrument) -> Self {
        Self {
            name: v.name.clone(),
            plural_name: v.plural_name.clone(),
            description: v.description.clone(),
            icon_path: v.icon_path.clone(),
            slug: v.slug.clone(),
            display_in_summary_lists: v.display_in_summary_lists,
            include_in_generated_instructions: v.include_in_generated_instructions,
            usable_for_storage: v.usable_for_storage,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidInstrumentUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usable_for_storage: Option<bool>,
}

impl Validate for ValidInstrumentUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("name", self.name.as_deref())
    }
}

// ── Ingredients ──────────────────────────────────────────────────────

/// An ingredient. Allergen flags default to `false` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plural_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub warning: String,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub shopping_suggestions: String,
    #[serde(default)]
    pub storage_instructions: String,
    #[serde(default)]
    pub minimum_ideal_storage_temperature_in_celsius: Option<f32>,
    #[serde(default)]
    pub maximum_ideal_storage_temperature_in_celsius: Option<f32>,
    #[serde(default)]
    pub is_liquid: bool,
    #[serde(default)]
    pub is_measured_volumetrically: bool,
    #[serde(default)]
    pub animal_derived: bool,
    #[serde(default)]
    pub animal_flesh: bool,
    #[serde(default)]
    pub contains_dairy: bool,
    #[serde(default)]
    pub contains_egg: bool,
    #[serde(default)]
    pub contains_gluten: bool,
    #[serde(default)]
    pub contains_peanut: bool,
    #[serde(default)]
    pub contains_tree_nut: bool,
    #[serde(default)]
    pub contains_shellfish: bool,
    #[serde(default)]
    pub restrict_to_preparations: bool,
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
pub struct ValidIngredientCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub slug: String,
    pub shopping_suggestions: String,
    pub storage_instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_ideal_storage_temperature_in_celsius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_ideal_storage_temperature_in_celsius: Option<f32>,
    pub is_liquid: bool,
    pub is_measured_volumetrically: bool,
    pub animal_derived: bool,
    pub animal_flesh: bool,
    pub contains_dairy: bool,
    pub contains_egg: bool,
    pub contains_gluten: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_shellfish: bool,
    pub restrict_to_preparations: bool,
}

impl Validate for ValidIngredientCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        if let (Some(min), Some(max)) = (
            self.minimum_ideal_storage_temperature_in_celsius,
            self.maximum_ideal_storage_temperature_in_celsius,
        ) {
            if min > max {
                return Err(ValidationError::new(
                    "minimumIdealStorageTemperatureInCelsius",
                    "must not exceed the maximum",
                ));
            }
        }
        Ok(())
    }
}

impl From<&ValidIngredient> for ValidIngredientCreationRequestInput {
    fn from(v: &ValidIngredient) -> Self {
        Self {
            name: v.name.clone(),
            plural_name: v.plural_name.clone(),
            description: v.description.clone(),
            warning: v.warning.clone(),
            icon_path: v.icon_path.clone(),
            slug: v.slug.clone(),
            shopping_suggestions: v.shopping_suggestions.clone(),
            storage_instructions: v.storage_instructions.clone(),
            minimum_ideal_storage_temperature_in_celsius: v
                .minimum_ideal_storage_temperature_in_celsius,
            maximum_ideal_storage_temperature_in_celsius: v
                .maximum_ideal_storage_temperature_in_celsius,
            is_liquid: v.is_liquid,
            is_measured_volumetrically: v.is_measured_volumetrically,
            animal_derived: v.animal_derived,
            animal_flesh: v.animal_flesh,
            contains_dairy: v.contains_dairy,
            contains_egg: v.contains_egg,
            contains_gluten: v.contains_gluten,
            contains_peanut: v.contains_peanut,
            contains_tree_nut: v.contains_tree_nut,
            contains_shellfish: v.contains_shellfish,
            restrict_to_preparations: v.restrict_to_preparations,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
}

impl Validate for ValidIngredientUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("name", self.name.as_deref())
    }
}

// ── Ingredient groups ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub members: Vec<ValidIngredientGroupMember>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientGroupMember {
    pub id: String,
    #[serde(rename = "belongsToGroup", default)]
    pub belongs_to_group: String,
    pub valid_ingredient: ValidIngredient,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientGroupCreationRequestInput {
    pub name: String,
    pub description: String,
    pub slug: String,
    pub members: Vec<ValidIngredientGroupMemberCreationRequestInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientGroupMemberCreationRequestInput {
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
}

impl Validate for ValidIngredientGroupCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        for member in &self.members {
            require("validIngredientID", &member.valid_ingredient_id)?;
        }
        Ok(())
    }
}

impl From<&ValidIngredientGroup> for ValidIngredientGroupCreationRequestInput {
    fn from(v: &ValidIngredientGroup) -> Self {
        Self {
            name: v.name.clone(),
            description: v.description.clone(),
            slug: v.slug.clone(),
            members: v
                .members
                .iter()
                .map(|m| ValidIngredientGroupMemberCreationRequestInput {
                    valid_ingredient_id: m.valid_ingredient.id.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientGroupUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Validate for ValidIngredientGroupUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("name", self.name.as_deref())
    }
}

// ── Preparations ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub past_tense: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub yields_nothing: bool,
    #[serde(default)]
    pub restrict_to_ingredients: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparationCreationRequestInput {
    pub name: String,
    pub past_tense: String,
    pub description: String,
    pub icon_path: String,
    pub slug: String,
    pub yields_nothing: bool,
    pub restrict_to_ingredients: bool,
}

impl Validate for ValidPreparationCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

impl From<&ValidPreparation> for ValidPreparationCreationRequestInput {
    fn from(v: &ValidPreparation) -> Self {
        Self {
            name: v.name.clone(),
            past_tense: v.past_tense.clone(),
            description: v.description.clone(),
            icon_path: v.icon_path.clone(),
            slug: v.slug.clone(),
            yields_nothing: v.yields_nothing,
            restrict_to_ingredients: v.restrict_to_ingredients,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPreparationUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Validate for ValidPreparationUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("name", self.name.as_deref())
    }
}

// ── Measurement units ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementUnit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plural_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub volumetric: bool,
    #[serde(default)]
    pub universal: bool,
    #[serde(default)]
    pub metric: bool,
    #[serde(default)]
    pub imperial: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementUnitCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub slug: String,
    pub volumetric: bool,
    pub universal: bool,
    pub metric: bool,
    pub imperial: bool,
}

impl Validate for ValidMeasurementUnitCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        if self.metric && self.imperial {
            return Err(ValidationError::new("metric", "a unit cannot be both metric and imperial"));
        }
        Ok(())
    }
}

impl From<&ValidMeasurementUnit> for ValidMeasurementUnitCreationRequestInput {
    fn from(v: &ValidMeasurementUnit) -> Self {
        Self {
            name: v.name.clone(),
            plural_name: v.plural_name.clone(),
            description: v.description.clone(),
            slug: v.slug.clone(),
            volumetric: v.volumetric,
            universal: v.universal,
            metric: v.metric,
            imperial: v.imperial,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementUnitUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Validate for ValidMeasurementUnitUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("name", self.name.as_deref())
    }
}

// ── Measurement conversions ──────────────────────────────────────────

/// `value_in_to = value_in_from * modifier`, optionally only for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementConversion {
    pub id: String,
    pub from: ValidMeasurementUnit,
    pub to: ValidMeasurementUnit,
    #[serde(default)]
    pub only_for_ingredient: Option<ValidIngredient>,
    pub modifier: f32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementConversionCreationRequestInput {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_for_ingredient: Option<String>,
    pub modifier: f32,
    pub notes: String,
}

impl Validate for ValidMeasurementConversionCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("from", &self.from)?;
        require("to", &self.to)?;
        if self.from == self.to {
            return Err(ValidationError::new("to", "must differ from `from`"));
        }
        if !self.modifier.is_normal() {
            return Err(ValidationError::new("modifier", "must be a non-zero number"));
        }
        Ok(())
    }
}

impl From<&ValidMeasurementConversion> for ValidMeasurementConversionCreationRequestInput {
    fn from(v: &ValidMeasurementConversion) -> Self {
        Self {
            from: v.from.id.clone(),
            to: v.to.id.clone(),
            only_for_ingredient: v.only_for_ingredient.as_ref().map(|i| i.id.clone()),
            modifier: v.modifier,
            notes: v.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidMeasurementConversionUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Validate for ValidMeasurementConversionUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("from", self.from.as_deref())?;
        require_if_set("to", self.to.as_deref())?;
        match self.modifier {
            Some(m) if !m.is_normal() => {
                Err(ValidationError::new("modifier", "must be a non-zero number"))
            }
            _ => Ok(()),
        }
    }
}

// ── Ingredient preparations ──────────────────────────────────────────

/// Links an ingredient to a preparation that can be applied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientPreparation {
    pub id: String,
    #[serde(default)]
    pub notes: String,
    pub ingredient: ValidIngredient,
    pub preparation: ValidPreparation,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientPreparationCreationRequestInput {
    pub notes: String,
    #[serde(rename = "validIngredientID")]
    pub valid_ingredient_id: String,
    #[serde(rename = "validPreparationID")]
    pub valid_preparation_id: String,
}

impl Validate for ValidIngredientPreparationCreationRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("validIngredientID", &self.valid_ingredient_id)?;
        require("validPreparationID", &self.valid_preparation_id)
    }
}

impl From<&ValidIngredientPreparation> for ValidIngredientPreparationCreationRequestInput {
    fn from(v: &ValidIngredientPreparation) -> Self {
        Self {
            notes: v.notes.clone(),
            valid_ingredient_id: v.ingredient.id.clone(),
            valid_preparation_id: v.preparation.id.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidIngredientPreparationUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "validIngredientID", skip_serializing_if = "Option::is_none")]
    pub valid_ingredient_id: Option<String>,
    #[serde(rename = "validPreparationID", skip_serializing_if = "Option::is_none")]
    pub valid_preparation_id: Option<String>,
}

impl Validate for ValidIngredientPreparationUpdateRequestInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set("validIngredientID", self.valid_ingredient_id.as_deref())?;
        require_if_set("validPreparationID", self.valid_preparation_id.as_deref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn instrument_keeps_unknown_fields() {
        let instrument: ValidInstrument = serde_json::from_value(json!({
            "id": "inst_1",
            "name": "whisk",
            "usableForStorage": false,
            "createdAt": "2024-01-02T03:04:05Z",
            "newServerField": 7
        }))
        .unwrap();
        assert_eq!(instrument.name, "whisk");
        assert_eq!(instrument.extra.get("newServerField"), Some(&json!(7)));
        assert!(instrument.created_at.is_some());
    }

    #[test]
    fn conversion_input_rejects_identity_and_zero_modifier() {
        let input = ValidMeasurementConversionCreationRequestInput {
            from: "cup".into(),
            to: "cup".into(),
            modifier: 1.0,
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().field, "to");

        let input = ValidMeasurementConversionCreationRequestInput {
            from: "cup".into(),
            to: "ml".into(),
            modifier: 0.0,
            ..Default::default()
        };
        assert_eq!(input.validate().unwrap_err().field, "modifier");
    }

    #[test]
    fn ingredient_temperatures_must_be_ordered() {
        let input = ValidIngredientCreationRequestInput {
            name: "milk".into(),
            minimum_ideal_storage_temperature_in_celsius: Some(8.0),
            maximum_ideal_storage_temperature_in_celsius: Some(2.0),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_inputs_omit_unset_fields() {
        let input = ValidPreparationUpdateRequestInput {
            name: Some("dice".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({"name": "dice"}));
    }

    #[test]
    fn ingredient_preparation_ids_use_upper_case_suffix() {
        let input = ValidIngredientPreparationCreationRequestInput {
            notes: String::new(),
            valid_ingredient_id: "ing".into(),
            valid_preparation_id: "prep".into(),
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"notes": "", "validIngredientID": "ing", "validPreparationID": "prep"})
        );
    }
}
