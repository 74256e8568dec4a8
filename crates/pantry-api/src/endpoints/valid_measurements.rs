// Valid measurement unit and conversion endpoints
//
// Conversions have no plain listing; they are listed per unit instead.

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{
    ValidMeasurementConversion, ValidMeasurementConversionCreationRequestInput,
    ValidMeasurementConversionUpdateRequestInput, ValidMeasurementUnit,
    ValidMeasurementUnitCreationRequestInput, ValidMeasurementUnitUpdateRequestInput,
};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::Method;
use crate::resource::{Extra, Ops, Resource};

// ── Descriptors ──────────────────────────────────────────────────────

const VALID_MEASUREMENT_UNITS_BY_INGREDIENT: Extra = Extra {
    operation: "GetValidMeasurementUnitsByIngredient",
    method: Method::Get,
    path: "/api/v1/valid_measurement_units/by_ingredient/%s",
    params: &["validIngredientID"],
};

pub const VALID_MEASUREMENT_UNITS: Resource = Resource {
    name: "ValidMeasurementUnit",
    plural: "ValidMeasurementUnits",
    path: "/api/v1/valid_measurement_units/%s",
    list_path: "/api/v1/valid_measurement_units",
    search_path: Some("/api/v1/valid_measurement_units/search"),
    id_params: &["validMeasurementUnitID"],
    ops: Ops::crud(Method::Put),
    extras: &[VALID_MEASUREMENT_UNITS_BY_INGREDIENT],
};

const VALID_MEASUREMENT_CONVERSIONS_FROM_UNIT: Extra = Extra {
    operation: "GetValidMeasurementConversionsFromUnit",
    method: Method::Get,
    path: "/api/v1/valid_measurement_conversions/from_unit/%s",
    params: &["validMeasurementUnitID"],
};

const VALID_MEASUREMENT_CONVERSIONS_TO_UNIT: Extra = Extra {
    operation: "GetValidMeasurementConversionsToUnit",
    method: Method::Get,
    path: "/api/v1/valid_measurement_conversions/to_unit/%s",
    params: &["validMeasurementUnitID"],
};

pub const VALID_MEASUREMENT_CONVERSIONS: Resource = Resource {
    name: "ValidMeasurementConversion",
    plural: "ValidMeasurementConversions",
    path: "/api/v1/valid_measurement_conversions/%s",
    list_path: "/api/v1/valid_measurement_conversions",
    search_path: None,
    id_params: &["validMeasurementConversionID"],
    ops: Ops {
        list: false,
        ..Ops::crud(Method::Put)
    },
    extras: &[
        VALID_MEASUREMENT_CONVERSIONS_FROM_UNIT,
        VALID_MEASUREMENT_CONVERSIONS_TO_UNIT,
    ],
};

// ── Units ────────────────────────────────────────────────────────────

impl Client {
    pub async fn get_valid_measurement_unit(
        &self,
        cx: &Context,
        valid_measurement_unit_id: &str,
    ) -> Result<ValidMeasurementUnit, Error> {
        VALID_MEASUREMENT_UNITS
            .fetch(self, cx, &[valid_measurement_unit_id])
            .await
    }

    pub async fn get_valid_measurement_units(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidMeasurementUnit>, Error> {
        VALID_MEASUREMENT_UNITS.list(self, cx, &[], filter).await
    }

    pub async fn search_valid_measurement_units(
        &self,
        cx: &Context,
        query: &str,
        limit: u16,
    ) -> Result<Vec<ValidMeasurementUnit>, Error> {
        VALID_MEASUREMENT_UNITS.search(self, cx, &[], query, limit).await
    }

    /// Units that make sense for one ingredient.
    ///
    /// `GET /api/v1/valid_measurement_units/by_ingredient/{validIngredientID}`
    pub async fn get_valid_measurement_units_by_ingredient(
        &self,
        cx: &Context,
        valid_ingredient_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidMeasurementUnit>, Error> {
        VALID_MEASUREMENT_UNITS_BY_INGREDIENT
            .list(self, cx, &[valid_ingredient_id], filter)
            .await
    }

    pub async fn create_valid_measurement_unit(
        &self,
        cx: &Context,
        input: &ValidMeasurementUnitCreationRequestInput,
    ) -> Result<ValidMeasurementUnit, Error> {
        VALID_MEASUREMENT_UNITS.create(self, cx, &[], Some(input)).await
    }

    pub async fn update_valid_measurement_unit(
        &self,
        cx: &Context,
        valid_measurement_unit_id: &str,
        input: &ValidMeasurementUnitUpdateRequestInput,
    ) -> Result<ValidMeasurementUnit, Error> {
        VALID_MEASUREMENT_UNITS
            .update(self, cx, &[valid_measurement_unit_id], Some(input))
            .await
    }

    pub async fn archive_valid_measurement_unit(
        &self,
        cx: &Context,
        valid_measurement_unit_id: &str,
    ) -> Result<(), Error> {
        VALID_MEASUREMENT_UNITS
            .archive(self, cx, &[valid_measurement_unit_id])
            .await
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl Client {
    /// `GET /api/v1/valid_measurement_conversions/{validMeasurementConversionID}`
    pub async fn get_valid_measurement_conversion(
        &self,
        cx: &Context,
        valid_measurement_conversion_id: &str,
    ) -> Result<ValidMeasurementConversion, Error> {
        VALID_MEASUREMENT_CONVERSIONS
            .fetch(self, cx, &[valid_measurement_conversion_id])
            .await
    }

    /// Conversions whose source is the given unit.
    ///
    /// `GET /api/v1/valid_measurement_conversions/from_unit/{validMeasurementUnitID}`
    pub async fn get_valid_measurement_conversions_from_unit(
        &self,
        cx: &Context,
        valid_measurement_unit_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidMeasurementConversion>, Error> {
        VALID_MEASUREMENT_CONVERSIONS_FROM_UNIT
            .list(self, cx, &[valid_measurement_unit_id], filter)
            .await
    }

    /// Conversions whose target is the given unit.
    ///
    /// `GET /api/v1/valid_measurement_conversions/to_unit/{validMeasurementUnitID}`
    pub async fn get_valid_measurement_conversions_to_unit(
        &self,
        cx: &Context,
        valid_measurement_unit_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidMeasurementConversion>, Error> {
        VALID_MEASUREMENT_CONVERSIONS_TO_UNIT
            .list(self, cx, &[valid_measurement_unit_id], filter)
            .await
    }

    pub async fn create_valid_measurement_conversion(
        &self,
        cx: &Context,
        input: &ValidMeasurementConversionCreationRequestInput,
    ) -> Result<ValidMeasurementConversion, Error> {
        VALID_MEASUREMENT_CONVERSIONS
            .create(self, cx, &[], Some(input))
            .await
    }

    pub async fn update_valid_measurement_conversion(
        &self,
        cx: &Context,
        valid_measurement_conversion_id: &str,
        input: &ValidMeasurementConversionUpdateRequestInput,
    ) -> Result<ValidMeasurementConversion, Error> {
        VALID_MEASUREMENT_CONVERSIONS
            .update(self, cx, &[valid_measurement_conversion_id], Some(input))
            .await
    }

    pub async fn archive_valid_measurement_conversion(
        &self,
        cx: &Context,
        valid_measurement_conversion_id: &str,
    ) -> Result<(), Error> {
        VALID_MEASUREMENT_CONVERSIONS
            .archive(self, cx, &[valid_measurement_conversion_id])
            .await
    }
}
