// Valid preparation and ingredient-preparation endpoints

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{
    ValidIngredientPreparation, ValidIngredientPreparationCreationRequestInput,
    ValidIngredientPreparationUpdateRequestInput, ValidPreparation,
    ValidPreparationCreationRequestInput, ValidPreparationUpdateRequestInput,
};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::Method;
use crate::resource::{Extra, Ops, Resource};

// ── Descriptors ──────────────────────────────────────────────────────

const RANDOM_VALID_PREPARATION: Extra = Extra {
    operation: "GetRandomValidPreparation",
    method: Method::Get,
    path: "/api/v1/valid_preparations/random",
    params: &[],
};

pub const VALID_PREPARATIONS: Resource = Resource {
    name: "ValidPreparation",
    plural: "ValidPreparations",
    path: "/api/v1/valid_preparations/%s",
    list_path: "/api/v1/valid_preparations",
    search_path: Some("/api/v1/valid_preparations/search"),
    id_params: &["validPreparationID"],
    ops: Ops::crud(Method::Put),
    extras: &[RANDOM_VALID_PREPARATION],
};

const VALID_INGREDIENT_PREPARATIONS_BY_INGREDIENT: Extra = Extra {
    operation: "GetValidIngredientPreparationsForIngredient",
    method: Method::Get,
    path: "/api/v1/valid_ingredient_preparations/by_ingredient/%s",
    params: &["validIngredientID"],
};

const VALID_INGREDIENT_PREPARATIONS_BY_PREPARATION: Extra = Extra {
    operation: "GetValidIngredientPreparationsForPreparation",
    method: Method::Get,
    path: "/api/v1/valid_ingredient_preparations/by_preparation/%s",
    params: &["validPreparationID"],
};

pub const VALID_INGREDIENT_PREPARATIONS: Resource = Resource {
    name: "ValidIngredientPreparation",
    plural: "ValidIngredientPreparations",
    path: "/api/v1/valid_ingredient_preparations/%s",
    list_path: "/api/v1/valid_ingredient_preparations",
    search_path: None,
    id_params: &["validIngredientPreparationID"],
    ops: Ops::crud(Method::Put),
    extras: &[
        VALID_INGREDIENT_PREPARATIONS_BY_INGREDIENT,
        VALID_INGREDIENT_PREPARATIONS_BY_PREPARATION,
    ],
};

// ── Preparations ─────────────────────────────────────────────────────

impl Client {
    pub async fn get_valid_preparation(
        &self,
        cx: &Context,
        valid_preparation_id: &str,
    ) -> Result<ValidPreparation, Error> {
        VALID_PREPARATIONS.fetch(self, cx, &[valid_preparation_id]).await
    }

    pub async fn get_random_valid_preparation(&self, cx: &Context) -> Result<ValidPreparation, Error> {
        RANDOM_VALID_PREPARATION.fetch(self, cx, &[]).await
    }

    pub async fn get_valid_preparations(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidPreparation>, Error> {
        VALID_PREPARATIONS.list(self, cx, &[], filter).await
    }

    pub async fn search_valid_preparations(
        &self,
        cx: &Context,
        query: &str,
        limit: u16,
    ) -> Result<Vec<ValidPreparation>, Error> {
        VALID_PREPARATIONS.search(self, cx, &[], query, limit).await
    }

    pub async fn create_valid_preparation(
        &self,
        cx: &Context,
        input: &ValidPreparationCreationRequestInput,
    ) -> Result<ValidPreparation, Error> {
        VALID_PREPARATIONS.create(self, cx, &[], Some(input)).await
    }

    pub async fn update_valid_preparation(
        &self,
        cx: &Context,
        valid_preparation_id: &str,
        input: &ValidPreparationUpdateRequestInput,
    ) -> Result<ValidPreparation, Error> {
        VALID_PREPARATIONS
            .update(self, cx, &[valid_preparation_id], Some(input))
            .await
    }

    pub async fn archive_valid_preparation(
        &self,
        cx: &Context,
        valid_preparation_id: &str,
    ) -> Result<(), Error> {
        VALID_PREPARATIONS.archive(self, cx, &[valid_preparation_id]).await
    }
}

// ── Ingredient preparations ──────────────────────────────────────────

impl Client {
    /// `GET /api/v1/valid_ingredient_preparations/{validIngredientPreparationID}`
    pub async fn get_valid_ingredient_preparation(
        &self,
        cx: &Context,
        valid_ingredient_preparation_id: &str,
    ) -> Result<ValidIngredientPreparation, Error> {
        VALID_INGREDIENT_PREPARATIONS
            .fetch(self, cx, &[valid_ingredient_preparation_id])
            .await
    }

    pub async fn get_valid_ingredient_preparations(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidIngredientPreparation>, Error> {
        VALID_INGREDIENT_PREPARATIONS.list(self, cx, &[], filter).await
    }

    /// Pairings for one ingredient.
    ///
    /// `GET /api/v1/valid_ingredient_preparations/by_ingredient/{validIngredientID}`
    pub async fn get_valid_ingredient_preparations_for_ingredient(
        &self,
        cx: &Context,
        valid_ingredient_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidIngredientPreparation>, Error> {
        VALID_INGREDIENT_PREPARATIONS_BY_INGREDIENT
            .list(self, cx, &[valid_ingredient_id], filter)
            .await
    }

    /// Pairings for one preparation.
    ///
    /// `GET /api/v1/valid_ingredient_preparations/by_preparation/{validPreparationID}`
    pub async fn get_valid_ingredient_preparations_for_preparation(
        &self,
        cx: &Context,
        valid_preparation_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidIngredientPreparation>, Error> {
        VALID_INGREDIENT_PREPARATIONS_BY_PREPARATION
            .list(self, cx, &[valid_preparation_id], filter)
            .await
    }

    pub async fn create_valid_ingredient_preparation(
        &self,
        cx: &Context,
        input: &ValidIngredientPreparationCreationRequestInput,
    ) -> Result<ValidIngredientPreparation, Error> {
        VALID_INGREDIENT_PREPARATIONS
            .create(self, cx, &[], Some(input))
            .await
    }

    pub async fn update_valid_ingredient_preparation(
        &self,
        cx: &Context,
        valid_ingredient_preparation_id: &str,
        input: &ValidIngredientPreparationUpdateRequestInput,
    ) -> Result<ValidIngredientPreparation, Error> {
        VALID_INGREDIENT_PREPARATIONS
            .update(self, cx, &[valid_ingredient_preparation_id], Some(input))
            .await
    }

    pub async fn archive_valid_ingredient_preparation(
        &self,
        cx: &Context,
        valid_ingredient_preparation_id: &str,
    ) -> Result<(), Error> {
        VALID_INGREDIENT_PREPARATIONS
            .archive(self, cx, &[valid_ingredient_preparation_id])
            .await
    }
}
