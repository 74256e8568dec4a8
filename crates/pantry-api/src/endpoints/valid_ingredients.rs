// Valid ingredient and ingredient group endpoints

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{
    ValidIngredient, ValidIngredientCreationRequestInput, ValidIngredientGroup,
    ValidIngredientGroupCreationRequestInput, ValidIngredientGroupUpdateRequestInput,
    ValidIngredientUpdateRequestInput,
};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::{Method, SearchKind};
use crate::resource::{Extra, Ops, Resource};

// ── Descriptors ──────────────────────────────────────────────────────

const RANDOM_VALID_INGREDIENT: Extra = Extra {
    operation: "GetRandomValidIngredient",
    method: Method::Get,
    path: "/api/v1/valid_ingredients/random",
    params: &[],
};

const SEARCH_VALID_INGREDIENTS_BY_PREPARATION: Extra = Extra {
    operation: "SearchValidIngredientsByPreparation",
    method: Method::Get,
    path: "/api/v1/valid_ingredients/by_preparation/%s",
    params: &["validPreparationID"],
};

pub const VALID_INGREDIENTS: Resource = Resource {
    name: "ValidIngredient",
    plural: "ValidIngredients",
    path: "/api/v1/valid_ingredients/%s",
    list_path: "/api/v1/valid_ingredients",
    search_path: Some("/api/v1/valid_ingredients/search"),
    id_params: &["validIngredientID"],
    ops: Ops::crud(Method::Put),
    extras: &[RANDOM_VALID_INGREDIENT, SEARCH_VALID_INGREDIENTS_BY_PREPARATION],
};

pub const VALID_INGREDIENT_GROUPS: Resource = Resource {
    name: "ValidIngredientGroup",
    plural: "ValidIngredientGroups",
    path: "/api/v1/valid_ingredient_groups/%s",
    list_path: "/api/v1/valid_ingredient_groups",
    search_path: Some("/api/v1/valid_ingredient_groups/search"),
    id_params: &["validIngredientGroupID"],
    ops: Ops::crud(Method::Put),
    extras: &[],
};

// ── Ingredients ──────────────────────────────────────────────────────

impl Client {
    /// `GET /api/v1/valid_ingredients/{validIngredientID}`
    pub async fn get_valid_ingredient(
        &self,
        cx: &Context,
        valid_ingredient_id: &str,
    ) -> Result<ValidIngredient, Error> {
        VALID_INGREDIENTS.fetch(self, cx, &[valid_ingredient_id]).await
    }

    /// `GET /api/v1/valid_ingredients/random`
    pub async fn get_random_valid_ingredient(&self, cx: &Context) -> Result<ValidIngredient, Error> {
        RANDOM_VALID_INGREDIENT.fetch(self, cx, &[]).await
    }

    /// `GET /api/v1/valid_ingredients`
    pub async fn get_valid_ingredients(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidIngredient>, Error> {
        VALID_INGREDIENTS.list(self, cx, &[], filter).await
    }

    /// Search valid ingredients by name. A `limit` of 0 means 20.
    ///
    /// `GET /api/v1/valid_ingredients/search`
    pub async fn search_valid_ingredients(
        &self,
        cx: &Context,
        query: &str,
        limit: u16,
    ) -> Result<Vec<ValidIngredient>, Error> {
        VALID_INGREDIENTS.search(self, cx, &[], query, limit).await
    }

    /// Search the ingredients that accept a given preparation.
    ///
    /// `GET /api/v1/valid_ingredients/by_preparation/{validPreparationID}?q=..`
    pub async fn search_valid_ingredients_by_preparation(
        &self,
        cx: &Context,
        valid_preparation_id: &str,
        query: &str,
        limit: u16,
    ) -> Result<Vec<ValidIngredient>, Error> {
        SEARCH_VALID_INGREDIENTS_BY_PREPARATION
            .search(self, cx, &[valid_preparation_id], SearchKind::Query, query, limit)
            .await
    }

    /// `POST /api/v1/valid_ingredients`
    pub async fn create_valid_ingredient(
        &self,
        cx: &Context,
        input: &ValidIngredientCreationRequestInput,
    ) -> Result<ValidIngredient, Error> {
        VALID_INGREDIENTS.create(self, cx, &[], Some(input)).await
    }

    /// `PUT /api/v1/valid_ingredients/{validIngredientID}`
    pub async fn update_valid_ingredient(
        &self,
        cx: &Context,
        valid_ingredient_id: &str,
        input: &ValidIngredientUpdateRequestInput,
    ) -> Result<ValidIngredient, Error> {
        VALID_INGREDIENTS
            .update(self, cx, &[valid_ingredient_id], Some(input))
            .await
    }

    /// `DELETE /api/v1/valid_ingredients/{validIngredientID}`
    pub async fn archive_valid_ingredient(
        &self,
        cx: &Context,
        valid_ingredient_id: &str,
    ) -> Result<(), Error> {
        VALID_INGREDIENTS.archive(self, cx, &[valid_ingredient_id]).await
    }
}

// ── Ingredient groups ────────────────────────────────────────────────

impl Client {
    pub async fn get_valid_ingredient_group(
        &self,
        cx: &Context,
        valid_ingredient_group_id: &str,
    ) -> Result<ValidIngredientGroup, Error> {
        VALID_INGREDIENT_GROUPS
            .fetch(self, cx, &[valid_ingredient_group_id])
            .await
    }

    pub async fn get_valid_ingredient_groups(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidIngredientGroup>, Error> {
        VALID_INGREDIENT_GROUPS.list(self, cx, &[], filter).await
    }

    /// `GET /api/v1/valid_ingredient_groups/search?limit=..&q=..`
    pub async fn search_valid_ingredient_groups(
        &self,
        cx: &Context,
        query: &str,
        limit: u16,
    ) -> Result<Vec<ValidIngredientGroup>, Error> {
        VALID_INGREDIENT_GROUPS.search(self, cx, &[], query, limit).await
    }

    pub async fn create_valid_ingredient_group(
        &self,
        cx: &Context,
        input: &ValidIngredientGroupCreationRequestInput,
    ) -> Result<ValidIngredientGroup, Error> {
        VALID_INGREDIENT_GROUPS.create(self, cx, &[], Some(input)).await
    }

    pub async fn update_valid_ingredient_group(
        &self,
        cx: &Context,
        valid_ingredient_group_id: &str,
        input: &ValidIngredientGroupUpdateRequestInput,
    ) -> Result<ValidIngredientGroup, Error> {
        VALID_INGREDIENT_GROUPS
            .update(self, cx, &[valid_ingredient_group_id], Some(input))
            .await
    }

    pub async fn archive_valid_ingredient_group(
        &self,
        cx: &Context,
        valid_ingredient_group_id: &str,
    ) -> Result<(), Error> {
        VALID_INGREDIENT_GROUPS
            .archive(self, cx, &[valid_ingredient_group_id])
            .await
    }
}
