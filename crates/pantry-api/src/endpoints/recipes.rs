// Recipe endpoints

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{Recipe, RecipeCreationRequestInput, RecipeUpdateRequestInput};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::Method;
use crate::resource::{Ops, Resource};

pub const RECIPES: Resource = Resource {
    name: "Recipe",
    plural: "Recipes",
    path: "/api/v1/recipes/%s",
    list_path: "/api/v1/recipes",
    search_path: Some("/api/v1/recipes/search"),
    id_params: &["recipeID"],
    ops: Ops::crud(Method::Put),
    extras: &[],
};

impl Client {
    /// `GET /api/v1/recipes/{recipeID}`
    pub async fn get_recipe(&self, cx: &Context, recipe_id: &str) -> Result<Recipe, Error> {
        RECIPES.fetch(self, cx, &[recipe_id]).await
    }

    /// `GET /api/v1/recipes`
    pub async fn get_recipes(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<Recipe>, Error> {
        RECIPES.list(self, cx, &[], filter).await
    }

    /// `GET /api/v1/recipes/search?limit=..&q=..`
    pub async fn search_recipes(
        &self,
        cx: &Context,
        query: &str,
        limit: u16,
    ) -> Result<Vec<Recipe>, Error> {
        RECIPES.search(self, cx, &[], query, limit).await
    }

    /// `POST /api/v1/recipes`
    pub async fn create_recipe(
        &self,
        cx: &Context,
        input: &RecipeCreationRequestInput,
    ) -> Result<Recipe, Error> {
        RECIPES.create(self, cx, &[], Some(input)).await
    }

    /// `PUT /api/v1/recipes/{recipeID}`
    pub async fn update_recipe(
        &self,
        cx: &Context,
        recipe_id: &str,
        input: &RecipeUpdateRequestInput,
    ) -> Result<Recipe, Error> {
        RECIPES.update(self, cx, &[recipe_id], Some(input)).await
    }

    /// `DELETE /api/v1/recipes/{recipeID}`
    pub async fn archive_recipe(&self, cx: &Context, recipe_id: &str) -> Result<(), Error> {
        RECIPES.archive(self, cx, &[recipe_id]).await
    }
}
