// Meal plan endpoints
//
// Grocery list items and tasks are nested under their meal plan, so every
// call on them takes the meal plan id first.

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{
    MealPlan, MealPlanCreationRequestInput, MealPlanGroceryListItem,
    MealPlanGroceryListItemCreationRequestInput, MealPlanGroceryListItemUpdateRequestInput,
    MealPlanTask, MealPlanTaskCreationRequestInput, MealPlanTaskStatusChangeRequestInput,
    MealPlanUpdateRequestInput,
};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::Method;
use crate::resource::{Ops, Resource};

// ── Descriptors ──────────────────────────────────────────────────────

pub const MEAL_PLANS: Resource = Resource {
    name: "MealPlan",
    plural: "MealPlans",
    path: "/api/v1/meal_plans/%s",
    list_path: "/api/v1/meal_plans",
    search_path: None,
    id_params: &["mealPlanID"],
    ops: Ops::crud(Method::Put),
    extras: &[],
};

pub const MEAL_PLAN_GROCERY_LIST_ITEMS: Resource = Resource {
    name: "MealPlanGroceryListItem",
    plural: "MealPlanGroceryListItems",
    path: "/api/v1/meal_plans/%s/grocery_list_items/%s",
    list_path: "/api/v1/meal_plans/%s/grocery_list_items",
    search_path: None,
    id_params: &["mealPlanID", "mealPlanGroceryListItemID"],
    ops: Ops::crud(Method::Put),
    extras: &[],
};

/// Tasks are never deleted; their status moves through `PATCH` instead.
pub const MEAL_PLAN_TASKS: Resource = Resource {
    name: "MealPlanTask",
    plural: "MealPlanTasks",
    path: "/api/v1/meal_plans/%s/tasks/%s",
    list_path: "/api/v1/meal_plans/%s/tasks",
    search_path: None,
    id_params: &["mealPlanID", "mealPlanTaskID"],
    ops: Ops {
        archive: false,
        ..Ops::crud(Method::Patch)
    },
    extras: &[],
};

// ── Meal plans ───────────────────────────────────────────────────────

impl Client {
    /// `GET /api/v1/meal_plans/{mealPlanID}`
    pub async fn get_meal_plan(&self, cx: &Context, meal_plan_id: &str) -> Result<MealPlan, Error> {
        MEAL_PLANS.fetch(self, cx, &[meal_plan_id]).await
    }

    /// `GET /api/v1/meal_plans`
    pub async fn get_meal_plans(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<MealPlan>, Error> {
        MEAL_PLANS.list(self, cx, &[], filter).await
    }

    /// `POST /api/v1/meal_plans`
    pub async fn create_meal_plan(
        &self,
        cx: &Context,
        input: &MealPlanCreationRequestInput,
    ) -> Result<MealPlan, Error> {
        MEAL_PLANS.create(self, cx, &[], Some(input)).await
    }

    /// `PUT /api/v1/meal_plans/{mealPlanID}`
    pub async fn update_meal_plan(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        input: &MealPlanUpdateRequestInput,
    ) -> Result<MealPlan, Error> {
        MEAL_PLANS.update(self, cx, &[meal_plan_id], Some(input)).await
    }

    /// `DELETE /api/v1/meal_plans/{mealPlanID}`
    pub async fn archive_meal_plan(&self, cx: &Context, meal_plan_id: &str) -> Result<(), Error> {
        MEAL_PLANS.archive(self, cx, &[meal_plan_id]).await
    }
}

// ── Grocery list items ───────────────────────────────────────────────

impl Client {
    /// `GET /api/v1/meal_plans/{mealPlanID}/grocery_list_items/{mealPlanGroceryListItemID}`
    pub async fn get_meal_plan_grocery_list_item(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        item_id: &str,
    ) -> Result<MealPlanGroceryListItem, Error> {
        MEAL_PLAN_GROCERY_LIST_ITEMS
            .fetch(self, cx, &[meal_plan_id, item_id])
            .await
    }

    pub async fn get_meal_plan_grocery_list_items(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<MealPlanGroceryListItem>, Error> {
        MEAL_PLAN_GROCERY_LIST_ITEMS
            .list(self, cx, &[meal_plan_id], filter)
            .await
    }

    pub async fn create_meal_plan_grocery_list_item(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        input: &MealPlanGroceryListItemCreationRequestInput,
    ) -> Result<MealPlanGroceryListItem, Error> {
        MEAL_PLAN_GROCERY_LIST_ITEMS
            .create(self, cx, &[meal_plan_id], Some(input))
            .await
    }

    pub async fn update_meal_plan_grocery_list_item(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        item_id: &str,
        input: &MealPlanGroceryListItemUpdateRequestInput,
    ) -> Result<MealPlanGroceryListItem, Error> {
        MEAL_PLAN_GROCERY_LIST_ITEMS
            .update(self, cx, &[meal_plan_id, item_id], Some(input))
            .await
    }

    pub async fn archive_meal_plan_grocery_list_item(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        item_id: &str,
    ) -> Result<(), Error> {
        MEAL_PLAN_GROCERY_LIST_ITEMS
            .archive(self, cx, &[meal_plan_id, item_id])
            .await
    }
}

// ── Tasks ────────────────────────────────────────────────────────────

impl Client {
    pub async fn get_meal_plan_task(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        task_id: &str,
    ) -> Result<MealPlanTask, Error> {
        MEAL_PLAN_TASKS.fetch(self, cx, &[meal_plan_id, task_id]).await
    }

    pub async fn get_meal_plan_tasks(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<MealPlanTask>, Error> {
        MEAL_PLAN_TASKS.list(self, cx, &[meal_plan_id], filter).await
    }

    pub async fn create_meal_plan_task(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        input: &MealPlanTaskCreationRequestInput,
    ) -> Result<MealPlanTask, Error> {
        MEAL_PLAN_TASKS
            .create(self, cx, &[meal_plan_id], Some(input))
            .await
    }

    /// Move a task to a new status or assignee.
    ///
    /// `PATCH /api/v1/meal_plans/{mealPlanID}/tasks/{mealPlanTaskID}`
    pub async fn change_meal_plan_task_status(
        &self,
        cx: &Context,
        meal_plan_id: &str,
        task_id: &str,
        input: &MealPlanTaskStatusChangeRequestInput,
    ) -> Result<MealPlanTask, Error> {
        MEAL_PLAN_TASKS
            .update(self, cx, &[meal_plan_id, task_id], Some(input))
            .await
    }
}
