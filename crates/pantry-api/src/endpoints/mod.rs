// Endpoint façades
//
// Each submodule declares the `Resource` descriptors for one area of the
// API and adds thin typed methods to `Client` on top of them.

mod households;
mod meal_plans;
mod recipes;
mod users;
mod valid_ingredients;
mod valid_instruments;
mod valid_measurements;
mod valid_preparations;
mod webhooks;

use crate::resource::Resource;

pub use households::HOUSEHOLDS;
pub use meal_plans::{MEAL_PLAN_GROCERY_LIST_ITEMS, MEAL_PLAN_TASKS, MEAL_PLANS};
pub use recipes::RECIPES;
pub use users::USERS;
pub use valid_ingredients::{VALID_INGREDIENT_GROUPS, VALID_INGREDIENTS};
pub use valid_instruments::VALID_INSTRUMENTS;
pub use valid_measurements::{VALID_MEASUREMENT_CONVERSIONS, VALID_MEASUREMENT_UNITS};
pub use valid_preparations::{VALID_INGREDIENT_PREPARATIONS, VALID_PREPARATIONS};
pub use webhooks::WEBHOOKS;

/// Every resource the client knows about.
pub const RESOURCES: &[Resource] = &[
    VALID_INSTRUMENTS,
    VALID_INGREDIENTS,
    VALID_INGREDIENT_GROUPS,
    VALID_PREPARATIONS,
    VALID_INGREDIENT_PREPARATIONS,
    VALID_MEASUREMENT_UNITS,
    VALID_MEASUREMENT_CONVERSIONS,
    RECIPES,
    MEAL_PLANS,
    MEAL_PLAN_GROCERY_LIST_ITEMS,
    MEAL_PLAN_TASKS,
    WEBHOOKS,
    HOUSEHOLDS,
    USERS,
];
