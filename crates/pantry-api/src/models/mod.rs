// Domain models
//
// Opaque value types the endpoints read and write. Unknown server fields
// are kept in each entity's `extra` map.

mod households;
mod meal_plans;
mod recipes;
mod users;
mod valid;
mod webhooks;

pub use households::*;
pub use meal_plans::*;
pub use recipes::*;
pub use users::*;
pub use valid::*;
pub use webhooks::*;
