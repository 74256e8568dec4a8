// Household endpoints

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{Household, HouseholdCreationRequestInput, HouseholdUpdateRequestInput};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::Method;
use crate::resource::{Extra, Ops, Resource};

const CURRENT_HOUSEHOLD: Extra = Extra {
    operation: "GetCurrentHouseholdInfo",
    method: Method::Get,
    path: "/api/v1/households/current",
    params: &[],
};

pub const HOUSEHOLDS: Resource = Resource {
    name: "Household",
    plural: "Households",
    path: "/api/v1/households/%s",
    list_path: "/api/v1/households",
    search_path: None,
    id_params: &["householdID"],
    ops: Ops::crud(Method::Put),
    extras: &[CURRENT_HOUSEHOLD],
};

impl Client {
    /// `GET /api/v1/households/{householdID}`
    pub async fn get_household(&self, cx: &Context, household_id: &str) -> Result<Household, Error> {
        HOUSEHOLDS.fetch(self, cx, &[household_id]).await
    }

    /// The household the credentials are currently acting in.
    ///
    /// `GET /api/v1/households/current`
    pub async fn get_current_household(&self, cx: &Context) -> Result<Household, Error> {
        CURRENT_HOUSEHOLD.fetch(self, cx, &[]).await
    }

    /// `GET /api/v1/households`
    pub async fn get_households(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<Household>, Error> {
        HOUSEHOLDS.list(self, cx, &[], filter).await
    }

    /// `POST /api/v1/households`
    pub async fn create_household(
        &self,
        cx: &Context,
        input: &HouseholdCreationRequestInput,
    ) -> Result<Household, Error> {
        HOUSEHOLDS.create(self, cx, &[], Some(input)).await
    }

    /// `PUT /api/v1/households/{householdID}`
    pub async fn update_household(
        &self,
        cx: &Context,
        household_id: &str,
        input: &HouseholdUpdateRequestInput,
    ) -> Result<Household, Error> {
        HOUSEHOLDS.update(self, cx, &[household_id], Some(input)).await
    }

    /// `DELETE /api/v1/households/{householdID}`
    pub async fn archive_household(&self, cx: &Context, household_id: &str) -> Result<(), Error> {
        HOUSEHOLDS.archive(self, cx, &[household_id]).await
    }
}
