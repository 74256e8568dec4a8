// Valid instrument endpoints
//
// Base path: /api/v1/valid_instruments

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{
    ValidInstrument, ValidInstrumentCreationRequestInput, ValidInstrumentUpdateRequestInput,
};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::request::Method;
use crate::resource::{Extra, Ops, Resource};

const RANDOM_VALID_INSTRUMENT: Extra = Extra {
    operation: "GetRandomValidInstrument",
    method: Method::Get,
    path: "/api/v1/valid_instruments/random",
    params: &[],
};

pub const VALID_INSTRUMENTS: Resource = Resource {
    name: "ValidInstrument",
    plural: "ValidInstruments",
    path: "/api/v1/valid_instruments/%s",
    list_path: "/api/v1/valid_instruments",
    search_path: Some("/api/v1/valid_instruments/search"),
    id_params: &["validInstrumentID"],
    ops: Ops::crud(Method::Put),
    extras: &[RANDOM_VALID_INSTRUMENT],
};

impl Client {
    /// `GET /api/v1/valid_instruments/{validInstrumentID}`
    pub async fn get_valid_instrument(
        &self,
        cx: &Context,
        valid_instrument_id: &str,
    ) -> Result<ValidInstrument, Error> {
        VALID_INSTRUMENTS.fetch(self, cx, &[valid_instrument_id]).await
    }

    /// A random valid instrument, for seeding and demos.
    ///
    /// `GET /api/v1/valid_instruments/random`
    pub async fn get_random_valid_instrument(&self, cx: &Context) -> Result<ValidInstrument, Error> {
        RANDOM_VALID_INSTRUMENT.fetch(self, cx, &[]).await
    }

    /// List valid instruments. `None` uses the client's default filter.
    ///
    /// `GET /api/v1/valid_instruments`
    pub async fn get_valid_instruments(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<ValidInstrument>, Error> {
        VALID_INSTRUMENTS.list(self, cx, &[], filter).await
    }

    /// Search valid instruments by name. A `limit` of 0 means 20.
    ///
    /// `GET /api/v1/valid_instruments/search?limit=..&q=..`
    pub async fn search_valid_instruments(
        &self,
        cx: &Context,
        query: &str,
        limit: u16,
    ) -> Result<Vec<ValidInstrument>, Error> {
        VALID_INSTRUMENTS.search(self, cx, &[], query, limit).await
    }

    /// `POST /api/v1/valid_instruments`
    pub async fn create_valid_instrument(
        &self,
        cx: &Context,
        input: &ValidInstrumentCreationRequestInput,
    ) -> Result<ValidInstrument, Error> {
        VALID_INSTRUMENTS.create(self, cx, &[], Some(input)).await
    }

    /// `PUT /api/v1/valid_instruments/{validInstrumentID}`
    pub async fn update_valid_instrument(
        &self,
        cx: &Context,
        valid_instrument_id: &str,
        input: &ValidInstrumentUpdateRequestInput,
    ) -> Result<ValidInstrument, Error> {
        VALID_INSTRUMENTS
            .update(self, cx, &[valid_instrument_id], Some(input))
            .await
    }

    /// `DELETE /api/v1/valid_instruments/{validInstrumentID}`
    pub async fn archive_valid_instrument(
        &self,
        cx: &Context,
        valid_instrument_id: &str,
    ) -> Result<(), Error> {
        VALID_INSTRUMENTS.archive(self, cx, &[valid_instrument_id]).await
    }
}
