// Webhook endpoints
//
// Webhooks cannot be edited in place; archive and recreate instead.

use crate::client::Client;
use crate::envelope::PagedResult;
use crate::error::Error;
use crate::models::{Webhook, WebhookCreationRequestInput};
use crate::observe::Context;
use crate::query::QueryFilter;
use crate::resource::{Ops, Resource};

pub const WEBHOOKS: Resource = Resource {
    name: "Webhook",
    plural: "Webhooks",
    path: "/api/v1/webhooks/%s",
    list_path: "/api/v1/webhooks",
    search_path: None,
    id_params: &["webhookID"],
    ops: Ops::immutable(),
    extras: &[],
};

impl Client {
    /// `GET /api/v1/webhooks/{webhookID}`
    pub async fn get_webhook(&self, cx: &Context, webhook_id: &str) -> Result<Webhook, Error> {
        WEBHOOKS.fetch(self, cx, &[webhook_id]).await
    }

    /// `GET /api/v1/webhooks`
    pub async fn get_webhooks(
        &self,
        cx: &Context,
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<Webhook>, Error> {
        WEBHOOKS.list(self, cx, &[], filter).await
    }

    /// `POST /api/v1/webhooks`
    pub async fn create_webhook(
        &self,
        cx: &Context,
        input: &WebhookCreationRequestInput,
    ) -> Result<Webhook, Error> {
        WEBHOOKS.create(self, cx, &[], Some(input)).await
    }

    /// `DELETE /api/v1/webhooks/{webhookID}`
    pub async fn archive_webhook(&self, cx: &Context, webhook_id: &str) -> Result<(), Error> {
        WEBHOOKS.archive(self, cx, &[webhook_id]).await
    }
}
