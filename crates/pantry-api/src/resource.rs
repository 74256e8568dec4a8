// Declarative resource descriptors
//
// A `Resource` names the canonical routes of one API resource (list,
// fetch, create, update, archive, optional search) plus any extra routes.
// The generic operations below turn a descriptor and arguments into a
// `RequestSpec` and run it through `Client::execute`; endpoint modules are
// thin typed wrappers over them.

use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::envelope::{PagedResult, Slot};
use crate::error::Error;
use crate::observe::Context;
use crate::query::{QueryFilter, SearchQuery};
use crate::request::{Method, RequestSpec, SearchKind};
use crate::validate::Input;

/// Describes one REST resource.
///
/// `path` is the item route and has one `%s` slot per entry in
/// `id_params`; `list_path` (and `search_path`) carry every slot except the
/// last, so nested resources list under their parent.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    /// Singular operation suffix, e.g. `ValidInstrument`.
    pub name: &'static str,
    /// Plural operation suffix, e.g. `ValidInstruments`.
    pub plural: &'static str,
    pub path: &'static str,
    pub list_path: &'static str,
    pub search_path: Option<&'static str>,
    pub id_params: &'static [&'static str],
    pub ops: Ops,
    pub extras: &'static [Extra],
}

/// Which canonical routes a resource actually serves. `GET path` always
/// exists; the server omits the others for some resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ops {
    pub list: bool,
    pub create: bool,
    /// PUT or PATCH; the API is not uniform.
    pub update: Option<Method>,
    pub archive: bool,
}

impl Ops {
    /// The full quintet, updating with `update`.
    pub const fn crud(update: Method) -> Self {
        Self {
            list: true,
            create: true,
            update: Some(update),
            archive: true,
        }
    }

    /// The quintet minus the update route.
    pub const fn immutable() -> Self {
        Self {
            list: true,
            create: true,
            update: None,
            archive: true,
        }
    }
}

/// A resource-specific route outside the canonical set.
#[derive(Debug, Clone, Copy)]
pub struct Extra {
    pub operation: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub params: &'static [&'static str],
}

/// One declared route, for enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
}

impl Resource {
    /// Every route this descriptor declares, canonical ones first.
    pub fn routes(&self) -> Vec<Route> {
        let mut routes = Vec::new();
        if self.ops.list {
            routes.push(Route {
                method: Method::Get,
                path: self.list_path,
            });
        }
        routes.push(Route {
            method: Method::Get,
            path: self.path,
        });
        if self.ops.create {
            routes.push(Route {
                method: Method::Post,
                path: self.list_path,
            });
        }
        if let Some(method) = self.ops.update {
            routes.push(Route {
                method,
                path: self.path,
            });
        }
        if self.ops.archive {
            routes.push(Route {
                method: Method::Delete,
                path: self.path,
            });
        }
        if let Some(path) = self.search_path {
            routes.push(Route {
                method: Method::Get,
                path,
            });
        }
        routes.extend(self.extras.iter().map(|extra| Route {
            method: extra.method,
            path: extra.path,
        }));
        routes
    }

    fn spec<'a>(
        &self,
        verb: &str,
        plural: bool,
        method: Method,
        template: &'a str,
        ids: &[&'a str],
    ) -> RequestSpec<'a> {
        let noun = if plural { self.plural } else { self.name };
        with_params(
            RequestSpec::new(format!("{verb}{noun}"), method, template),
            self.id_params,
            ids,
        )
    }

    // ── Generic operations ───────────────────────────────────────────

    /// `GET path`: a single entity.
    pub async fn fetch<T>(&self, client: &Client, cx: &Context, ids: &[&str]) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        let spec = self.spec("Get", false, Method::Get, self.path, ids).expect_data();
        fetch_slot(client, cx, spec).await
    }

    /// `GET list_path` with pagination. `None` uses the client's default filter.
    pub async fn list<T>(
        &self,
        client: &Client,
        cx: &Context,
        parent_ids: &[&str],
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        let spec = self
            .spec("Get", true, Method::Get, self.list_path, parent_ids)
            .filter(filter)
            .expect_data()
            .served(self.ops.list);
        let mut page = PagedResult::default();
        client.execute(cx, spec, Some(&mut page)).await?;
        Ok(page)
    }

    /// `POST list_path`; `None` input is rejected before any I/O.
    pub async fn create<T, I>(
        &self,
        client: &Client,
        cx: &Context,
        parent_ids: &[&str],
        input: Option<&I>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        I: Input,
    {
        let spec = self
            .spec("Create", false, Method::Post, self.list_path, parent_ids)
            .json(input)
            .expect_data()
            .served(self.ops.create);
        fetch_slot(client, cx, spec).await
    }

    /// `PUT`/`PATCH path`, returning the updated entity.
    pub async fn update<T, I>(
        &self,
        client: &Client,
        cx: &Context,
        ids: &[&str],
        input: Option<&I>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
        I: Input,
    {
        let method = self.ops.update.unwrap_or(Method::Put);
        let spec = self
            .spec("Update", false, method, self.path, ids)
            .json(input)
            .expect_data()
            .served(self.ops.update.is_some());
        fetch_slot(client, cx, spec).await
    }

    /// `DELETE path`. Envelope errors still surface.
    pub async fn archive(&self, client: &Client, cx: &Context, ids: &[&str]) -> Result<(), Error> {
        let spec = self
            .spec("Archive", false, Method::Delete, self.path, ids)
            .served(self.ops.archive);
        client.execute_discarding(cx, spec).await
    }

    /// `GET search_path?limit=..&q=..`. A limit of 0 means 20.
    pub async fn search<T>(
        &self,
        client: &Client,
        cx: &Context,
        parent_ids: &[&str],
        query: &str,
        limit: u16,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        let path = self.search_path.unwrap_or(self.list_path);
        let spec = self
            .spec("Search", true, Method::Get, path, parent_ids)
            .search(SearchKind::Query, SearchQuery::new(query, limit))
            .expect_data()
            .served(self.search_path.is_some());
        let mut page = PagedResult::default();
        client.execute(cx, spec, Some(&mut page)).await?;
        Ok(page.data)
    }
}

impl Extra {
    pub(crate) fn spec<'a>(&self, ids: &[&'a str]) -> RequestSpec<'a> {
        with_params(
            RequestSpec::new(self.operation, self.method, self.path),
            self.params,
            ids,
        )
    }

    /// Run an extra route that returns one entity (or one list without pagination).
    pub async fn fetch<T>(&self, client: &Client, cx: &Context, ids: &[&str]) -> Result<T, Error>
    where
        T: DeserializeOwned + Send,
    {
        fetch_slot(client, cx, self.spec(ids).expect_data()).await
    }

    /// Run an extra route that lists with pagination.
    pub async fn list<T>(
        &self,
        client: &Client,
        cx: &Context,
        ids: &[&str],
        filter: Option<&QueryFilter>,
    ) -> Result<PagedResult<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        let spec = self.spec(ids).filter(filter).expect_data();
        let mut page = PagedResult::default();
        client.execute(cx, spec, Some(&mut page)).await?;
        Ok(page)
    }

    /// Run an extra search route (`q` is a name or a username per `kind`).
    pub async fn search<T>(
        &self,
        client: &Client,
        cx: &Context,
        ids: &[&str],
        kind: SearchKind,
        query: &str,
        limit: u16,
    ) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned + Send,
    {
        let spec = self
            .spec(ids)
            .search(kind, SearchQuery::new(query, limit))
            .expect_data();
        let mut page = PagedResult::default();
        client.execute(cx, spec, Some(&mut page)).await?;
        Ok(page.data)
    }
}

/// Attach `ids` positionally, named after `names`. Extra ids keep a
/// generic name so the template arity check still catches them.
fn with_params<'a>(
    mut spec: RequestSpec<'a>,
    names: &'static [&'static str],
    ids: &[&'a str],
) -> RequestSpec<'a> {
    for (i, id) in ids.iter().copied().enumerate() {
        spec = spec.param(names.get(i).copied().unwrap_or("id"), id);
    }
    spec
}

/// Execute `spec` into a [`Slot`] and unwrap it.
pub(crate) async fn fetch_slot<T>(client: &Client, cx: &Context, spec: RequestSpec<'_>) -> Result<T, Error>
where
    T: DeserializeOwned + Send,
{
    let mut slot = Slot::new();
    client.execute(cx, spec, Some(&mut slot)).await?;
    slot.into_inner().ok_or_else(|| Error::DecodeFailed {
        message: "response envelope carried no data".into(),
        body: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const WIDGETS: Resource = Resource {
        name: "Widget",
        plural: "Widgets",
        path: "/api/v1/widgets/%s",
        list_path: "/api/v1/widgets",
        search_path: Some("/api/v1/widgets/search"),
        id_params: &["widgetID"],
        ops: Ops::crud(Method::Patch),
        extras: &[Extra {
            operation: "GetRandomWidget",
            method: Method::Get,
            path: "/api/v1/widgets/random",
            params: &[],
        }],
    };

    #[test]
    fn routes_cover_the_canonical_set_then_extras() {
        let routes: Vec<_> = WIDGETS
            .routes()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect();
        assert_eq!(
            routes,
            vec![
                "GET /api/v1/widgets",
                "GET /api/v1/widgets/%s",
                "POST /api/v1/widgets",
                "PATCH /api/v1/widgets/%s",
                "DELETE /api/v1/widgets/%s",
                "GET /api/v1/widgets/search",
                "GET /api/v1/widgets/random",
            ]
        );
    }

    #[test]
    fn operation_names_follow_verb_and_noun() {
        let spec = WIDGETS.spec("Get", true, Method::Get, WIDGETS.list_path, &[]);
        assert_eq!(spec.operation(), "GetWidgets");
        let spec = WIDGETS.spec("Archive", false, Method::Delete, WIDGETS.path, &["w1"]);
        assert_eq!(spec.operation(), "ArchiveWidget");
        assert_eq!(spec.params()[0].name, "widgetID");
    }

    #[test]
    fn immutable_resources_skip_the_update_route() {
        let frozen = Resource {
            ops: Ops {
                create: false,
                ..Ops::immutable()
            },
            extras: &[],
            ..WIDGETS
        };
        let methods: Vec<_> = frozen.routes().into_iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![Method::Get, Method::Get, Method::Delete, Method::Get]
        );
    }
}
