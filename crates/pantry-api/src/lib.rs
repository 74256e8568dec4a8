// pantry-api: Async Rust client for the Pantry recipe and meal-planning API
//
// Every call runs the same pipeline: argument guards, request building,
// the authenticated transport, then envelope decoding. Errors from any
// stage are normalized into one closed `Error` taxonomy.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod models;
pub mod observe;
pub mod query;
pub mod request;
pub mod resource;
pub mod response;
pub mod transport;
pub mod validate;

pub use auth::{AuthMode, CredentialProvider, Credentials};
pub use client::{Client, ClientConfig};
pub use envelope::{ApiResponse, Destination, Discard, ErrorPayload, PagedResult, Pagination, Slot};
pub use error::{Error, ErrorKind};
pub use observe::Context;
pub use query::{QueryFilter, SearchQuery, SortOrder};
pub use request::{AvatarUpload, Method, RequestSpec};
pub use resource::{Extra, Ops, Resource, Route};
pub use transport::{TlsMode, TransportConfig};
pub use validate::{Input, Validate, ValidationError};
