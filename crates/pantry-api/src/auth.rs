// Authentication material
//
// Each request carries an `AuthMode`: authenticated calls ask the client's
// `CredentialProvider` to stamp a bearer token or session cookie onto the
// headers, unauthenticated ones (registration, login) go out bare.

use std::fmt;

use reqwest::header::{AUTHORIZATION, COOKIE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Fault, Stage, normalize};

/// Default session cookie name issued by the API server.
pub const DEFAULT_COOKIE_NAME: &str = "pantry_session";

/// Whether a particular call carries credentials.
///
/// Marker enum (no data); the secret material lives in [`Credentials`].
/// Only user registration and login run unauthenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Authenticated,
    Unauthenticated,
}

/// Anything that can stamp authentication material onto a request.
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// `true` when there is nothing to attach.
    fn is_empty(&self) -> bool;

    /// Add authentication headers. Header values are marked sensitive.
    fn annotate(&self, headers: &mut HeaderMap) -> Result<(), Error>;
}

/// Authentication material for the API.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`, as issued by the JWT login route.
    Bearer(SecretString),

    /// Browser-style session cookie.
    Cookie { name: String, value: SecretString },

    /// No credentials; authenticated calls go out bare and the server decides.
    #[default]
    None,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(SecretString::from(token.into()))
    }

    pub fn cookie(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Cookie {
            name: name.into(),
            value: SecretString::from(value.into()),
        }
    }
}

impl CredentialProvider for Credentials {
    fn is_empty(&self) -> bool {
        match self {
            Self::Bearer(token) => token.expose_secret().is_empty(),
            Self::Cookie { value, .. } => value.expose_secret().is_empty(),
            Self::None => true,
        }
    }

    fn annotate(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        let (name, raw) = match self {
            Self::Bearer(token) => (AUTHORIZATION, format!("Bearer {}", token.expose_secret())),
            Self::Cookie { name, value } => (COOKIE, format!("{name}={}", value.expose_secret())),
            Self::None => return Ok(()),
        };

        // Never echo the secret into the error message.
        let mut value = HeaderValue::from_str(&raw).map_err(|_| {
            normalize(
                Stage::Build,
                Fault::Header(format!("credential for {name} is not a valid header value")),
            )
        })?;
        value.set_sensitive(true);
        headers.insert(name, value);
        Ok(())
    }
}
