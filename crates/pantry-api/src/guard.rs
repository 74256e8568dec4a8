// Pre-flight argument checks
//
// Order is fixed: path ids, then search terms, then request inputs, then
// the decode destination. Checks never touch the network and never log.

use crate::envelope::Destination;
use crate::error::Error;
use crate::request::{Payload, RequestSpec, SearchKind};

/// Reject a call before any I/O if its arguments are unusable.
pub fn guard<D: Destination>(spec: &RequestSpec<'_>, destination: Option<&D>) -> Result<(), Error> {
    check_ids(spec)?;
    check_search(spec)?;
    check_payload(spec)?;
    check_destination(spec, destination)
}

fn check_ids(spec: &RequestSpec<'_>) -> Result<(), Error> {
    match spec.params().iter().find(|p| p.value.is_empty()) {
        Some(param) => Err(Error::InvalidId { param: param.name }),
        None => Ok(()),
    }
}

fn check_search(spec: &RequestSpec<'_>) -> Result<(), Error> {
    match spec.search_term() {
        Some((SearchKind::Query, search)) if search.query.is_empty() => Err(Error::EmptyQuery),
        Some((SearchKind::Username, search)) if search.query.is_empty() => {
            Err(Error::EmptyUsername)
        }
        _ => Ok(()),
    }
}

fn check_payload(spec: &RequestSpec<'_>) -> Result<(), Error> {
    match spec.payload() {
        Payload::None => Ok(()),
        Payload::Missing => Err(Error::NilInput),
        Payload::Json(input) => input.validate().map_err(|e| Error::InvalidInput {
            reason: e.to_string(),
        }),
        Payload::Avatar(upload) if upload.bytes.is_empty() => Err(Error::NilInput),
        Payload::Avatar(_) => Ok(()),
    }
}

fn check_destination<D: Destination>(
    spec: &RequestSpec<'_>,
    destination: Option<&D>,
) -> Result<(), Error> {
    match destination {
        None if spec.expects_data() => Err(Error::NilDestination),
        Some(d) if !d.is_settable() => Err(Error::NonPointerDestination),
        _ => Ok(()),
    }
}
