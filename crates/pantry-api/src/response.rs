// Response envelope decoding
//
// Reads the whole body (bounded), classifies by status, then decodes the
// uniform envelope into the caller's destination. The `reqwest::Response`
// is moved in and dropped on every path, which releases the connection.

use bytes::BytesMut;
use tracing::trace;

use crate::envelope::{ApiResponse, BareEnvelope, Destination, ErrorPayload};
use crate::error::{Error, Fault, Stage, normalize};
use crate::observe::CallContext;
use crate::transport::{RawResponse, race};

/// Reference maximum body size: 8 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Decode `raw` into `destination`.
///
/// With no destination the body is still read and envelope errors are
/// still surfaced. On HTTP 2xx/3xx an envelope `error` with a non-empty
/// code wins over `data`.
pub async fn decode<D: Destination>(
    call: &CallContext,
    raw: RawResponse,
    max_body: usize,
    destination: Option<&mut D>,
) -> Result<(), Error> {
    let RawResponse { status, response } = raw;
    let body = read_body(call, response, max_body).await?;

    trace!(status = status.as_u16(), bytes = body.len(), "response body read");

    if status.as_u16() >= 400 {
        return Err(Error::from_status(status, error_payload(&body)));
    }

    decode_success(&body, destination)
}

fn decode_success<D: Destination>(body: &[u8], destination: Option<&mut D>) -> Result<(), Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return match destination {
            None => Ok(()),
            Some(destination) => {
                destination.fill(None, None);
                if destination.is_complete() {
                    Ok(())
                } else {
                    Err(decode_failure("empty response body", body))
                }
            }
        };
    }

    // Probe for the application error first so a payload that does not
    // match the destination type cannot hide it.
    let probe: BareEnvelope = serde_json::from_slice(body).map_err(|source| json_fault(source, body))?;
    if let Some(payload) = probe.active_error() {
        return Err(Error::Application {
            code: payload.code.clone(),
            message: payload.message.clone(),
            details: probe.details.clone().unwrap_or_default(),
        });
    }

    let Some(destination) = destination else {
        return Ok(());
    };

    let envelope: ApiResponse<D::Data> =
        serde_json::from_slice(body).map_err(|source| json_fault(source, body))?;
    destination.fill(envelope.data, envelope.pagination);

    if destination.is_complete() {
        Ok(())
    } else {
        Err(decode_failure("response envelope carried no data", body))
    }
}

/// Best-effort extraction of the server's error payload from an error body.
///
/// Accepts the full envelope or a bare `{"code", "message"}` object.
fn error_payload(body: &[u8]) -> Option<ErrorPayload> {
    if let Ok(envelope) = serde_json::from_slice::<BareEnvelope>(body) {
        if let Some(payload) = envelope.error.filter(|p| !p.is_empty() || !p.message.is_empty()) {
            return Some(payload);
        }
    }
    serde_json::from_slice::<ErrorPayload>(body)
        .ok()
        .filter(|p| !p.is_empty() || !p.message.is_empty())
}

/// Read the full body, bounded by `max_body`, under the call's deadline
/// and cancellation.
async fn read_body(
    call: &CallContext,
    mut response: reqwest::Response,
    max_body: usize,
) -> Result<BytesMut, Error> {
    if let Some(declared) = response.content_length() {
        if !usize::try_from(declared).is_ok_and(|len| len <= max_body) {
            return Err(normalize(Stage::Decode, Fault::TooLarge(max_body)));
        }
    }

    let mut body = BytesMut::new();
    loop {
        let chunk = race(call, call.deadline(), response.chunk())
            .await?
            .map_err(|e| normalize(Stage::Transport, Fault::Http(e)))?;
        let Some(chunk) = chunk else {
            break;
        };
        if body.len() + chunk.len() > max_body {
            return Err(normalize(Stage::Decode, Fault::TooLarge(max_body)));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn json_fault(source: serde_json::Error, body: &[u8]) -> Error {
    normalize(
        Stage::Decode,
        Fault::Json {
            source,
            body: String::from_utf8_lossy(body).into_owned(),
        },
    )
}

fn decode_failure(message: &str, body: &[u8]) -> Error {
    Error::DecodeFailed {
        message: message.to_owned(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}
