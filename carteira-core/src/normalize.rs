use carteira_types::{CallMeta, RawOutcome, RawResponse, ResponseEnvelope, TransportError};

/// Map a parsed HTTP outcome to the uniform envelope.
///
/// Pure: the same inputs always yield the same envelope. `meta` is accepted but not
/// branched on; it is the hook for per-call enrichment (e.g. echoing which logical
/// call failed) should callers need it.
#[must_use]
pub fn normalize(raw: RawOutcome, meta: &CallMeta) -> ResponseEnvelope {
    let _ = meta;
    let RawOutcome {
        ok,
        status,
        status_text,
        body,
    } = raw;
    ResponseEnvelope {
        success: ok,
        status,
        data: body,
        message: (!ok).then_some(status_text),
        failure: None,
    }
}

/// Parse a raw response body as JSON.
///
/// An empty (or whitespace-only) body parses to `None`.
///
/// # Errors
/// Returns `InvalidResponse` if the body is not valid JSON.
pub fn parse_body(resp: &RawResponse) -> Result<RawOutcome, TransportError> {
    let body = if resp.body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let value = serde_json::from_slice(&resp.body).map_err(|e| {
            TransportError::InvalidResponse(format!("status {}: {e}", resp.status))
        })?;
        Some(value)
    };
    Ok(RawOutcome {
        ok: resp.is_success(),
        status: resp.status,
        status_text: resp.status_text.clone(),
        body,
    })
}
