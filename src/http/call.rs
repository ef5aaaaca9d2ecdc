use futures_util::StreamExt;
use reqwest::{Client, Response};

use crate::error::TransportError;
use crate::request::RequestDescriptor;

/// What a completed call reports back. Only used for per-call logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
    pub body_bytes: u64,
}

/// Issues one GET described by `request` and reads the body to the end.
///
/// The response status is not checked: a completed exchange counts as a
/// completed call.
///
/// # Errors
///
/// Returns an error on connection, protocol or timeout failure, including
/// failures while the body is still streaming.
pub async fn send_call(
    client: &Client,
    request: &RequestDescriptor,
) -> Result<ResponseSummary, TransportError> {
    let timeout = request.timeout();
    let response = client
        .execute(request.to_request(client)?)
        .await
        .map_err(|err| TransportError::from_request(err, timeout))?;
    let status = response.status().as_u16();
    let body_bytes = drain_response_body(response)
        .await
        .map_err(|err| TransportError::from_body(err, timeout))?;
    Ok(ResponseSummary { status, body_bytes })
}

async fn drain_response_body(response: Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
