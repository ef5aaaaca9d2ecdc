use reqwest::{Client, ClientBuilder};

use crate::error::TransportError;
use crate::request::{HttpVersionPreference, RequestDescriptor};

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("callbench/", env!("CARGO_PKG_VERSION"));

/// Builds the client a single strategy invocation owns for its lifetime.
///
/// The per-call timeout is not set here: every request built from the
/// descriptor carries its own.
///
/// # Errors
///
/// Returns an error when the TLS backend or resolver cannot be initialised.
pub fn build_client(request: &RequestDescriptor) -> Result<Client, TransportError> {
    let builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
    apply_version(builder, request.version())
        .build()
        .map_err(|err| TransportError::BuildClient { source: err })
}

/// Over TLS the ALPN offer follows the preference: `http/1.1` alone, `h2`
/// alone, or `h2,http/1.1` for the negotiated default.
fn apply_version(builder: ClientBuilder, version: HttpVersionPreference) -> ClientBuilder {
    match version {
        HttpVersionPreference::Http1 => builder.http1_only(),
        HttpVersionPreference::Http2 => builder,
        HttpVersionPreference::Http2PriorKnowledge => builder.http2_prior_knowledge(),
    }
}
