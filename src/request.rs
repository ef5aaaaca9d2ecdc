//! Immutable description of the outbound call every strategy issues.
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Url};
use serde::Deserialize;

use crate::error::{TransportError, ValidationError};

pub const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_ACCEPT: &str = "application/json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Protocol the client should speak to the target.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub enum HttpVersionPreference {
    #[serde(rename = "1.1")]
    Http1,
    /// HTTP/2 when the server offers it through ALPN, HTTP/1.1 otherwise.
    #[default]
    #[serde(rename = "2")]
    Http2,
    /// HTTP/2 without negotiation, also over cleartext.
    #[serde(rename = "2-prior-knowledge")]
    Http2PriorKnowledge,
}

impl HttpVersionPreference {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpVersionPreference::Http1 => "1.1",
            HttpVersionPreference::Http2 => "2",
            HttpVersionPreference::Http2PriorKnowledge => "2-prior-knowledge",
        }
    }
}

impl fmt::Display for HttpVersionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVersionPreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1.1" | "http1" | "http/1.1" => Ok(HttpVersionPreference::Http1),
            "2" | "http2" | "h2" => Ok(HttpVersionPreference::Http2),
            "2-prior-knowledge" | "h2c" => Ok(HttpVersionPreference::Http2PriorKnowledge),
            _ => Err(ValidationError::InvalidHttpVersion {
                value: s.to_owned(),
            }),
        }
    }
}

/// A GET request template, validated once and shared read-only by every
/// strategy for the whole benchmark.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    url: Url,
    version: HttpVersionPreference,
    headers: HeaderMap,
    timeout: Duration,
}

impl RequestDescriptor {
    #[must_use]
    pub fn builder(url: &str) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder {
            url: url.to_owned(),
            version: HttpVersionPreference::default(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn version(&self) -> HttpVersionPreference {
        self.version
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds a fresh request for `client` from this template.
    ///
    /// # Errors
    ///
    /// Returns an error if the client rejects the request.
    pub fn to_request(&self, client: &Client) -> Result<Request, TransportError> {
        client
            .request(Method::GET, self.url.clone())
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .build()
            .map_err(|err| TransportError::from_request(err, self.timeout))
    }
}

#[derive(Debug, Clone)]
pub struct RequestDescriptorBuilder {
    url: String,
    version: HttpVersionPreference,
    headers: Vec<(String, String)>,
    timeout: Duration,
}

impl RequestDescriptorBuilder {
    #[must_use]
    pub const fn version(mut self, version: HttpVersionPreference) -> Self {
        self.version = version;
        self
    }

    /// Appends a header. Repeated names are kept in insertion order.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.headers.extend(headers);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the URL and headers.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable or non-HTTP URL, or for a header
    /// name/value that is not valid on the wire.
    pub fn build(self) -> Result<RequestDescriptor, ValidationError> {
        let url = Url::parse(&self.url).map_err(|err| ValidationError::InvalidUrl {
            url: self.url.clone(),
            source: err,
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                ValidationError::InvalidHeaderName {
                    header: name.clone(),
                    source: err,
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|err| ValidationError::InvalidHeaderValue {
                    header: name.clone(),
                    source: err,
                })?;
            headers.append(header_name, header_value);
        }

        Ok(RequestDescriptor {
            url,
            version: self.version,
            headers,
            timeout: self.timeout,
        })
    }
}
