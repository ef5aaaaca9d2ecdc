use crate::error::ValidationError;
use crate::request::RequestDescriptor;

use super::BenchArgs;

/// The `Accept` shortcut first, then `--header` values in the given order.
pub(crate) fn build_headers(args: &BenchArgs) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(args.headers.len().saturating_add(1));
    if !args.accept.is_empty() {
        headers.push(("Accept".to_owned(), args.accept.clone()));
    }
    headers.extend(args.headers.iter().cloned());
    headers
}

impl BenchArgs {
    /// Builds the request every strategy will issue.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid URL or header.
    pub fn request_descriptor(&self) -> Result<RequestDescriptor, ValidationError> {
        RequestDescriptor::builder(&self.url)
            .version(self.http_version)
            .timeout(self.timeout)
            .headers(build_headers(self))
            .build()
    }
}
