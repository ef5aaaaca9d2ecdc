use std::time::Duration;

use serde::Deserialize;

use crate::error::ValidationError;
use crate::request::HttpVersionPreference;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub headers: Option<Vec<String>>,
    pub accept: Option<String>,
    pub timeout: Option<DurationValue>,
    pub http_version: Option<HttpVersionPreference>,
    pub pool_size: Option<usize>,
    pub calls: Option<Vec<usize>>,
    pub demo_calls: Option<usize>,
    pub output: Option<String>,
    pub no_csv: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => crate::args::parse_duration_arg(text),
        }
    }
}
