use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::{parse_duration_value, parse_nonzero_duration};
use crate::args::{OutputFormat, Strategy};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub concurrency: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub duration: Option<DurationValue>,
    pub strategy: Option<Strategy>,
    pub progress_every: Option<u64>,
    pub interrupt_grace: Option<DurationValue>,
    pub output_format: Option<OutputFormat>,
    pub output: Option<String>,
}

/// A duration given as whole seconds, fractional seconds, or text like `"500ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    FractionalSeconds(f64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::FractionalSeconds(secs) => {
                let duration = fractional_seconds(*secs)?;
                if duration.is_zero() {
                    return Err(ValidationError::DurationZero);
                }
                Ok(duration)
            }
            DurationValue::Text(text) => parse_nonzero_duration(text),
        }
    }

    /// Same as `to_duration`, but zero is allowed.
    pub(crate) fn to_optional_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::FractionalSeconds(secs) => fractional_seconds(*secs),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}

fn fractional_seconds(secs: f64) -> Result<Duration, ValidationError> {
    Duration::try_from_secs_f64(secs).map_err(|_err| ValidationError::InvalidDurationFormat {
        value: secs.to_string(),
    })
}
