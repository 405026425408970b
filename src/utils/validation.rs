use crate::utils::error::{DirectoryError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> DirectoryError {
    DirectoryError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The restaurants API must be an absolute http(s) URL with a host.
pub fn validate_api_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| invalid(field, endpoint, e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            endpoint,
            format!("expected http or https, got {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, endpoint, "missing host"));
    }
    Ok(())
}

/// Cache directories and output files only need to be representable paths.
pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.is_empty() || path.contains('\0') {
        return Err(invalid(field, path, "not a usable path"));
    }
    Ok(())
}

/// Timeouts and refresh intervals are whole seconds, zero disallowed.
pub fn validate_seconds(field: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(invalid(field, seconds, "must be at least one second"));
    }
    Ok(())
}

/// A filter is either `all` or a value the API reports; blank never matches.
pub fn validate_filter_value(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "filter value is blank"));
    }
    Ok(())
}
