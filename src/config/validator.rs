use std::collections::HashSet;

use crate::error::{AppError, Result};

use super::{Params, ProviderConfig};

/// Validate request parameters and surface every issue at once.
pub fn validate_params(params: &Params) -> Result<()> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (idx, brand) in params.brands.iter().enumerate() {
        if brand.id.trim().is_empty() {
            issues.push(format!("brand #{idx} has an empty id"));
            continue;
        }
        if !seen.insert(brand.id.as_str()) {
            issues.push(format!("brand id `{}` is listed more than once", brand.id));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidParams(issues.join("; ")))
    }
}

pub fn validate_provider_config(config: &ProviderConfig) -> Result<()> {
    let mut issues = Vec::new();

    let endpoint = config.endpoint.trim();
    if endpoint.is_empty() {
        issues.push("endpoint must not be empty".to_string());
    } else if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        issues.push(format!("endpoint `{endpoint}` must use http or https"));
    }

    if config.id_param.trim().is_empty() {
        issues.push("id_param must not be empty".to_string());
    }

    for (key, _) in &config.extra_query {
        if key.trim().is_empty() {
            issues.push("extra_query contains an empty key".to_string());
        }
        if key == &config.id_param {
            issues.push(format!("extra_query key `{key}` clashes with id_param"));
        }
    }

    if config.timeout_secs == 0 {
        issues.push("timeout_secs must be greater than zero".to_string());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "provider config invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}
