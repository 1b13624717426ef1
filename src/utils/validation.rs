use crate::utils::error::{CheckerError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CheckerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CheckerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CheckerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CheckerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 必填欄位：空字串或只有空白都視為未設定
pub fn validate_required_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CheckerError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CheckerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("vendor.base_url", "https://example.com").is_ok());
        assert!(validate_url("vendor.base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("vendor.base_url", "").is_err());
        assert!(validate_url("vendor.base_url", "invalid-url").is_err());
        assert!(validate_url("vendor.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("vendor.timeout_seconds", 10, 1).is_ok());
        assert!(validate_positive_number("vendor.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_required_and_non_empty_strings() {
        assert!(validate_required_string("device.model", "RLN8-410").is_ok());
        assert!(matches!(
            validate_required_string("device.model", "   "),
            Err(CheckerError::MissingConfigError { .. })
        ));
        assert!(matches!(
            validate_non_empty_string("version", ""),
            Err(CheckerError::InvalidConfigValueError { .. })
        ));
    }
}
