//! Environment variable expansion for configuration strings.
//!
//! Only the braced forms are expanded:
//! - `${VAR}` - value of VAR, error if unset
//! - `${VAR:-default}` - value of VAR if set, otherwise `default`
//!
//! A bare `$VAR` is left as written.

use crate::ConfigError;

/// Unset variable reported by the lookup callback.
struct UnsetVar(String);

/// Expand `${...}` references in a configuration value.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    };

    shellexpand::env_with_context(value, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_records_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_RECORDS_DIR", "/srv/content");
        }
        let result = expand_env("${DOCNAV_TEST_RECORDS_DIR}/pages.json", "records.path").unwrap();
        assert_eq!(result, "/srv/content/pages.json");
        unsafe {
            std::env::remove_var("DOCNAV_TEST_RECORDS_DIR");
        }
    }

    #[test]
    fn test_expand_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_TEST_UNSET_BUCKET");
        }
        let result = expand_env("${DOCNAV_TEST_UNSET_BUCKET:-orm}", "records.bucket").unwrap();
        assert_eq!(result, "orm");
    }

    #[test]
    fn test_expand_value_preferred_over_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_BUCKET", "platform");
        }
        let result = expand_env("${DOCNAV_TEST_BUCKET:-orm}", "records.bucket").unwrap();
        assert_eq!(result, "platform");
        unsafe {
            std::env::remove_var("DOCNAV_TEST_BUCKET");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_TEST_MISSING");
        }
        let err = expand_env("${DOCNAV_TEST_MISSING}", "collapse.state_file").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCNAV_TEST_MISSING"));
        assert!(err.to_string().contains("collapse.state_file"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("pages-$VARIANT.json", "records.path").unwrap();
        assert_eq!(result, "pages-$VARIANT.json");
    }
}
