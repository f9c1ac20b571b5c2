//! Environment variable interpolation for config files.
//!
//! Supported syntax:
//! - `$VAR` / `${VAR}` - substitute the variable's value, error if unset
//! - `${VAR:-default}` - fall back to `default` if VAR is unset or empty
//! - `$$` - literal `$`

use regex::{Captures, Regex};
use std::env;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \$\$                                 # literal-dollar escape
        |
        \$\{(?P<braced>[A-Za-z_][A-Za-z0-9_]*)
            (?::-(?P<default>[^}]*))?        # optional ${VAR:-default}
        \}
        |
        \$(?P<bare>[A-Za-z_][A-Za-z0-9_]*)
        ",
    )
    .expect("Invalid interpolation pattern")
});

/// Result of environment variable interpolation.
#[derive(Debug)]
pub struct InterpolationResult {
    /// The interpolated text.
    pub text: String,
    /// Any errors encountered during interpolation.
    pub errors: Vec<String>,
}

impl InterpolationResult {
    /// Returns true if there were no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Interpolate environment variables in the given text.
///
/// Errors are accumulated rather than returned on first failure, so a config
/// with several missing variables reports all of them in one pass.
pub fn interpolate(input: &str) -> InterpolationResult {
    let mut errors = Vec::new();

    let text = ENV_VAR_PATTERN
        .replace_all(input, |caps: &Captures| {
            resolve(caps, &mut errors)
        })
        .to_string();

    InterpolationResult { text, errors }
}

fn resolve(caps: &Captures, errors: &mut Vec<String>) -> String {
    let full_match = &caps[0];
    if full_match == "$$" {
        return "$".to_string();
    }

    let name = caps
        .name("braced")
        .or_else(|| caps.name("bare"))
        .map(|m| m.as_str())
        .unwrap_or_default();
    let default = caps.name("default").map(|m| m.as_str());

    match env::var(name) {
        Ok(value) if value.contains('\n') || value.contains('\r') => {
            // A newline in the substituted value would restructure the YAML
            errors.push(format!(
                "environment variable '{name}' contains newlines, which is not allowed"
            ));
            full_match.to_string()
        }
        Ok(value) if value.is_empty() && default.is_some() => default.unwrap().to_string(),
        Ok(value) => value,
        Err(_) => match default {
            Some(fallback) => fallback.to_string(),
            None => {
                errors.push(format!("environment variable '{name}' is not set"));
                full_match.to_string()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let originals: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var(k).ok())).collect();

        // SAFETY: test variables use unique FIRN_TEST_ prefixes and are
        // restored before returning
        for (key, value) in vars {
            match value {
                Some(v) => unsafe { env::set_var(key, v) },
                None => unsafe { env::remove_var(key) },
            }
        }

        let result = f();

        for (key, original) in originals {
            match original {
                Some(v) => unsafe { env::set_var(key, v) },
                None => unsafe { env::remove_var(key) },
            }
        }

        result
    }

    #[test]
    fn test_bare_substitution() {
        with_env_vars(&[("FIRN_TEST_BARE", Some("hello"))], || {
            let result = interpolate("value: $FIRN_TEST_BARE");
            assert!(result.is_ok());
            assert_eq!(result.text, "value: hello");
        });
    }

    #[test]
    fn test_braced_substitution() {
        with_env_vars(&[("FIRN_TEST_BRACED", Some("world"))], || {
            let result = interpolate("value: ${FIRN_TEST_BRACED}");
            assert!(result.is_ok());
            assert_eq!(result.text, "value: world");
        });
    }

    #[test]
    fn test_missing_variable_error() {
        with_env_vars(&[("FIRN_TEST_MISSING", None)], || {
            let result = interpolate("value: $FIRN_TEST_MISSING");
            assert!(!result.is_ok());
            assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0].contains("FIRN_TEST_MISSING"));
            assert!(result.errors[0].contains("not set"));
        });
    }

    #[test]
    fn test_default_when_unset() {
        with_env_vars(&[("FIRN_TEST_UNSET", None)], || {
            let result = interpolate("value: ${FIRN_TEST_UNSET:-fallback}");
            assert!(result.is_ok());
            assert_eq!(result.text, "value: fallback");
        });
    }

    #[test]
    fn test_default_when_empty() {
        with_env_vars(&[("FIRN_TEST_EMPTY", Some(""))], || {
            let result = interpolate("value: ${FIRN_TEST_EMPTY:-fallback}");
            assert!(result.is_ok());
            assert_eq!(result.text, "value: fallback");
        });
    }

    #[test]
    fn test_set_variable_beats_default() {
        with_env_vars(&[("FIRN_TEST_SET", Some("actual"))], || {
            let result = interpolate("value: ${FIRN_TEST_SET:-fallback}");
            assert!(result.is_ok());
            assert_eq!(result.text, "value: actual");
        });
    }

    #[test]
    fn test_escape_sequence() {
        let result = interpolate("price: $$100");
        assert!(result.is_ok());
        assert_eq!(result.text, "price: $100");
    }

    #[test]
    fn test_newline_injection_blocked() {
        with_env_vars(&[("FIRN_TEST_INJECT", Some("line1\nline2"))], || {
            let result = interpolate("value: $FIRN_TEST_INJECT");
            assert!(!result.is_ok());
            assert!(result.errors[0].contains("newlines"));
        });
    }

    #[test]
    fn test_no_interpolation_needed() {
        let result = interpolate("plain text without variables");
        assert!(result.is_ok());
        assert_eq!(result.text, "plain text without variables");
    }

    #[test]
    fn test_yaml_config_example() {
        with_env_vars(
            &[
                ("FIRN_TEST_DATA_ROOT", Some("/srv/logs")),
                ("FIRN_TEST_OUT_ROOT", None),
            ],
            || {
                let yaml = r#"
source:
  path: ${FIRN_TEST_DATA_ROOT}/raw/nginx_access.log
sink:
  output_root: ${FIRN_TEST_OUT_ROOT:-/srv/logs/processed}
"#;
                let result = interpolate(yaml);
                assert!(result.is_ok());
                assert!(result.text.contains("/srv/logs/raw/nginx_access.log"));
                assert!(result.text.contains("output_root: /srv/logs/processed"));
            },
        );
    }
}
