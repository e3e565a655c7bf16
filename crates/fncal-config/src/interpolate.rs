//! Environment-variable interpolation over a parsed settings tree.
//!
//! Expansion follows shell conventions: `$VAR` and `${VAR}` are replaced with
//! the variable's current value, and references to unset variables are left
//! as literal text rather than erroring out.

use std::env;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_yaml::Value;

/// Matches `$NAME` or `${NAME}` where NAME is a valid variable identifier.
static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("invalid env reference pattern")
});

/// Returns a copy of `value` with environment references in every string leaf
/// expanded. Mappings recurse into their values, sequences into their
/// elements; non-string leaves pass through unchanged. The input is not
/// mutated.
///
/// Interpolation is idempotent as long as the referenced variables are stable
/// (expanded values are not re-scanned on a second pass unless they themselves
/// contain references).
pub fn interpolate(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), interpolate(v)))
                .collect(),
        ),
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(interpolate).collect()),
        Value::String(s) => Value::String(expand(s)),
        other => other.clone(),
    }
}

/// Expands env references in a single string, leaving unresolved ones intact.
fn expand(input: &str) -> String {
    ENV_REF
        .replace_all(input, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match env::var(name) {
                Ok(val) => val,
                // Unset variable: keep the reference as written.
                Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn expands_braced_and_bare_references() {
        unsafe {
            env::set_var("_FNCAL_TEST_HOST", "calendar.example.com");
        }

        assert_eq!(expand("${_FNCAL_TEST_HOST}"), "calendar.example.com");
        assert_eq!(expand("$_FNCAL_TEST_HOST"), "calendar.example.com");
        assert_eq!(
            expand("https://${_FNCAL_TEST_HOST}/v3"),
            "https://calendar.example.com/v3"
        );

        unsafe {
            env::remove_var("_FNCAL_TEST_HOST");
        }
    }

    #[test]
    fn unresolved_reference_stays_literal() {
        unsafe {
            env::remove_var("_FNCAL_TEST_UNSET");
        }
        assert_eq!(expand("${_FNCAL_TEST_UNSET}"), "${_FNCAL_TEST_UNSET}");
        assert_eq!(expand("$_FNCAL_TEST_UNSET"), "$_FNCAL_TEST_UNSET");
    }

    #[test]
    fn plain_strings_pass_through() {
        assert_eq!(expand("no references here"), "no references here");
        assert_eq!(expand("cost: $100"), "cost: $100");
    }

    #[test]
    fn recurses_into_mappings_and_sequences() {
        unsafe {
            env::set_var("_FNCAL_TEST_ID", "primary");
        }

        let tree = yaml(
            r#"
tools:
  cal:
    default:
      calendar_id: ${_FNCAL_TEST_ID}
    aliases:
      - ${_FNCAL_TEST_ID}
      - work
"#,
        );
        let expanded = interpolate(&tree);

        let expected = yaml(
            r#"
tools:
  cal:
    default:
      calendar_id: primary
    aliases:
      - primary
      - work
"#,
        );
        assert_eq!(expanded, expected);

        unsafe {
            env::remove_var("_FNCAL_TEST_ID");
        }
    }

    #[test]
    fn non_string_leaves_are_untouched() {
        let tree = yaml("{count: 3, ratio: 1.5, enabled: true, nothing: null}");
        assert_eq!(interpolate(&tree), tree);
    }

    #[test]
    fn interpolation_is_idempotent() {
        unsafe {
            env::set_var("_FNCAL_TEST_IDEM", "stable-value");
        }

        let tree = yaml("{a: '${_FNCAL_TEST_IDEM}', b: '$_FNCAL_TEST_MISSING', c: 7}");
        let once = interpolate(&tree);
        let twice = interpolate(&once);
        assert_eq!(once, twice);

        unsafe {
            env::remove_var("_FNCAL_TEST_IDEM");
        }
    }

    #[test]
    fn input_tree_is_not_mutated() {
        unsafe {
            env::set_var("_FNCAL_TEST_MUT", "expanded");
        }

        let tree = yaml("{key: '${_FNCAL_TEST_MUT}'}");
        let before = tree.clone();
        let _ = interpolate(&tree);
        assert_eq!(tree, before);

        unsafe {
            env::remove_var("_FNCAL_TEST_MUT");
        }
    }
}
