//! Package name normalization
//!
//! Vercel rejects project names that are not lowercase alphanumerics joined by
//! single hyphens. The fixer maps any `package.json` name onto that shape.

use std::sync::LazyLock;

use regex::Regex;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("valid regex"));
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));
static VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex"));

/// Name used when nothing usable survives normalization.
pub const FALLBACK_NAME: &str = "app";

/// Whether `name` is accepted as-is.
pub fn is_valid_package_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}

/// Normalize `name` into a valid project name. Idempotent.
pub fn fix_package_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace('_', "-");
    let replaced = INVALID_CHARS.replace_all(&lowered, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&replaced, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscores_become_hyphens() {
        assert_eq!(fix_package_name("my_cool_app"), "my-cool-app");
    }

    #[test]
    fn uppercase_is_lowered() {
        assert_eq!(fix_package_name("MyApp"), "myapp");
    }

    #[test]
    fn hyphen_runs_collapse() {
        assert_eq!(fix_package_name("a---b__c"), "a-b-c");
    }

    #[test]
    fn scoped_names_are_flattened() {
        assert_eq!(fix_package_name("@acme/Web App"), "acme-web-app");
    }

    #[test]
    fn leading_and_trailing_hyphens_are_trimmed() {
        assert_eq!(fix_package_name("-_app_-"), "app");
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(fix_package_name("café-bär"), "caf-b-r");
    }

    #[test]
    fn empty_result_uses_fallback() {
        assert_eq!(fix_package_name("___"), FALLBACK_NAME);
        assert_eq!(fix_package_name(""), FALLBACK_NAME);
    }

    #[test]
    fn fixed_names_are_valid_and_stable() {
        for input in ["Hello__World", "x", "--a--", "ÄÖÜ", "next.js-site"] {
            let fixed = fix_package_name(input);
            assert!(is_valid_package_name(&fixed), "{input} -> {fixed}");
            assert_eq!(fix_package_name(&fixed), fixed);
        }
    }
}
