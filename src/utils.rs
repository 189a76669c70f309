//! Shared helpers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derives a URL slug from a display name: lowercase, runs of anything
/// non-alphanumeric collapsed to a single hyphen, no leading/trailing
/// hyphens. May return an empty string for symbol-only input; callers
/// decide whether that is an error.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slugs() {
        assert_eq!(slugify("Vitamin C 500mg!"), "vitamin-c-500mg");
        assert_eq!(slugify("Pain & Fever Relief"), "pain-fever-relief");
        assert_eq!(slugify("  Déjà  Vu  "), "d-j-vu");
    }

    #[test]
    fn symbol_only_input_yields_empty_slug() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }
}
