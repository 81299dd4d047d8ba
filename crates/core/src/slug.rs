//! URL-safe slug derivation from display names.
//!
//! Slugs identify brands, categories, and products in storefront URLs.
//! Derivation is deterministic: the same name against the same set of
//! existing slugs always yields the same result. Uniqueness here is
//! best-effort only; the database's unique index is the enforcement point.

use thiserror::Error;

/// Error deriving a slug from a display name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    /// The name contains no slug-safe characters (e.g. all emoji).
    #[error("name {0:?} does not contain any URL-safe characters")]
    Empty(String),
}

/// Lowercase a display name and strip it to a URL-safe slug.
///
/// Runs of non-alphanumeric characters collapse to a single hyphen;
/// leading and trailing hyphens are trimmed. Idempotent: slugifying an
/// already-valid slug returns it unchanged. May return an empty string
/// for names with no ASCII-alphanumeric content; use [`derive_slug`] to
/// surface that as an error.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derive a unique slug for `name` against the set of slugs already taken.
///
/// If the base slug is free it is used as-is; otherwise `-1`, `-2`, ... is
/// appended, incrementing until an unused slug is found.
///
/// `taken` is a predicate over candidate slugs, typically backed by the
/// current slug column of the collection.
///
/// # Errors
///
/// Returns [`SlugError::Empty`] if `name` strips to an empty slug.
pub fn derive_slug<F>(name: &str, taken: F) -> Result<String, SlugError>
where
    F: Fn(&str) -> bool,
{
    let base = slugify(name);
    if base.is_empty() {
        return Err(SlugError::Empty(name.to_owned()));
    }

    if !taken(&base) {
        return Ok(base);
    }

    let mut suffix = 1u32;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken(&candidate) {
            return Ok(candidate);
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Nike"), "nike");
        assert_eq!(slugify("Nike Air"), "nike-air");
        assert_eq!(slugify("Levi's 501"), "levi-s-501");
        assert_eq!(slugify("  Home & Garden  "), "home-garden");
    }

    #[test]
    fn test_slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("a---b"), "a-b");
        assert_eq!(slugify("--edge--"), "edge");
        assert_eq!(slugify("a!!@#b"), "a-b");
    }

    #[test]
    fn test_slugify_idempotent() {
        for name in ["Nike Air Max 90", "Café au Lait", "a---b", "UPPER"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_slugify_empty_results() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("🎉🎉🎉"), "");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_derive_slug_no_collision() {
        let taken: HashSet<String> = HashSet::new();
        let slug = derive_slug("Nike", |s| taken.contains(s)).expect("slug");
        assert_eq!(slug, "nike");
    }

    #[test]
    fn test_derive_slug_suffix_sequence() {
        // Simulate repeated creates with the same name: each new slug joins
        // the taken set, and the sequence must be gapless with no reuse.
        let mut taken: HashSet<String> = HashSet::new();
        let mut produced = Vec::new();
        for _ in 0..4 {
            let slug = derive_slug("Nike", |s| taken.contains(s)).expect("slug");
            taken.insert(slug.clone());
            produced.push(slug);
        }
        assert_eq!(produced, ["nike", "nike-1", "nike-2", "nike-3"]);
    }

    #[test]
    fn test_derive_slug_skips_taken_suffixes() {
        let taken: HashSet<String> =
            ["nike", "nike-1", "nike-3"].iter().map(|s| (*s).to_owned()).collect();
        let slug = derive_slug("Nike", |s| taken.contains(s)).expect("slug");
        assert_eq!(slug, "nike-2");
    }

    #[test]
    fn test_derive_slug_empty_is_error() {
        let err = derive_slug("🎉", |_| false).expect_err("should fail");
        assert_eq!(err, SlugError::Empty("🎉".to_owned()));
    }

    #[test]
    fn test_derive_slug_deterministic() {
        let taken: HashSet<String> = ["shoes"].iter().map(|s| (*s).to_owned()).collect();
        let a = derive_slug("Shoes", |s| taken.contains(s)).expect("slug");
        let b = derive_slug("Shoes", |s| taken.contains(s)).expect("slug");
        assert_eq!(a, b);
        assert_eq!(a, "shoes-1");
    }
}
