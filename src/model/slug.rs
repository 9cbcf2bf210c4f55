//! Stable identifier generation.

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// Maximum length of the readable part of a slug.
const STEM_LEN: usize = 13;

/// Length of the random suffix.
const SUFFIX_LEN: usize = 7;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[^a-z0-9]+").expect("slug pattern is a valid regex")
});

/// Readable stem for a display name: lowercase, runs of anything outside
/// `[a-z0-9]` collapsed to `-`, cut to 13 characters.
#[must_use]
pub fn slug_stem(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "-")
        .chars()
        .take(STEM_LEN)
        .collect()
}

/// Generate a slug for `name` that `is_taken` does not reject.
pub fn generate_slug<F>(name: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let stem = slug_stem(name);
    loop {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(SUFFIX_LEN)
            .collect();
        let slug = format!("{stem}-{suffix}");
        if !is_taken(&slug) {
            return slug;
        }
        tracing::debug!(slug = %slug, "slug collision, regenerating");
    }
}
