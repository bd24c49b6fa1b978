//! URL-safe identifier assignment with collision retry.

use rand::Rng as _;

/// Slugs are truncated to this length before any uniqueness suffix.
pub const MAX_SLUG_LEN: usize = 100;

/// How many candidates to try before accepting a possible collision.
/// Exhausting this with random suffixes is astronomically unlikely at any
/// realistic article count; treat it as a known limit, not a failure mode.
pub const MAX_SLUG_ATTEMPTS: usize = 5;

/// Derive a unique slug for a title, probing `exists` for collisions and
/// retrying with a short random suffix. Always returns a non-empty slug:
/// after [`MAX_SLUG_ATTEMPTS`] the last candidate is accepted as-is.
pub fn assign_unique_slug<F>(title: &str, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base: String = slug::slugify(title).chars().take(MAX_SLUG_LEN).collect();
    let base = if base.is_empty() { "untitled".to_string() } else { base };

    let mut rng = rand::rng();
    let mut candidate = base.clone();
    for _ in 0..MAX_SLUG_ATTEMPTS {
        if !exists(&candidate) {
            return candidate;
        }
        candidate = format!("{}-{}", base, rng.random_range(100..10_000));
    }

    log::warn!("slug retry budget exhausted for '{}', accepting '{}'", title, candidate);
    candidate
}
