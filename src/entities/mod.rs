use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An article under curation. `url` is the unique identity; everything else
/// is derived by the enrichment pipeline. An empty `summary` means "no
/// summary" — there is no separate not-yet-attempted state.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub url: String,
    pub title: Option<String>,
    pub summary: String,
    pub translated_summary: String,
    /// None means unknown/not computed, never zero.
    pub reading_time_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A topical category. Names come from a fixed vocabulary; the slug is
/// derived from the name and must stay unique alongside it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Derive a URL-friendly slug from a category name: lowercase, with runs of
/// non-alphanumeric characters collapsed into single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            // Lowercasing can expand to several chars (e.g. combining
            // marks); keep only the alphanumeric ones.
            for lower in ch.to_lowercase().filter(|c| c.is_alphanumeric()) {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Web Development"), "web-development");
        assert_eq!(slugify("Large Language Models"), "large-language-models");
        assert_eq!(slugify("MLOps"), "mlops");
        assert_eq!(slugify("Other"), "other");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("AI — General"), "ai-general");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("C++ / Rust"), "c-rust");
    }

    #[test]
    fn slugify_empty_and_symbolic() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    proptest! {
        #[test]
        fn slugify_output_is_well_formed(name in ".{0,64}") {
            let slug = slugify(&name);
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
            prop_assert!(slug.chars().all(|c| c == '-' || (c.is_alphanumeric() && !c.is_uppercase())));
            // Deterministic.
            prop_assert_eq!(slug.clone(), slugify(&name));
        }
    }
}
