//! File-name convention for ordered content, and slug validation.
//!
//! Project files follow an optional numeric prefix followed by the slug:
//!
//! - `010-master-with-ai.toml` → number=10, slug=`master-with-ai`
//! - `code-review-ai.toml` → unnumbered, slug=`code-review-ai`
//!
//! The number only orders the catalog (and the featured grid). It never
//! appears in a URL: the slug is the route segment in `/case-studies/{slug}/`.

/// Result of parsing a file stem like `010-master-with-ai`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`10` from `010-master-with-ai`).
    pub number: Option<u32>,
    /// Remainder after the prefix. For unnumbered stems this is the full input.
    pub slug: String,
}

/// Parse a file stem following the `NNN-slug` convention.
///
/// A leading run of digits only counts as a prefix when a dash follows it, so
/// `2024-report` is numbered but `3d-printing` is not.
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-') {
        if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = prefix.parse::<u32>() {
                return ParsedName {
                    number: Some(number),
                    slug: rest.to_string(),
                };
            }
        }
    }
    ParsedName {
        number: None,
        slug: stem.to_string(),
    }
}

/// Whether `slug` is safe to use verbatim as a URL path segment.
///
/// Accepted: lowercase ASCII letters, digits, and single dashes between them.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Title-case a slug for display when no explicit title exists.
///
/// `code-review-ai` → `Code Review Ai`
pub fn slug_to_title(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
