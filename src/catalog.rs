//! Project catalog and slug resolution.
//!
//! The catalog is the ordered, immutable list of case studies the site is
//! built from. It is loaded once (from `content/projects/` or the stock
//! catalog) and never mutated afterwards.
//!
//! Lookups are exact, case-sensitive string matches on the slug. A miss is an
//! ordinary outcome (a stale or mistyped link) and comes back as
//! [`CatalogError::NotFound`] for the page layer to render as a view.
//!
//! ## Record format
//!
//! ```toml
//! slug = "freshly-mobile-app"      # optional in content/projects/ files
//! title = "Freshly Mobile App"
//! summary = "Mobile food-ordering mockups & flows."
//! description = "End-to-end redesign of a food-ordering app."
//! hero_image = "/assets/freshly-1.png"
//! images = ["/assets/freshly-1.png", "/assets/freshly-2.png"]
//! tech = ["React Native", "TypeScript"]
//! timeline = "16 weeks"
//! client = "Freshly"               # optional
//! challenges = ["Confusing order flows."]
//! solutions = ["Redesigned checkout and onboarding."]
//! features = ["UX flows", "Design system"]
//! results = ["Checkout completion +25%"]
//!
//! [metric]                         # optional
//! value = "+400%"
//! label = "monthly orders"
//!
//! [testimonial]                    # optional
//! text = "The new checkout paid for the whole project in a quarter."
//! author = "Daniel R."
//! role = "Head of Product, Freshly"
//! ```

use crate::naming;
use crate::types::MediaItem;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No project with slug '{0}'")]
    NotFound(String),
    #[error("Duplicate project slug: {0}")]
    DuplicateSlug(String),
    #[error("Project slug is not URL-safe: '{0}'")]
    InvalidSlug(String),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Headline number shown as a badge on cards and the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metric {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
    pub role: String,
}

/// One case study.
///
/// Tables (`metric`, `testimonial`) are declared last so the record
/// serializes back to TOML with plain keys before sub-tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectRecord {
    /// URL segment under `/case-studies/`. Filled from the file name when a
    /// content file leaves it out.
    #[serde(default)]
    pub slug: String,
    /// Display title. Content files may omit it; the slug is title-cased.
    #[serde(default)]
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub hero_image: MediaItem,
    #[serde(default)]
    pub images: Vec<MediaItem>,
    #[serde(default)]
    pub tech: BTreeSet<String>,
    #[serde(default)]
    pub timeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub solutions: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub results: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<Testimonial>,
}

/// On-disk shape of a multi-record catalog file (`[[project]]` entries).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    project: Vec<ProjectRecord>,
}

const STOCK_CATALOG: &str = include_str!("../static/projects.toml");

/// Ordered collection of project records with unique slugs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate or non-URL-safe slugs.
    pub fn new(records: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !naming::is_valid_slug(&record.slug) {
                return Err(CatalogError::InvalidSlug(record.slug.clone()));
            }
            if !seen.insert(record.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(record.slug.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Parse a `[[project]]` catalog file.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.project)
    }

    /// The built-in four-project catalog.
    pub fn stock() -> Self {
        Self::from_toml_str(STOCK_CATALOG).expect("stock catalog must be valid")
    }

    /// Exact, case-sensitive lookup.
    pub fn find_by_slug(&self, slug: &str) -> Result<&ProjectRecord, CatalogError> {
        self.records
            .iter()
            .find(|r| r.slug == slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    /// Up to `limit` records other than `exclude_slug`, in catalog order.
    pub fn related_projects(&self, exclude_slug: &str, limit: usize) -> Vec<&ProjectRecord> {
        self.records
            .iter()
            .filter(|r| r.slug != exclude_slug)
            .take(limit)
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.slug.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProjectRecord;
    type IntoIter = std::slice::Iter<'a, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Site-relative URL of a case-study page.
pub fn route_path(slug: &str) -> String {
    format!("/case-studies/{slug}/")
}

/// The stock catalog file, comments included. Used by `gen-catalog`.
pub fn stock_catalog_toml() -> &'static str {
    STOCK_CATALOG
}
