//! Content loading.
//!
//! Stage 1 of the build. Reads a content directory into a [`Site`]: the
//! layered config, the project catalog, the services list, and the about
//! page. Every piece except the config file falls back to stock content when
//! absent, so an empty directory builds a complete demo site.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── services.toml                # [[service]] entries (optional)
//! ├── about.md                     # About page markdown (optional)
//! ├── assets/                      # Copied verbatim to dist/assets/
//! └── projects/                    # One TOML file per case study (optional)
//!     ├── 010-master-with-ai.toml  # Numbered: catalog order by number
//!     ├── 020-code-review-ai.toml
//!     └── freshly-mobile-app.toml  # Unnumbered: after numbered, by name
//! ```
//!
//! ## Validation
//!
//! - Slugs must be unique and URL-safe (the file name supplies the slug
//!   unless the file sets `slug` explicitly)
//! - No two project files may share a number prefix
//! - Unknown keys in any TOML file are rejected

use crate::catalog::{Catalog, CatalogError, ProjectRecord};
use crate::config::{self, SiteConfig};
use crate::naming;
use crate::types::Service;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Content directory does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Duplicate project number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
}

const STOCK_SERVICES: &str = include_str!("../static/services.toml");

const STOCK_ABOUT: &str = "# About / Process\n\n\
We are a small team of engineers and designers focused on building \
high-quality product experiences.\n";

/// Where a piece of site content came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// Read from this file or directory, relative to the content root.
    File(String),
    Stock,
}

/// The about page.
#[derive(Debug, Clone)]
pub struct AboutPage {
    /// First `# heading` in the markdown, or "About".
    pub title: String,
    /// Raw markdown.
    pub body: String,
}

/// A project file and the slug it produced, for inventory output.
#[derive(Debug, Clone)]
pub struct ProjectSource {
    pub slug: String,
    pub filename: String,
}

/// Everything the generator needs.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub catalog: Catalog,
    pub services: Vec<Service>,
    pub about: AboutPage,
    /// `Origin::Stock` for the catalog means no `projects/` directory.
    pub catalog_origin: Origin,
    pub project_sources: Vec<ProjectSource>,
    pub services_origin: Origin,
    pub about_origin: Origin,
    pub config_origin: Origin,
    /// `content/assets` if it exists.
    pub assets_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ServicesFile {
    #[serde(default)]
    service: Vec<Service>,
}

/// Load a content directory.
pub fn load(root: &Path) -> Result<Site, ContentError> {
    if !root.is_dir() {
        return Err(ContentError::MissingRoot(root.to_path_buf()));
    }

    let config = config::load_config(root)?;
    let config_origin = origin_of(root, "config.toml");

    let projects_dir = root.join("projects");
    let (catalog, project_sources, catalog_origin) = if projects_dir.is_dir() {
        let (catalog, sources) = load_projects(&projects_dir)?;
        (catalog, sources, Origin::File("projects/".to_string()))
    } else {
        log::info!("no projects/ directory, using the stock catalog");
        (Catalog::stock(), Vec::new(), Origin::Stock)
    };

    let (services, services_origin) = load_services(root)?;
    let (about, about_origin) = load_about(root)?;

    let assets = root.join("assets");
    let assets_dir = assets.is_dir().then_some(assets);

    log::debug!(
        "loaded {} projects and {} services from {}",
        catalog.len(),
        services.len(),
        root.display()
    );

    Ok(Site {
        config,
        catalog,
        services,
        about,
        catalog_origin,
        project_sources,
        services_origin,
        about_origin,
        config_origin,
        assets_dir,
    })
}

fn origin_of(root: &Path, name: &str) -> Origin {
    if root.join(name).exists() {
        Origin::File(name.to_string())
    } else {
        Origin::Stock
    }
}

/// Read every `*.toml` in `projects/`, ordered by number prefix then name.
fn load_projects(dir: &Path) -> Result<(Catalog, Vec<ProjectSource>), ContentError> {
    let mut files: Vec<(Option<u32>, String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_toml = path.is_file()
            && path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("toml"))
                .unwrap_or(false);
        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if !is_toml || hidden {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed = naming::parse_entry_name(&stem);
        files.push((parsed.number, parsed.slug, path));
    }

    let mut numbers = BTreeSet::new();
    for (number, _, _) in &files {
        if let Some(n) = number {
            if !numbers.insert(*n) {
                return Err(ContentError::DuplicateNumber(*n, dir.to_path_buf()));
            }
        }
    }

    files.sort_by(|a, b| {
        (a.0.unwrap_or(u32::MAX), &a.1).cmp(&(b.0.unwrap_or(u32::MAX), &b.1))
    });

    let mut records = Vec::with_capacity(files.len());
    let mut sources = Vec::with_capacity(files.len());
    for (_, file_slug, path) in &files {
        let content = fs::read_to_string(path)?;
        let mut record: ProjectRecord =
            toml::from_str(&content).map_err(|source| ContentError::Toml {
                path: path.clone(),
                source,
            })?;
        if record.slug.is_empty() {
            record.slug = file_slug.clone();
        }
        if record.title.trim().is_empty() {
            record.title = naming::slug_to_title(&record.slug);
        }
        sources.push(ProjectSource {
            slug: record.slug.clone(),
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        });
        records.push(record);
    }

    Ok((Catalog::new(records)?, sources))
}

fn load_services(root: &Path) -> Result<(Vec<Service>, Origin), ContentError> {
    let path = root.join("services.toml");
    if !path.exists() {
        return Ok((stock_services(), Origin::Stock));
    }
    let content = fs::read_to_string(&path)?;
    let file: ServicesFile = toml::from_str(&content).map_err(|source| ContentError::Toml {
        path: path.clone(),
        source,
    })?;
    Ok((file.service, Origin::File("services.toml".to_string())))
}

/// The four stock services.
pub fn stock_services() -> Vec<Service> {
    let file: ServicesFile = toml::from_str(STOCK_SERVICES).expect("stock services must be valid");
    file.service
}

fn load_about(root: &Path) -> Result<(AboutPage, Origin), ContentError> {
    let path = root.join("about.md");
    if !path.exists() {
        return Ok((about_page(STOCK_ABOUT.to_string()), Origin::Stock));
    }
    let body = fs::read_to_string(&path)?;
    Ok((about_page(body), Origin::File("about.md".to_string())))
}

fn about_page(body: String) -> AboutPage {
    let title = body
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .unwrap_or_else(|| "About".to_string());
    AboutPage { title, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn empty_directory_builds_stock_site() {
        let tmp = TempDir::new().unwrap();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.catalog.len(), 4);
        assert_eq!(site.catalog_origin, Origin::Stock);
        assert_eq!(site.services.len(), 4);
        assert_eq!(site.services_origin, Origin::Stock);
        assert_eq!(site.about.title, "About / Process");
        assert_eq!(site.config_origin, Origin::Stock);
        assert!(site.assets_dir.is_none());
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ContentError::MissingRoot(_))));
    }

    #[test]
    fn projects_ordered_by_number_then_name() {
        let tmp = setup_content();
        let site = load(tmp.path()).unwrap();
        assert_eq!(
            site.catalog.slugs(),
            vec!["northwind-crm", "atlas-maps", "beacon-ops", "zephyr-api"]
        );
    }

    #[test]
    fn slug_comes_from_file_name_unless_set() {
        let tmp = setup_content();
        let site = load(tmp.path()).unwrap();
        let source = site
            .project_sources
            .iter()
            .find(|s| s.slug == "atlas-maps")
            .unwrap();
        assert_eq!(source.filename, "020-atlas.toml");
        assert_eq!(find_project(&site, "northwind-crm").title, "Northwind CRM");
    }

    #[test]
    fn missing_title_falls_back_to_slug() {
        let tmp = setup_content();
        write_project(
            tmp.path(),
            "040-quarry-insights.toml",
            "summary = \"Reporting\"\nhero_image = \"/assets/q.png\"\n",
        );
        let site = load(tmp.path()).unwrap();
        assert_eq!(find_project(&site, "quarry-insights").title, "Quarry Insights");
    }

    #[test]
    fn project_fields_are_loaded() {
        let tmp = setup_content();
        let site = load(tmp.path()).unwrap();
        let project = find_project(&site, "northwind-crm");
        assert_eq!(project.images.len(), 3);
        assert_eq!(project.metric.as_ref().unwrap().value, "2x");
        assert_eq!(project.client.as_deref(), Some("Northwind"));
    }

    #[test]
    fn duplicate_number_rejected() {
        let tmp = setup_content();
        write_project(tmp.path(), "010-other.toml", &minimal_project_toml("Other"));
        let result = load(tmp.path());
        assert!(matches!(result, Err(ContentError::DuplicateNumber(10, _))));
    }

    #[test]
    fn duplicate_slug_rejected() {
        let tmp = setup_content();
        write_project(
            tmp.path(),
            "040-copy.toml",
            &format!("slug = \"zephyr-api\"\n{}", minimal_project_toml("Copy")),
        );
        let result = load(tmp.path());
        assert!(matches!(
            result,
            Err(ContentError::Catalog(CatalogError::DuplicateSlug(_)))
        ));
    }

    #[test]
    fn invalid_slug_from_file_name_rejected() {
        let tmp = TempDir::new().unwrap();
        write_project(tmp.path(), "010-Bad_Name.toml", &minimal_project_toml("Bad"));
        let result = load(tmp.path());
        assert!(matches!(
            result,
            Err(ContentError::Catalog(CatalogError::InvalidSlug(_)))
        ));
    }

    #[test]
    fn bad_project_toml_names_the_file() {
        let tmp = TempDir::new().unwrap();
        write_project(tmp.path(), "010-broken.toml", "title = ");
        let err = load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("010-broken.toml"));
    }

    #[test]
    fn empty_projects_directory_means_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("projects")).unwrap();
        let site = load(tmp.path()).unwrap();
        assert!(site.catalog.is_empty());
        assert_eq!(site.catalog_origin, Origin::File("projects/".to_string()));
    }

    #[test]
    fn non_toml_files_in_projects_are_ignored() {
        let tmp = setup_content();
        fs::write(tmp.path().join("projects/notes.md"), "scratch").unwrap();
        fs::write(tmp.path().join("projects/.draft.toml"), "garbage =").unwrap();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.catalog.len(), 4);
    }

    #[test]
    fn services_file_overrides_stock() {
        let tmp = setup_content();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.services_origin, Origin::File("services.toml".to_string()));
        let titles: Vec<&str> = site.services.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Product Design", "Platform Engineering"]);
    }

    #[test]
    fn about_title_from_heading() {
        let tmp = setup_content();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.about.title, "Who we are");
        assert!(site.about.body.contains("**small**"));
    }

    #[test]
    fn about_without_heading_uses_default_title() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("about.md"), "Just text.").unwrap();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.about.title, "About");
    }

    #[test]
    fn config_is_layered() {
        let tmp = setup_content();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.config.site.name, "Northwind Labs");
        assert_eq!(site.config.carousel.interval_ms, 4000);
        assert_eq!(site.config.contact.endpoint, "/api/contact");
    }

    #[test]
    fn assets_dir_detected() {
        let tmp = setup_content();
        let site = load(tmp.path()).unwrap();
        assert_eq!(site.assets_dir.as_deref(), Some(tmp.path().join("assets").as_path()));
    }

    #[test]
    fn stock_services_parse() {
        let ids: Vec<String> = stock_services().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["web", "app", "review", "devops"]);
    }
}
