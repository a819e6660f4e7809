//! Shared test utilities for the folio test suite.
//!
//! Provides the content fixture plus lookup helpers that work with the
//! loaded [`Site`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_content();
//! let site = content::load(tmp.path()).unwrap();
//!
//! let project = find_project(&site, "northwind-crm");
//! assert_eq!(project.title, "Northwind CRM");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::ProjectRecord;
use crate::content::Site;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `projects/<filename>` under `root`, creating `projects/` if needed.
pub fn write_project(root: &Path, filename: &str, toml: &str) {
    let dir = root.join("projects");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(filename), toml).unwrap();
}

/// The smallest valid project file. No `slug`, so the file name supplies it.
pub fn minimal_project_toml(title: &str) -> String {
    format!(
        "title = \"{title}\"\nsummary = \"Summary of {title}\"\nhero_image = \"/assets/hero.png\"\n"
    )
}

// =========================================================================
// Lookups, panic with a clear message on miss
// =========================================================================

/// Find a project by slug. Panics if not found.
pub fn find_project<'a>(site: &'a Site, slug: &str) -> &'a ProjectRecord {
    site.catalog.find_by_slug(slug).unwrap_or_else(|_| {
        let slugs = site.catalog.slugs();
        panic!("project '{slug}' not found. Available: {slugs:?}")
    })
}
