//! Case-study detail view state.
//!
//! A [`DetailView`] tracks which project is selected and which content tab is
//! active. Selecting a new slug always re-resolves it against the catalog and
//! snaps back to the overview tab.

use crate::catalog::{Catalog, CatalogError, ProjectRecord};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    #[error("Unknown tab '{0}' (expected overview, features, results or gallery)")]
    InvalidTab(String),
}

/// Content panels on the detail page. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Overview,
    Features,
    Results,
    Gallery,
}

impl Tab {
    /// Display order of the tab bar.
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Features, Tab::Results, Tab::Gallery];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Features => "features",
            Tab::Results => "results",
            Tab::Gallery => "gallery",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Features => "Features",
            Tab::Results => "Results",
            Tab::Gallery => "Gallery",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = DetailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| DetailError::InvalidTab(s.to_string()))
    }
}

/// Outcome of resolving the selected slug.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a ProjectRecord),
    NotFound,
}

/// Selected project plus active tab, over a borrowed catalog.
#[derive(Debug)]
pub struct DetailView<'a> {
    catalog: &'a Catalog,
    selected_slug: String,
    active_tab: Tab,
    resolution: Resolution<'a>,
}

impl<'a> DetailView<'a> {
    /// Open the detail view on `slug`.
    pub fn open(catalog: &'a Catalog, slug: &str) -> Self {
        let mut view = Self {
            catalog,
            selected_slug: String::new(),
            active_tab: Tab::Overview,
            resolution: Resolution::NotFound,
        };
        // The result is kept in `resolution`; callers branch on that.
        let _ = view.on_slug_change(slug);
        view
    }

    pub fn selected_slug(&self) -> &str {
        &self.selected_slug
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn resolution(&self) -> Resolution<'a> {
        self.resolution
    }

    pub fn record(&self) -> Option<&'a ProjectRecord> {
        match self.resolution {
            Resolution::Found(record) => Some(record),
            Resolution::NotFound => None,
        }
    }

    /// Navigate to another project. The active tab resets to overview.
    pub fn on_slug_change(&mut self, slug: &str) -> Result<&'a ProjectRecord, CatalogError> {
        self.selected_slug = slug.to_string();
        self.active_tab = Tab::Overview;
        match self.catalog.find_by_slug(slug) {
            Ok(record) => {
                self.resolution = Resolution::Found(record);
                Ok(record)
            }
            Err(err) => {
                log::info!("case study '{slug}' not found");
                self.resolution = Resolution::NotFound;
                Err(err)
            }
        }
    }

    /// Switch tabs by id. Unknown ids are logged and leave the tab unchanged.
    pub fn select_tab(&mut self, tab_id: &str) -> Result<Tab, DetailError> {
        match tab_id.parse::<Tab>() {
            Ok(tab) => {
                self.active_tab = tab;
                Ok(tab)
            }
            Err(err) => {
                log::warn!("{err}; keeping '{}'", self.active_tab);
                Err(err)
            }
        }
    }
}
