//! # Folio
//!
//! A static site generator for a studio marketing and portfolio site: a nav
//! bar with a dark-mode toggle, a hero, services, a featured-projects grid,
//! one tabbed case-study page per project with an image carousel, an about
//! page, and a contact form that posts JSON to a backend.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Load      content/  →  Site     (config, projects, services, about)
//! 2. Generate  Site      →  dist/    (HTML pages, fingerprinted CSS/JS, assets)
//! ```
//!
//! The interactive parts of the site are modelled as plain state machines in
//! Rust and driven in the browser by a small embedded script with the same
//! rules. The models are what the tests exercise:
//!
//! - [`carousel`]: autoplay timer, manual navigation, keyboard control in
//!   fullscreen, and pause while hovered or fullscreen. Time is injected via
//!   [`carousel::Carousel::tick`] so schedules are deterministic.
//! - [`catalog`]: slug lookup and related projects.
//! - [`detail`]: selected slug plus active tab.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Stage 1: reads the content directory into a [`content::Site`] |
//! | [`generate`] | Stage 2: renders the site with Maud |
//! | [`carousel`] | Carousel state machine |
//! | [`catalog`] | Project records, slug resolution, related projects |
//! | [`detail`] | Case-study view state: selected project and tab |
//! | [`theme`] | Light/dark preference owned by the render context |
//! | [`contact`] | Contact message validation and single-attempt submission |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | `NNN-slug` file-name convention and slug validation |
//! | [`types`] | Small shared types (`MediaItem`, `Service`, nav links) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, interpolation is escaped,
//! and there is no template directory to ship.
//!
//! ## Slugs Are the Identity
//!
//! A project is addressed by its slug everywhere: file name, route, lookup.
//! Numeric prefixes on project files (`010-`, `020-`) only order the catalog.
//!
//! ## Stock Content
//!
//! Every piece of content has a built-in fallback, so `folio build` on an empty
//! directory produces a complete demo site. Only the files you add override it.

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod content;
pub mod detail;
pub mod generate;
pub mod naming;
pub mod output;
pub mod theme;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
