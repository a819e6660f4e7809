//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (project, service, page) is its semantic identity:
//! positional index and title. Files and routes are shown as secondary context
//! on indented lines, so the output reads as a content inventory while still
//! letting users trace data back to specific files.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Projects
//! 001 Master with AI (3 images)
//!     Source: 010-master-with-ai.toml
//!     Route: /case-studies/master-with-ai/
//! 002 Freshly Mobile App (7 images)
//!     Source: stock catalog
//!     Route: /case-studies/freshly-mobile-app/
//!     Metric: +400% monthly orders
//!
//! Services
//! 001 Web Development
//!
//! About
//!     Who we are
//!     Source: about.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Not found → 404.html
//! About → about/index.html
//! Contact → contact/index.html
//!
//! Case studies
//! 001 Master with AI → case-studies/master-with-ai/index.html
//!
//! Assets
//!     site.3f9a0c12be.css
//!     site.81d44e07aa.js
//!     4 files → assets/
//!
//! Generated 8 pages in dist
//! ```
//!
//! ## Show
//!
//! ```text
//! Freshly Mobile App
//!     Route: /case-studies/freshly-mobile-app/
//!     Metric: +400% monthly orders
//!     Tabs: [overview] features results gallery
//!     Carousel: 1 / 7, plays every 5000ms once the gallery is shown
//!
//! Overview
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::carousel::{Carousel, CarouselOptions, CarouselState};
use crate::catalog::{self, ProjectRecord};
use crate::content::{Origin, Site};
use crate::detail::{DetailView, Resolution, Tab};
use crate::generate::GenerateReport;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional image count.
///
/// ```text
/// 001 Master with AI (3 images)
/// 001 Web Development
/// ```
fn entity_header(index: usize, title: &str, images: Option<usize>) -> String {
    match images {
        Some(1) => format!("{} {} (1 image)", format_index(index), title),
        Some(n) => format!("{} {} ({} images)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn source_label(origin: &Origin) -> String {
    match origin {
        Origin::File(name) => name.clone(),
        Origin::Stock => "stock".to_string(),
    }
}

/// Indented bullet lines, or nothing for an empty list.
fn list_lines(label: &str, items: &[String], depth: usize) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("{}{}:", indent(depth), label)];
    for item in items {
        lines.push(format!("{}- {}", indent(depth + 1), item));
    }
    lines
}

// ============================================================================
// check
// ============================================================================

/// Format the content inventory of a loaded site.
pub fn format_content_output(site: &Site) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Projects".to_string());
    if site.catalog.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, record) in site.catalog.iter().enumerate() {
        lines.push(entity_header(i + 1, &record.title, Some(record.images.len())));
        let source = site
            .project_sources
            .iter()
            .find(|s| s.slug == record.slug)
            .map(|s| s.filename.clone())
            .unwrap_or_else(|| "stock catalog".to_string());
        lines.push(format!("    Source: {}", source));
        lines.push(format!("    Route: {}", catalog::route_path(&record.slug)));
        if let Some(metric) = &record.metric {
            lines.push(format!("    Metric: {} {}", metric.value, metric.label));
        }
    }

    lines.push(String::new());
    lines.push(format!("Services ({})", source_label(&site.services_origin)));
    for (i, service) in site.services.iter().enumerate() {
        lines.push(entity_header(i + 1, &service.title, None));
    }

    lines.push(String::new());
    lines.push("About".to_string());
    lines.push(format!("    {}", site.about.title));
    lines.push(format!("    Source: {}", source_label(&site.about_origin)));

    lines.push(String::new());
    lines.push("Config".to_string());
    if let Origin::File(name) = &site.config_origin {
        lines.push(format!("    {}", name));
    }
    if site.assets_dir.is_some() {
        lines.push("    assets/".to_string());
    }

    lines
}

/// Print the content inventory to stdout.
pub fn print_content_output(site: &Site) {
    for line in format_content_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the build inventory: every page written, then assets.
pub fn format_generate_output(site: &Site, report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut case_studies = Vec::new();

    for page in &report.pages {
        let label = match page.as_str() {
            "index.html" => "Home",
            "404.html" => "Not found",
            "about/index.html" => "About",
            "contact/index.html" => "Contact",
            _ => {
                case_studies.push(page);
                continue;
            }
        };
        lines.push(format!("{} → {}", label, page));
    }

    if !case_studies.is_empty() {
        lines.push(String::new());
        lines.push("Case studies".to_string());
        for (i, record) in site.catalog.iter().enumerate() {
            let rel = format!("case-studies/{}/index.html", record.slug);
            if case_studies.iter().any(|p| **p == rel) {
                lines.push(format!("{} {} → {}", format_index(i + 1), record.title, rel));
            }
        }
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("    {}", report.css_file));
    lines.push(format!("    {}", report.js_file));
    if report.assets_copied > 0 {
        lines.push(format!("    {} files → assets/", report.assets_copied));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} pages in {}",
        report.pages.len(),
        report.output_dir.display()
    ));

    lines
}

/// Print the build inventory to stdout.
pub fn print_generate_output(site: &Site, report: &GenerateReport) {
    for line in format_generate_output(site, report) {
        println!("{}", line);
    }
}

// ============================================================================
// show
// ============================================================================

fn carousel_summary(carousel: &Carousel) -> String {
    match (carousel.state(), carousel.counter_label()) {
        (_, None) => "No images available".to_string(),
        (CarouselState::Playing, Some(label)) => format!(
            "{}, playing every {}ms",
            label,
            carousel.options().interval.as_millis()
        ),
        (_, Some(label)) if carousel.is_playing() && !carousel.is_visible() => format!(
            "{}, plays every {}ms once the gallery is shown",
            label,
            carousel.options().interval.as_millis()
        ),
        (_, Some(label)) => format!("{}, paused", label),
    }
}

fn tab_lines(record: &ProjectRecord, tab: Tab) -> Vec<String> {
    let mut lines = Vec::new();
    match tab {
        Tab::Overview => {
            if !record.description.is_empty() {
                lines.push(format!("    {}", truncate_desc(&record.description, 100)));
            }
            if !record.timeline.is_empty() {
                lines.push(format!("    Timeline: {}", record.timeline));
            }
            if let Some(client) = &record.client {
                lines.push(format!("    Client: {}", client));
            }
            if !record.tech.is_empty() {
                let tech: Vec<&str> = record.tech.iter().map(String::as_str).collect();
                lines.push(format!("    Tech: {}", tech.join(", ")));
            }
            lines.extend(list_lines("Challenges", &record.challenges, 1));
            lines.extend(list_lines("Solutions", &record.solutions, 1));
        }
        Tab::Features => lines.extend(list_lines("Features", &record.features, 1)),
        Tab::Results => {
            lines.extend(list_lines("Results", &record.results, 1));
            if let Some(t) = &record.testimonial {
                lines.push(format!("    \"{}\"", truncate_desc(&t.text, 100)));
                lines.push(format!("        {}, {}", t.author, t.role));
            }
        }
        Tab::Gallery => {
            for (i, image) in record.images.iter().enumerate() {
                lines.push(format!("    {} {}", format_index(i + 1), image));
            }
            if record.images.is_empty() {
                lines.push("    No images available".to_string());
            }
        }
    }
    if lines.is_empty() {
        lines.push("    (empty)".to_string());
    }
    lines
}

/// Format a resolved detail view: header, tab bar, and the active tab's content.
pub fn format_detail_output(site: &Site, view: &DetailView) -> Vec<String> {
    let record = match view.resolution() {
        Resolution::Found(record) => record,
        Resolution::NotFound => {
            return vec![
                format!("Project not found: {}", view.selected_slug()),
                "    Back to work: /#work".to_string(),
            ];
        }
    };

    let mut lines = vec![record.title.clone()];
    lines.push(format!("    Route: {}", catalog::route_path(&record.slug)));
    lines.push(format!("    Summary: {}", truncate_desc(&record.summary, 100)));
    if let Some(metric) = &record.metric {
        lines.push(format!("    Metric: {} {}", metric.value, metric.label));
    }

    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|t| {
            if *t == view.active_tab() {
                format!("[{}]", t.id())
            } else {
                t.id().to_string()
            }
        })
        .collect();
    lines.push(format!("    Tabs: {}", tabs.join(" ")));

    let mut carousel = Carousel::new(
        record.images.clone(),
        CarouselOptions::from(&site.config.carousel),
    );
    carousel.set_visible(view.active_tab() == Tab::Gallery);
    lines.push(format!("    Carousel: {}", carousel_summary(&carousel)));

    let related = site
        .catalog
        .related_projects(&record.slug, site.config.projects.related_limit);
    if !related.is_empty() {
        let titles: Vec<&str> = related.iter().map(|r| r.title.as_str()).collect();
        lines.push(format!("    Related: {}", titles.join(", ")));
    }

    lines.push(String::new());
    lines.push(view.active_tab().label().to_string());
    lines.extend(tab_lines(record, view.active_tab()));

    lines
}

/// Print a detail view to stdout.
pub fn print_detail_output(site: &Site, view: &DetailView) {
    for line in format_detail_output(site, view) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
