//! HTML site generation.
//!
//! Stage 2 of the build. Takes a loaded [`Site`] and writes the final static
//! site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): nav, hero, services, featured projects, footer
//! - **Case studies** (`/case-studies/{slug}/index.html`): tabbed detail view
//!   with an image carousel, related projects, and a call to action
//! - **Not found** (`/404.html`): shown for unknown case-study slugs
//! - **About** (`/about/index.html`): markdown converted to HTML
//! - **Contact** (`/contact/index.html`): form posting JSON to the endpoint
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── site.3f9a0c12be.css        # Fingerprinted stylesheet
//! ├── site.81d44e07aa.js         # Fingerprinted script
//! ├── about/index.html
//! ├── contact/index.html
//! ├── case-studies/
//! │   ├── master-with-ai/index.html
//! │   └── ...
//! └── assets/                    # content/assets copied verbatim
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Theme toggle, tabs, carousel, and contact form
//!
//! Each is written once under a name carrying the first 10 hex chars of its
//! SHA-256, so deploys never serve a stale copy.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Case-study
//! pages are independent and rendered in parallel with rayon.

use crate::carousel::{Carousel, CarouselOptions};
use crate::catalog::{self, ProjectRecord};
use crate::config;
use crate::contact::SubmissionStatus;
use crate::content::Site;
use crate::detail::{DetailView, Resolution, Tab};
use crate::theme::ThemeStore;
use crate::types::NAV_LINKS;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset copy error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Shared, read-only state handed to every page renderer.
pub struct SiteContext<'a> {
    pub site: &'a Site,
    pub theme: ThemeStore,
    css_href: String,
    js_href: String,
}

impl<'a> SiteContext<'a> {
    pub fn new(site: &'a Site, css_href: String, js_href: String) -> Self {
        Self {
            site,
            theme: ThemeStore::new(site.config.theme.default),
            css_href,
            js_href,
        }
    }
}

/// What a build wrote, for the CLI inventory.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Page paths relative to the output directory, in write order.
    pub pages: Vec<String>,
    pub css_file: String,
    pub js_file: String,
    pub assets_copied: usize,
}

/// First 10 hex chars of the SHA-256 of `content`.
pub fn fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let hex = format!("{:x}", digest);
    hex[..10].to_string()
}

/// The full stylesheet: color variables followed by the base styles.
pub fn site_css(site: &Site) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&site.config.colors),
        CSS_STATIC
    )
}

pub fn generate(site: &Site, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let css = site_css(site);
    let css_file = format!("site.{}.css", fingerprint(css.as_bytes()));
    let js_file = format!("site.{}.js", fingerprint(JS.as_bytes()));
    fs::write(output_dir.join(&css_file), &css)?;
    fs::write(output_dir.join(&js_file), JS)?;

    let ctx = SiteContext::new(site, format!("/{css_file}"), format!("/{js_file}"));
    let mut pages = Vec::new();

    write_page(output_dir, "index.html", render_index(&ctx), &mut pages)?;
    write_page(output_dir, "404.html", render_not_found_page(&ctx), &mut pages)?;
    write_page(output_dir, "about/index.html", render_about_page(&ctx), &mut pages)?;
    write_page(
        output_dir,
        "contact/index.html",
        render_contact_page(&ctx),
        &mut pages,
    )?;

    // Case studies are independent of each other: render and write in parallel,
    // then record them in catalog order.
    let slugs = site.catalog.slugs();
    let written = slugs
        .par_iter()
        .map(|slug| -> Result<String, GenerateError> {
            let rel = format!("case-studies/{slug}/index.html");
            let view = DetailView::open(&site.catalog, slug);
            let path = output_dir.join(&rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, render_case_study(&ctx, &view).into_string())?;
            log::debug!("generated {rel}");
            Ok(rel)
        })
        .collect::<Result<Vec<_>, _>>()?;
    pages.extend(written);

    let assets_copied = match &site.assets_dir {
        Some(src) => copy_assets(src, &output_dir.join("assets"))?,
        None => 0,
    };

    log::info!(
        "site generated at {} ({} pages)",
        output_dir.display(),
        pages.len()
    );

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        css_file,
        js_file,
        assets_copied,
    })
}

fn write_page(
    output_dir: &Path,
    rel: &str,
    markup: Markup,
    pages: &mut Vec<String>,
) -> Result<(), GenerateError> {
    let path = output_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, markup.into_string())?;
    log::debug!("generated {rel}");
    pages.push(rel.to_string());
    Ok(())
}

/// Copy `src` into `dst`, preserving layout. Returns the number of files.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    ctx: &SiteContext,
    title: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    let site = &ctx.site.config.site;
    let full_title = if title == site.name {
        title.to_string()
    } else {
        format!("{title} | {}", site.name)
    };
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(ctx.theme.current().as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(site.description);
                title { (full_title) }
                link rel="stylesheet" href=(ctx.css_href);
            }
            body class=[body_class] {
                (content)
                script src=(ctx.js_href) defer {}
            }
        }
    }
}

/// Renders the top bar: logo, navigation links, and the theme toggle
fn site_header(ctx: &SiteContext, current_href: &str) -> Markup {
    let site = &ctx.site.config.site;
    html! {
        header.site-header {
            div.container {
                a.brand href="/" {
                    @if site.logo_light.is_empty() {
                        (site.name)
                    } @else {
                        img.logo-light src=(site.logo_light) alt=(site.name);
                        @if !site.logo_dark.is_empty() {
                            img.logo-dark src=(site.logo_dark) alt=(site.name);
                        }
                    }
                }
                nav.site-nav {
                    ul {
                        @for link in NAV_LINKS {
                            li class=[(link.href == current_href).then_some("current")] {
                                a href=(link.href) { (link.title) }
                            }
                        }
                        li {
                            button.theme-toggle type="button" aria-label="Toggle dark mode" {
                                (ctx.theme.current().toggle_icon())
                            }
                        }
                    }
                }
            }
        }
    }
}

fn site_footer(ctx: &SiteContext) -> Markup {
    let site = &ctx.site.config.site;
    html! {
        footer.site-footer {
            div.container {
                p { (site.name) " · " (site.footer_note) }
            }
        }
    }
}

/// Card linking to a case study, used on the home grid and under "More work"
fn project_card(record: &ProjectRecord) -> Markup {
    html! {
        a.project-card href=(catalog::route_path(&record.slug)) {
            img src=(record.hero_image.as_str()) alt=(record.title) loading="lazy";
            div.body {
                h3 { (record.title) }
                p.summary { (record.summary) }
                @if let Some(metric) = &record.metric {
                    span.metric-badge { (metric.value) " " (metric.label) }
                }
            }
        }
    }
}

/// Renders a carousel in its initial state.
///
/// The markup carries everything the browser script needs to take over:
/// interval, whether it starts playing, whether it starts visible, and the
/// indexed slides and indicators. A hidden carousel arms no timer until the
/// script is told its panel was shown.
pub fn render_carousel(carousel: &Carousel, alt_prefix: &str) -> Markup {
    if carousel.is_empty() {
        return html! {
            div.carousel-empty { "No images available" }
        };
    }

    let current = carousel.current_index();
    let interval_ms = carousel.options().interval.as_millis().to_string();
    let playing = if carousel.is_playing() { "true" } else { "false" };
    let visible = if carousel.is_visible() { "true" } else { "false" };

    html! {
        div.carousel
            data-carousel="true"
            data-interval=(interval_ms)
            data-autoplay=(playing)
            data-visible=(visible) {
            div.carousel-stage {
                @for (i, item) in carousel.items().iter().enumerate() {
                    img.carousel-slide.active[current == Some(i)]
                        src=(item.as_str())
                        alt={ (alt_prefix) " image " (i + 1) }
                        data-index=(i)
                        loading=[(i > 0).then_some("lazy")];
                }
                @if carousel.shows_controls() {
                    button.carousel-prev type="button" aria-label="Previous image" { "‹" }
                    button.carousel-next type="button" aria-label="Next image" { "›" }
                }
                div.carousel-toolbar {
                    @if let Some(label) = carousel.counter_label() {
                        span.carousel-counter { (label) }
                    }
                    @if carousel.shows_controls() {
                        button.carousel-play type="button" aria-pressed=(playing) {
                            @if carousel.is_playing() { "Pause" } @else { "Play" }
                        }
                    }
                    button.carousel-fullscreen type="button" aria-label="Fullscreen" { "⤢" }
                }
            }
            @if carousel.shows_dots() {
                div.carousel-dots {
                    @for i in 0..carousel.len() {
                        button.carousel-dot.active[current == Some(i)]
                            type="button"
                            data-index=(i)
                            aria-label={ "Go to image " (i + 1) } {}
                    }
                }
            }
            @if carousel.shows_controls() {
                div.carousel-thumbs {
                    @for (i, item) in carousel.items().iter().enumerate() {
                        button.carousel-thumb.active[current == Some(i)] type="button" data-index=(i) {
                            img src=(item.as_str()) alt="" loading="lazy";
                        }
                    }
                }
            }
        }
    }
}

fn bullet_list(items: &[String], empty: &str) -> Markup {
    html! {
        @if items.is_empty() {
            p.muted { (empty) }
        } @else {
            ul {
                @for item in items {
                    li { (item) }
                }
            }
        }
    }
}

fn render_tab_panel(ctx: &SiteContext, record: &ProjectRecord, tab: Tab, shown: bool) -> Markup {
    match tab {
        Tab::Overview => html! {
            @if !record.description.is_empty() {
                p.lead { (record.description) }
            }
            div.two-col {
                div {
                    h3 { "Challenges" }
                    (bullet_list(&record.challenges, "No challenges listed."))
                }
                div {
                    h3 { "Solutions" }
                    (bullet_list(&record.solutions, "No solutions listed."))
                }
            }
            dl.facts {
                @if !record.timeline.is_empty() {
                    dt { "Timeline" }
                    dd { (record.timeline) }
                }
                @if let Some(client) = &record.client {
                    dt { "Client" }
                    dd { (client) }
                }
            }
        },
        Tab::Features => bullet_list(&record.features, "No features listed."),
        Tab::Results => html! {
            @if let Some(metric) = &record.metric {
                p { span.metric-badge { (metric.value) } " " (metric.label) }
            }
            (bullet_list(&record.results, "No results listed."))
            @if let Some(t) = &record.testimonial {
                blockquote.testimonial {
                    p { "“" (t.text) "”" }
                    footer { (t.author) ", " (t.role) }
                }
            }
        },
        Tab::Gallery => {
            let mut carousel = Carousel::new(
                record.images.clone(),
                CarouselOptions::from(&ctx.site.config.carousel),
            );
            carousel.set_visible(shown);
            render_carousel(&carousel, &record.title)
        }
    }
}

fn render_tabs(ctx: &SiteContext, view: &DetailView, record: &ProjectRecord) -> Markup {
    let active = view.active_tab();
    html! {
        div.tabs data-tabs="true" {
            div.tab-bar role="tablist" {
                @for tab in Tab::ALL {
                    button.tab-button.active[tab == active]
                        type="button"
                        role="tab"
                        data-tab=(tab.id())
                        aria-selected=(if tab == active { "true" } else { "false" }) {
                        (tab.label())
                    }
                }
            }
            @for tab in Tab::ALL {
                section.tab-panel
                    id={ "tab-" (tab.id()) }
                    role="tabpanel"
                    data-tab=(tab.id())
                    hidden[tab != active] {
                    (render_tab_panel(ctx, record, tab, tab == active))
                }
            }
        }
    }
}

fn not_found_body() -> Markup {
    html! {
        section.not-found {
            div.container {
                h1 { "Project not found" }
                p { "The case study you are looking for does not exist or has moved." }
                a.button href="/#work" { "Back to work" }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page
fn render_index(ctx: &SiteContext) -> Markup {
    let site = &ctx.site.config.site;
    let content = html! {
        (site_header(ctx, "/"))
        main.home-page {
            section.container.hero {
                div {
                    h1 { (site.tagline) }
                    p { (site.description) }
                    p {
                        a.button href="#work" { "View our work" }
                        " "
                        a href="/contact/" { "Get in touch →" }
                    }
                    @if !site.trusted_by.is_empty() {
                        p.trusted { "Trusted by " (site.trusted_by) }
                    }
                }
                @if !site.hero_image.is_empty() {
                    img src=(site.hero_image) alt=(site.name);
                }
            }
            section.block id="services" {
                div.container {
                    h2 { "What we do" }
                    div.service-grid {
                        @for service in &ctx.site.services {
                            article.service-card id={ "service-" (service.id) } {
                                @if !service.icon.is_empty() {
                                    div.icon { (service.icon) }
                                }
                                h3 { (service.title) }
                                p { (service.description) }
                            }
                        }
                    }
                }
            }
            section.block id="work" {
                div.container {
                    h2 { "Featured work" }
                    @if ctx.site.catalog.is_empty() {
                        p.muted { "No case studies yet." }
                    } @else {
                        div.project-grid {
                            @for record in &ctx.site.catalog {
                                (project_card(record))
                            }
                        }
                    }
                }
            }
        }
        (site_footer(ctx))
    };

    base_document(ctx, &site.name, Some("home"), content)
}

/// Renders a case-study page, or the not-found view when the slug is unknown.
pub fn render_case_study(ctx: &SiteContext, view: &DetailView) -> Markup {
    let record = match view.resolution() {
        Resolution::Found(record) => record,
        Resolution::NotFound => return render_not_found_page(ctx),
    };

    let related = ctx
        .site
        .catalog
        .related_projects(&record.slug, ctx.site.config.projects.related_limit);

    let content = html! {
        (site_header(ctx, "/#work"))
        main.case-study data-slug=(record.slug) {
            header.container.case-header {
                a.back href="/#work" { "← All work" }
                h1 { (record.title) }
                p.summary { (record.summary) }
                @if let Some(metric) = &record.metric {
                    span.metric-badge { (metric.value) " " (metric.label) }
                }
                @if !record.tech.is_empty() {
                    ul.tech-list {
                        @for tech in &record.tech {
                            li { (tech) }
                        }
                    }
                }
            }
            div.container {
                (render_tabs(ctx, view, record))
            }
            @if !related.is_empty() {
                section.block.related {
                    div.container {
                        h2 { "More work" }
                        div.project-grid {
                            @for other in related {
                                (project_card(other))
                            }
                        }
                    }
                }
            }
            section.block.cta {
                div.container {
                    h2 { "Have a project like this?" }
                    a.button href="/contact/" { "Start a conversation" }
                }
            }
        }
        (site_footer(ctx))
    };

    base_document(ctx, &record.title, Some("case-study-page"), content)
}

fn render_not_found_page(ctx: &SiteContext) -> Markup {
    let content = html! {
        (site_header(ctx, ""))
        main { (not_found_body()) }
        (site_footer(ctx))
    };
    base_document(ctx, "Project not found", Some("not-found-page"), content)
}

/// Renders the about page from markdown
fn render_about_page(ctx: &SiteContext) -> Markup {
    let about = &ctx.site.about;

    // Convert markdown to HTML
    let parser = Parser::new(&about.body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    let content = html! {
        (site_header(ctx, "/about/"))
        main.about-page {
            article.container.about-content {
                (PreEscaped(body_html))
            }
        }
        (site_footer(ctx))
    };

    base_document(ctx, &about.title, Some("about-page"), content)
}

/// Renders the contact page with the JSON-posting form
fn render_contact_page(ctx: &SiteContext) -> Markup {
    let contact = &ctx.site.config.contact;
    let content = html! {
        (site_header(ctx, "/contact/"))
        main.container.contact-layout {
            section {
                h1 { "Let's talk" }
                form.contact-form data-endpoint=(contact.endpoint) data-status="idle" {
                    label {
                        "Name"
                        input type="text" name="name" autocomplete="name" required;
                    }
                    label {
                        "Email"
                        input type="email" name="email" autocomplete="email" required;
                    }
                    label {
                        "Message"
                        textarea name="message" rows="6" required {}
                    }
                    button.button type="submit" { "Send message" }
                    p.form-notice aria-live="polite" { (SubmissionStatus::Idle.notice()) }
                }
            }
            aside {
                h2 { "Other ways to reach us" }
                p {
                    a href={ "mailto:" (contact.email) } { (contact.email) }
                }
                @if let Some(whatsapp) = &contact.whatsapp {
                    p {
                        a href=(whatsapp) target="_blank" rel="noopener" { "WhatsApp" }
                    }
                }
                @if !contact.response_note.is_empty() {
                    p.muted { (contact.response_note) }
                }
            }
        }
        (site_footer(ctx))
    };

    base_document(ctx, "Contact", Some("contact-page"), content)
}

// ============================================================================
// Tests
// ============================================================================
