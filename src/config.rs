//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is layered over stock defaults: user files only need
//! the keys they want to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "HFT Prime Marketing"
//! tagline = "We build product-grade apps and clean code that scales."
//! description = "We design & ship performant web and mobile products..."
//! logo_light = "/assets/hft_prime_logo_lightmode.png"
//! logo_dark = "/assets/hft_prime_logo_darkmode.png"
//! hero_image = "/assets/laptopmockups.png"
//! trusted_by = "10+ startups & teams"
//! footer_note = "Built with ❤️"
//!
//! [carousel]
//! interval_ms = 5000        # Autoplay interval
//! autoplay = true           # Start multi-image carousels playing
//! max_dots = 5              # Dot indicators only up to this many images
//!
//! [projects]
//! related_limit = 3         # "More work" cards on each case study
//!
//! [contact]
//! endpoint = "/api/contact" # Contact form POST target
//! email = "hello@example.com"
//! whatsapp = "https://wa.me/0000000000"   # optional
//! response_note = "We usually respond within 48 hours."
//!
//! [theme]
//! default = "light"         # Initial theme before the visitor toggles
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#0f172a"
//! text_muted = "#64748b"
//! border = "#e2e8f0"
//! link = "#4f46e5"
//! link_hover = "#3730a3"
//! accent = "#6366f1"
//!
//! [colors.dark]
//! background = "#0b1120"
//! text = "#e2e8f0"
//! text_muted = "#94a3b8"
//! border = "#1e293b"
//! link = "#a5b4fc"
//! link_hover = "#c7d2fe"
//! accent = "#818cf8"
//!
//! [processing]
//! max_processes = 4         # Max parallel page renderers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Branding and home-page copy.
    pub site: SiteInfo,
    /// Carousel behaviour on case-study pages.
    pub carousel: CarouselConfig,
    /// Case-study listing settings.
    pub projects: ProjectsConfig,
    /// Contact form target and other channels.
    pub contact: ContactConfig,
    /// Initial theme.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

/// Browsers clamp larger `setInterval` delays to zero.
pub const MAX_INTERVAL_MS: u64 = i32::MAX as u64;

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.carousel.interval_ms == 0 || self.carousel.interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::Validation(format!(
                "carousel.interval_ms must be between 1 and {MAX_INTERVAL_MS}"
            )));
        }
        let endpoint = self.contact.endpoint.as_str();
        if !(endpoint.starts_with('/')
            || endpoint.starts_with("https://")
            || endpoint.starts_with("http://"))
        {
            return Err(ConfigError::Validation(
                "contact.endpoint must be a site path or an http(s) URL".into(),
            ));
        }
        Ok(())
    }
}

/// Branding and home-page copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    /// Hero headline.
    pub tagline: String,
    /// Hero paragraph and `<meta name="description">`.
    pub description: String,
    pub logo_light: String,
    pub logo_dark: String,
    pub hero_image: String,
    /// Social-proof line under the hero buttons. Empty hides it.
    pub trusted_by: String,
    pub footer_note: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "HFT Prime Marketing".to_string(),
            tagline: "We build product-grade apps and clean code that scales.".to_string(),
            description: "We design & ship performant web and mobile products, audits and \
                          growth engineering for startups and enterprises."
                .to_string(),
            logo_light: "/assets/hft_prime_logo_lightmode.png".to_string(),
            logo_dark: "/assets/hft_prime_logo_darkmode.png".to_string(),
            hero_image: "/assets/laptopmockups.png".to_string(),
            trusted_by: "10+ startups & teams".to_string(),
            footer_note: "Built with ❤️".to_string(),
        }
    }
}

/// Carousel behaviour on case-study pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Milliseconds between autoplay advances.
    pub interval_ms: u64,
    /// Whether multi-image carousels start playing.
    pub autoplay: bool,
    /// Dot indicators are rendered only for carousels up to this size.
    pub max_dots: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            autoplay: true,
            max_dots: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectsConfig {
    /// Number of related case studies listed under each detail page.
    pub related_limit: usize,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self { related_limit: 3 }
    }
}

/// Contact form target and other channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// URL the contact form POSTs its JSON body to.
    pub endpoint: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    pub response_note: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/contact".to_string(),
            email: "hello@example.com".to_string(),
            whatsapp: None,
            response_note: "We usually respond within 48 hours.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme rendered into the HTML before the visitor's saved preference loads.
    pub default: Theme,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renderers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (summaries, captions, footer).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Buttons, active tab, current thumbnail.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            link: "#4f46e5".to_string(),
            link_hover: "#3730a3".to_string(),
            accent: "#6366f1".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b1120".to_string(),
            text: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#1e293b".to_string(),
            link: "#a5b4fc".to_string(),
            link_hover: "#c7d2fe".to_string(),
            accent: "#818cf8".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock settings as a TOML table: the bottom layer of every load.
fn stock_layer() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("stock config serializes")
}

/// Lay `upper` over `lower`. Tables combine key by key; any other value in
/// `upper` wins outright, arrays included.
pub fn merge_toml(lower: toml::Value, upper: toml::Value) -> toml::Value {
    match (lower, upper) {
        (toml::Value::Table(mut table), toml::Value::Table(upper)) => {
            for (key, value) in upper {
                let value = match table.remove(&key) {
                    Some(below) => merge_toml(below, value),
                    None => value,
                };
                table.insert(key, value);
            }
            toml::Value::Table(table)
        }
        (_, upper) => upper,
    }
}

/// Settings for a content directory.
///
/// `config.toml`, when present, is layered over the stock settings. The
/// result must deserialize strictly and pass [`SiteConfig::validate`].
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let layered = if path.is_file() {
        let user: toml::Value = toml::from_str(&fs::read_to_string(&path)?)?;
        log::debug!("layering {} over stock config", path.display());
        merge_toml(stock_layer(), user)
    } else {
        stock_layer()
    };
    let config: SiteConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Branding and home-page copy
# ---------------------------------------------------------------------------
[site]
name = "HFT Prime Marketing"
tagline = "We build product-grade apps and clean code that scales."
description = "We design & ship performant web and mobile products, audits and growth engineering for startups and enterprises."
logo_light = "/assets/hft_prime_logo_lightmode.png"
logo_dark = "/assets/hft_prime_logo_darkmode.png"
hero_image = "/assets/laptopmockups.png"
# Social-proof line under the hero buttons. Set to "" to hide.
trusted_by = "10+ startups & teams"
footer_note = "Built with ❤️"

# ---------------------------------------------------------------------------
# Case-study image carousel
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic advances, 1 to 2147483647.
interval_ms = 5000
# Start carousels with more than one image playing.
autoplay = true
# Show dot indicators only for carousels with at most this many images.
max_dots = 5

# ---------------------------------------------------------------------------
# Case studies
# ---------------------------------------------------------------------------
[projects]
# Related case studies listed at the bottom of each detail page.
related_limit = 3

# ---------------------------------------------------------------------------
# Contact
# ---------------------------------------------------------------------------
[contact]
# The contact form POSTs {"name", "email", "message"} as JSON here.
endpoint = "/api/contact"
email = "hello@example.com"
# whatsapp = "https://wa.me/0000000000"
response_note = "We usually respond within 48 hours."

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# "light" or "dark". A visitor's saved choice wins once the page loads.
default = "light"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#0f172a"
text_muted = "#64748b"    # Summaries, captions, footer
border = "#e2e8f0"
link = "#4f46e5"
link_hover = "#3730a3"
accent = "#6366f1"        # Buttons, active tab, current thumbnail

# ---------------------------------------------------------------------------
# Colors - Dark mode
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b1120"
text = "#e2e8f0"
text_muted = "#94a3b8"
border = "#1e293b"
link = "#a5b4fc"
link_hover = "#c7d2fe"
accent = "#818cf8"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renderers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
///
/// Light values sit on `:root`; dark values apply under
/// `[data-theme="dark"]`, which the theme toggle sets on `<html>`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let block = |selector: &str, scheme: &ColorScheme| {
        format!(
            r#"{selector} {{
    --color-bg: {bg};
    --color-text: {text};
    --color-text-muted: {muted};
    --color-border: {border};
    --color-link: {link};
    --color-link-hover: {link_hover};
    --color-accent: {accent};
}}"#,
            bg = scheme.background,
            text = scheme.text,
            muted = scheme.text_muted,
            border = scheme.border,
            link = scheme.link,
            link_hover = scheme.link_hover,
            accent = scheme.accent,
        )
    };
    format!(
        "{}\n\n{}",
        block(":root", &colors.light),
        block(r#":root[data-theme="dark"]"#, &colors.dark)
    )
}
