//! Shared types used by the loader, the core components, and the generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference (URL or site-relative path) to a displayable image.
///
/// The site never inspects image bytes; a media item is only ever a path that
/// ends up in an `src` attribute. Serialized as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaItem(String);

impl MediaItem {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaItem {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// An entry in the services section of the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// A link in the top navigation bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
}

/// Links shown in the navigation bar on every page, in display order.
pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        title: "Work",
        href: "/#work",
    },
    NavLink {
        title: "About",
        href: "/about/",
    },
    NavLink {
        title: "Contact",
        href: "/contact/",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_item_serializes_as_plain_string() {
        let item = MediaItem::new("/assets/masterai1.png");
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#""/assets/masterai1.png""#
        );
        let back: MediaItem = serde_json::from_str(r#""/assets/x.png""#).unwrap();
        assert_eq!(back.as_str(), "/assets/x.png");
    }

    #[test]
    fn service_icon_is_optional() {
        let service: Service = toml::from_str(
            r#"
id = "web"
title = "Web Development"
description = "Fast frontends."
"#,
        )
        .unwrap();
        assert_eq!(service.icon, "");
    }

    #[test]
    fn nav_links_cover_main_sections() {
        let hrefs: Vec<&str> = NAV_LINKS.iter().map(|l| l.href).collect();
        assert_eq!(hrefs, vec!["/#work", "/about/", "/contact/"]);
    }
}
