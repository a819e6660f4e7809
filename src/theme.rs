//! Light/dark theme preference.
//!
//! The site-wide theme is owned by one [`ThemeStore`] created at startup and
//! handed to every view through the render context. [`ThemeStore::toggle`] is
//! the only way to change it. In the browser the same contract holds: the
//! script reads the persisted value once at mount and writes it on toggle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `localStorage` key the browser script persists the preference under.
pub const STORAGE_KEY: &str = "folio-theme";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown theme '{0}' (expected light or dark)")]
pub struct UnknownTheme(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon for the toggle button: what clicking switches *to*.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Root-owned holder of the current theme.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    current: Theme,
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip the theme and return the new value.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        log::debug!("theme switched to {}", self.current);
        self.current
    }
}
