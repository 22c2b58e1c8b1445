//! Application state and the commands that change it.
//!
//! Everything interactive about the gallery (filters, which sections are
//! expanded, the lightbox, the theme) lives in one [`AppState`] value. The
//! view never mutates state directly; it issues a [`Command`] and gets the
//! next state back:
//!
//! ```text
//! let state = AppState::new(artworks, MatchPolicy::Layered)
//!     .apply_deep_link("#series-sky-studies")
//!     .apply(Command::ToggleFilter("oil".into()))
//!     .apply(Command::OpenLightbox { series: "sky-studies".into(), index: 0 });
//! ```
//!
//! The renderer is a pure function of this value, so every interaction can be
//! exercised in tests without a browser.

use crate::artwork::Artwork;
use crate::filter::{FilterRegistry, MatchPolicy};
use crate::lightbox::Lightbox;
use crate::naming::{parse_fragment, section_anchor};
use crate::series::{SeriesIndex, group_series};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Colour theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// A user action, as issued by the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleFilter(String),
    ClearFilters,
    /// Expand a section and write its anchor to the URL fragment.
    ExpandSeries(String),
    CollapseSeries(String),
    ToggleSeries(String),
    ExpandAll,
    CollapseAll,
    OpenLightbox { series: String, index: usize },
    NextImage,
    PrevImage,
    CloseLightbox,
    /// Reopen the lightbox where it was last closed. The page script has
    /// no control for this; it is part of the library API only.
    ResumeLightbox,
    ToggleTheme,
}

#[derive(Debug, Clone)]
pub struct AppState {
    series: SeriesIndex,
    filters: FilterRegistry,
    expanded: BTreeSet<String>,
    lightbox: Lightbox,
    theme: Theme,
    /// URL fragment to publish (without navigating) after the last command.
    fragment: Option<String>,
    /// Section to scroll into view after a deep link.
    scroll_target: Option<String>,
}

impl AppState {
    pub fn new(artworks: Vec<Artwork>, policy: MatchPolicy) -> Self {
        let filters = FilterRegistry::new(&artworks, policy);
        Self {
            series: group_series(&artworks),
            filters,
            expanded: BTreeSet::new(),
            lightbox: Lightbox::default(),
            theme: Theme::default(),
            fragment: None,
            scroll_target: None,
        }
    }

    pub fn series(&self) -> &SeriesIndex {
        &self.series
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_expanded(&self, slug: &str) -> bool {
        self.expanded.contains(slug)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn scroll_target(&self) -> Option<&str> {
        self.scroll_target.as_deref()
    }

    /// Expand the section named by a URL fragment, once, at load time.
    ///
    /// Only `#series-{slug}` fragments naming a known series have an effect.
    /// The fragment is not rewritten and no other section changes.
    pub fn apply_deep_link(mut self, fragment: &str) -> Self {
        let Some(slug) = parse_fragment(fragment) else {
            return self;
        };
        if self.series.contains(slug) {
            tracing::debug!(slug, "deep link expands series");
            self.expanded.insert(slug.to_string());
            self.scroll_target = Some(slug.to_string());
        }
        self
    }

    /// Apply a command and return the next state.
    pub fn apply(mut self, command: Command) -> Self {
        tracing::debug!(?command, "apply");
        match command {
            Command::ToggleFilter(tag) => self.filters.toggle(&tag),
            Command::ClearFilters => self.filters.clear(),
            Command::ExpandSeries(slug) => {
                if self.series.contains(&slug) {
                    self.fragment = Some(section_anchor(&slug));
                    self.expanded.insert(slug);
                }
            }
            Command::CollapseSeries(slug) => {
                self.expanded.remove(&slug);
            }
            Command::ToggleSeries(slug) => {
                if self.expanded.contains(&slug) {
                    self.expanded.remove(&slug);
                } else {
                    return self.apply(Command::ExpandSeries(slug));
                }
            }
            Command::ExpandAll => {
                self.expanded = self.series.slugs().map(String::from).collect();
            }
            Command::CollapseAll => self.expanded.clear(),
            Command::OpenLightbox { series, index } => {
                if let Some(s) = self.series.get(&series) {
                    self.lightbox.open(s, index);
                }
            }
            Command::NextImage => self.lightbox.next(),
            Command::PrevImage => self.lightbox.prev(),
            Command::CloseLightbox => self.lightbox.close(),
            Command::ResumeLightbox => self.lightbox.resume(),
            Command::ToggleTheme => self.theme = self.theme.toggled(),
        }
        self
    }
}

/// Map a key press to a lightbox command. Keys only act while it is open.
pub fn key_command(key: &str, lightbox_open: bool) -> Option<Command> {
    if !lightbox_open {
        return None;
    }
    match key {
        "Escape" => Some(Command::CloseLightbox),
        "ArrowRight" => Some(Command::NextImage),
        "ArrowLeft" => Some(Command::PrevImage),
        _ => None,
    }
}
