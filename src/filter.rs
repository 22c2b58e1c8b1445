//! Subcategory filters.
//!
//! The registry knows every distinct tag in the gallery and which of them
//! the visitor has switched on. Visibility of series and individual works is
//! answered here so the renderer and the browser runtime agree on one rule.
//!
//! ## Matching policy
//!
//! Two readings of "filter by tag" are reasonable, and they disagree once
//! more than one tag is active. [`MatchPolicy`] makes the choice explicit:
//!
//! | Policy | Series visible when | Work visible when |
//! |--------|--------------------|-------------------|
//! | `series` | any work has any active tag | always |
//! | `item` | at least one work is visible | it has every active tag |
//! | `layered` (default) | any work has any active tag | it has every active tag |
//!
//! With no active tags everything is visible under every policy.
//!
//! Under `layered`, a series can be visible while none of its works pass the
//! all-tags test (e.g. active `oil` + `ink` where no single work has both).
//! The section then shows its header with an empty grid.

use crate::artwork::Artwork;
use crate::series::Series;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Any-match at the series level; works are never hidden.
    Series,
    /// All-match per work; a series hides only when none of its works match.
    Item,
    /// Any-match for series, all-match for works inside visible series.
    #[default]
    Layered,
}

impl MatchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchPolicy::Series => "series",
            MatchPolicy::Item => "item",
            MatchPolicy::Layered => "layered",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRegistry {
    all: BTreeSet<String>,
    active: BTreeSet<String>,
    policy: MatchPolicy,
}

impl FilterRegistry {
    /// Build the registry from every tag carried by any artwork.
    pub fn new(artworks: &[Artwork], policy: MatchPolicy) -> Self {
        Self {
            all: artworks.iter().flat_map(Artwork::tags).collect(),
            active: BTreeSet::new(),
            policy,
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// All distinct tags, sorted.
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.all.iter().map(String::as_str)
    }

    pub fn active(&self) -> &BTreeSet<String> {
        &self.active
    }

    pub fn is_active(&self, tag: &str) -> bool {
        self.active.contains(tag)
    }

    /// Switch a tag on if it is off, off if it is on. Unknown tags are ignored.
    pub fn toggle(&mut self, tag: &str) {
        if !self.all.contains(tag) {
            return;
        }
        if !self.active.remove(tag) {
            self.active.insert(tag.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Whether a work passes the per-work test of the current policy.
    pub fn item_visible(&self, artwork: &Artwork) -> bool {
        match self.policy {
            MatchPolicy::Series => true,
            MatchPolicy::Item | MatchPolicy::Layered => self.matches_all(artwork),
        }
    }

    /// Whether a series section is shown under the current policy.
    pub fn series_visible(&self, series: &Series) -> bool {
        if self.active.is_empty() {
            return true;
        }
        match self.policy {
            MatchPolicy::Series | MatchPolicy::Layered => {
                series.items.iter().any(|a| self.matches_any(a))
            }
            MatchPolicy::Item => series.items.iter().any(|a| self.matches_all(a)),
        }
    }

    /// Indices (into `series.items`) of the works currently shown.
    pub fn visible_items(&self, series: &Series) -> Vec<usize> {
        series
            .items
            .iter()
            .enumerate()
            .filter(|(_, a)| self.item_visible(a))
            .map(|(i, _)| i)
            .collect()
    }

    fn matches_any(&self, artwork: &Artwork) -> bool {
        self.active.is_empty() || self.active.iter().any(|t| artwork.has_tag(t))
    }

    fn matches_all(&self, artwork: &Artwork) -> bool {
        self.active.iter().all(|t| artwork.has_tag(t))
    }
}
