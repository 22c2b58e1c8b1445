//! Lightbox navigation state and the detail view it shows.
//!
//! A single modal is shared by every series. Its state is just "which series,
//! which work, is it showing":
//!
//! ```text
//!            open(series, i)             next / prev
//!   Closed ─────────────────▶ Open(s, i) ───────────▶ Open(s, (i ± 1) mod n)
//!     ▲                          │
//!     └────────── close ─────────┘   (series and index are remembered)
//! ```
//!
//! Closing keeps the last position so [`Lightbox::resume`] reopens where the
//! visitor left off. Navigation wraps around at both ends; a one-work series
//! stays on index 0.
//!
//! Resume is a library operation. The shipped page script has no control
//! for it and always opens from a card or cover.

use crate::artwork::{Artwork, join_present};
use crate::series::{Series, SeriesIndex};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    series: Option<String>,
    index: usize,
    len: usize,
    visible: bool,
}

impl Lightbox {
    /// Show the work at `index` of `series`.
    ///
    /// Empty series and out-of-range indices leave the state untouched.
    pub fn open(&mut self, series: &Series, index: usize) {
        if index >= series.len() {
            tracing::debug!(series = %series.slug, index, "lightbox open out of range");
            return;
        }
        self.series = Some(series.slug.clone());
        self.index = index;
        self.len = series.len();
        self.visible = true;
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn prev(&mut self) {
        self.step(-1);
    }

    /// Hide the modal, keeping the current position.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Reopen at the remembered position. No-op if nothing was ever opened.
    pub fn resume(&mut self) {
        if self.series.is_some() {
            self.visible = true;
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Slug of the current (or last) series.
    pub fn series(&self) -> Option<&str> {
        self.series.as_deref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The artwork currently selected, resolved against the gallery.
    pub fn current<'a>(&self, index: &'a SeriesIndex) -> Option<&'a Artwork> {
        let series = index.get(self.series.as_deref()?)?;
        series.items.get(self.index)
    }

    fn step(&mut self, delta: isize) {
        if self.series.is_none() || self.len == 0 {
            return;
        }
        let len = self.len as isize;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
    }
}

/// Text and image shown for one work in the lightbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LightboxView {
    pub image: String,
    pub alt: String,
    /// `"{title}, {year}"`, or whichever of the two is present.
    pub title: String,
    /// `year · medium · dimensions · tags`, empty segments omitted.
    pub meta: String,
    pub description: String,
}

impl LightboxView {
    pub fn compose(artwork: &Artwork) -> Self {
        let title = match (artwork.title.is_empty(), artwork.year.is_empty()) {
            (false, false) => format!("{}, {}", artwork.title, artwork.year),
            (false, true) => artwork.title.clone(),
            (true, _) => artwork.year.clone(),
        };
        let tags = artwork.tags().join(", ");
        let meta = join_present(&[
            &artwork.year,
            &artwork.medium,
            &artwork.dimensions,
            &tags,
        ]);
        Self {
            image: artwork.image_file.clone(),
            alt: artwork.alt(),
            title,
            meta,
            description: artwork.image_description.clone(),
        }
    }
}
