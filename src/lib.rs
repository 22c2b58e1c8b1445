//! # Series Gal
//!
//! A static site generator for art portfolios organised into series.
//! A JSON list of artworks is the data source: works are grouped into series,
//! ordered by explicit hints, and rendered as a single gallery page with tag
//! filters, expandable sections, a shared lightbox and deep links.
//!
//! # Architecture: State In, Page Out
//!
//! ```text
//! 1. Load      data/artworks.json  →  Vec<Artwork>   (lenient JSON parsing)
//! 2. Group     Vec<Artwork>        →  SeriesIndex    (grouping + ordering)
//! 3. Render    AppState            →  dist/          (HTML, CSS, JS, copied media)
//! ```
//!
//! All interactive behaviour is modelled by [`state::AppState`], a plain value
//! changed only through [`state::Command`]s. The renderer is a pure function of
//! that value and the site config. The page script shipped with the site
//! mirrors the same transitions in the browser, driven by `data-*` attributes
//! the renderer precomputes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`artwork`] | The artwork record, tag parsing, lenient data-file loading |
//! | [`series`] | Grouping artworks into series; work and series ordering |
//! | [`filter`] | Tag registry and visibility policy |
//! | [`lightbox`] | Lightbox navigation state and composed detail view |
//! | [`state`] | Application state and the commands that change it |
//! | [`naming`] | Slugs, section anchors and URL fragment parsing |
//! | [`render`] | Maud page rendering and site output |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`check`] | Missing image reference detection |
//! | [`import`] | Spreadsheet CSV to artwork JSON conversion |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error and all interpolation is
//! auto-escaped, which matters here since every title and description comes
//! straight from the data file.
//!
//! ## Order Hints Are Optional, Not Defaulted
//!
//! `order` and `sub_order` are `Option<f64>`. A work without a hint sorts after
//! every work with one, no matter how large the explicit value is. An order of
//! `0` is an ordinary explicit value.
//!
//! ## One Page, No Server
//!
//! The output is one HTML file, one stylesheet and one small script. It can be
//! dropped on any file server; deep links use the URL fragment, so no routing
//! is needed.

pub mod artwork;
pub mod check;
pub mod config;
pub mod filter;
pub mod import;
pub mod lightbox;
pub mod naming;
pub mod output;
pub mod render;
pub mod series;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;
