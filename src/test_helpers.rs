//! Shared test utilities for the series-gal test suite.
//!
//! Provides artwork builders, lookup helpers and bulk extractors that work
//! with grouping-phase data structures (`Artwork`, `Series`, `SeriesIndex`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let index = group_series(&[
//!     with_order(artwork("Harbor", "Coast"), 1.0),
//!     with_tags(artwork("Dawn", "Sky Studies"), "oil, landscape"),
//! ]);
//!
//! let sky = find_series(&index, "sky-studies");
//! assert_eq!(item_titles(sky), vec!["Dawn"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::artwork::Artwork;
use crate::series::{Series, SeriesIndex};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Artwork builders
// =========================================================================

/// A plausible artwork: dated, with a medium and image paths derived from
/// the title. No tags, no ordering hints.
pub fn artwork(title: &str, series: &str) -> Artwork {
    Artwork {
        title: title.to_string(),
        series: series.to_string(),
        year: "2021".to_string(),
        medium: "Oil on linen".to_string(),
        image_file: format!("images/{title}.jpg"),
        thumb_file: format!("images/thumbs/{title}.jpg"),
        ..Default::default()
    }
}

pub fn with_order(mut artwork: Artwork, order: f64) -> Artwork {
    artwork.order = Some(order);
    artwork
}

pub fn with_sub_order(mut artwork: Artwork, sub_order: f64) -> Artwork {
    artwork.sub_order = Some(sub_order);
    artwork
}

pub fn with_tags(mut artwork: Artwork, tags: &str) -> Artwork {
    artwork.subcategories = tags.to_string();
    artwork
}

// =========================================================================
// Index lookups: panic with a clear message on miss
// =========================================================================

/// Find a series by slug. Panics if not found.
pub fn find_series<'a>(index: &'a SeriesIndex, slug: &str) -> &'a Series {
    index.get(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = index.slugs().collect();
        panic!("series '{slug}' not found. Available: {slugs:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Series display names in first-seen order.
pub fn series_names(index: &SeriesIndex) -> Vec<&str> {
    index.iter().map(|s| s.name.as_str()).collect()
}

/// Work titles of a series in display order.
pub fn item_titles(series: &Series) -> Vec<&str> {
    series.items.iter().map(|a| a.title.as_str()).collect()
}
