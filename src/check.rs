//! Reference validation for `series-gal check`.
//!
//! Every image and thumbnail path named in the data file should exist under
//! the source directory. A missing file doesn't stop a build (the browser
//! just shows a broken image) but `check` reports it.

use crate::series::SeriesIndex;

use std::path::Path;

/// An artwork path that doesn't resolve to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFile {
    /// Display name of the series the work belongs to.
    pub series: String,
    pub title: String,
    pub path: String,
}

/// Collect referenced image files that don't exist under `source_dir`.
///
/// Series are visited in display order, works in their sorted order. A path
/// used as both image and thumbnail is reported once.
pub fn find_missing_files(index: &SeriesIndex, source_dir: &Path) -> Vec<MissingFile> {
    let mut missing = Vec::new();
    for series in index.display_order() {
        for work in &series.items {
            let mut paths = vec![work.image_file.as_str()];
            if work.thumb_file != work.image_file {
                paths.push(work.thumb_file.as_str());
            }
            for path in paths.into_iter().filter(|p| !p.trim().is_empty()) {
                if !source_dir.join(path).is_file() {
                    tracing::warn!(series = %series.slug, path, "referenced file missing");
                    missing.push(MissingFile {
                        series: series.name.clone(),
                        title: work.title.clone(),
                        path: path.to_string(),
                    });
                }
            }
        }
    }
    missing
}
