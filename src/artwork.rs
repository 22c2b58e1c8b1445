//! Artwork records and the data loader.
//!
//! The gallery's only input is a JSON array of artwork records, typically
//! `data/artworks.json` exported from a spreadsheet (see
//! [`import`](crate::import) for the CSV converter):
//!
//! ```json
//! [
//!   {
//!     "title": "Dawn",
//!     "series": "Sky Studies",
//!     "year": 2021,
//!     "medium": "Oil on linen",
//!     "dimensions": "40 × 50 cm",
//!     "image_file": "images/dawn.jpg",
//!     "thumb_file": "images/thumbs/dawn.jpg",
//!     "alt_text": "Pale sky over a field",
//!     "image_description": "First light over the estuary.",
//!     "series_description": "Small studies painted outdoors.",
//!     "subcategories": "landscape, oil",
//!     "order": 1,
//!     "sub_order": 2
//!   }
//! ]
//! ```
//!
//! ## Lenient fields
//!
//! Spreadsheet exports are messy, so every field is optional and loosely typed:
//!
//! - Text fields accept strings, numbers and booleans (`2021` → `"2021"`);
//!   null or absent becomes the empty string. Values are trimmed.
//! - `order` / `sub_order` accept numbers or numeric strings (`"3"`, `"1.5"`).
//!   Anything else means "no explicit order".
//! - Unknown keys are ignored.
//!
//! A record that is not a JSON object is skipped with a warning; the rest of
//! the file still loads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Sort position used in place of a missing `order` / `sub_order`.
///
/// Records without an explicit order sort after every record with one; this
/// constant is what the inventory output shows for them.
pub const DEFAULT_ORDER: f64 = 9999.0;

/// A single work as supplied by the data file. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artwork {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub series: String,
    #[serde(deserialize_with = "lenient_text")]
    pub year: String,
    #[serde(deserialize_with = "lenient_text")]
    pub medium: String,
    #[serde(deserialize_with = "lenient_text")]
    pub dimensions: String,
    #[serde(deserialize_with = "lenient_text")]
    pub image_file: String,
    #[serde(deserialize_with = "lenient_text")]
    pub thumb_file: String,
    #[serde(deserialize_with = "lenient_text")]
    pub alt_text: String,
    #[serde(deserialize_with = "lenient_text")]
    pub image_description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub series_description: String,
    /// Comma-separated subcategory tags, e.g. `"landscape, oil"`.
    #[serde(deserialize_with = "lenient_text")]
    pub subcategories: String,
    #[serde(
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<f64>,
    #[serde(
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_order: Option<f64>,
}

impl Artwork {
    /// The artwork's subcategory tags, in the order they were written.
    pub fn tags(&self) -> Vec<String> {
        split_tags(&self.subcategories)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.subcategories.split(',').any(|t| t.trim() == tag)
    }

    /// Image shown in grids: the thumbnail when present, else the full image.
    pub fn grid_image(&self) -> Option<&str> {
        [self.thumb_file.as_str(), self.image_file.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }

    /// Alt text with fallbacks for records that don't provide one.
    pub fn alt(&self) -> String {
        if !self.alt_text.is_empty() {
            self.alt_text.clone()
        } else if !self.title.is_empty() {
            format!("Artwork titled {}", self.title)
        } else {
            "Artwork image".to_string()
        }
    }

    /// Caption line under a grid card: `year · medium · dimensions`.
    pub fn caption_meta(&self) -> String {
        join_present(&[&self.year, &self.medium, &self.dimensions])
    }
}

/// Split a comma-separated tag string, trimming each tag and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Join the non-empty parts with a middle dot separator.
pub fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Read and parse the artwork data file.
pub fn load_artworks(path: &Path) -> Result<Vec<Artwork>, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_artworks(&content)
}

/// Load the data file, recovering from failure with an empty gallery.
///
/// A missing or unparseable data file is logged and yields no artworks, so a
/// build still produces a (blank) page instead of aborting.
pub fn load_or_empty(path: &Path) -> Vec<Artwork> {
    match load_artworks(path) {
        Ok(artworks) => artworks,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to load artwork data");
            Vec::new()
        }
    }
}

/// Parse the JSON array of artwork records.
pub fn parse_artworks(json: &str) -> Result<Vec<Artwork>, LoadError> {
    let records: Vec<Value> = serde_json::from_str(json)?;
    let mut artworks = Vec::with_capacity(records.len());
    for (position, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            tracing::warn!(position, "skipping artwork record that is not an object");
            continue;
        }
        artworks.push(serde_json::from_value(record)?);
    }
    Ok(artworks)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_order<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let order = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(order.filter(|o| o.is_finite()))
}
