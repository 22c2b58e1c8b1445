//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a sparse user file in the site source directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "Portfolio"
//! data_file = "data/artworks.json"          # Artwork list, relative to the source dir
//! copy_dirs = ["images", "assets"]          # Copied verbatim into the output
//! default_cover = "assets/sample-images/series-cover-1.jpg"
//!
//! [filters]
//! policy = "layered"        # "series" | "item" | "layered"
//!
//! [theme]
//! thumbnail_gap = "1rem"    # Gap between work cards
//! grid_padding = "2rem"     # Padding around the series list
//!
//! [theme.lightbox_padding]
//! size = "4vw"
//! min = "1rem"
//! max = "3rem"
//!
//! [colors.light]
//! background = "#fbfaf7"
//! text = "#1c1b19"
//! text_muted = "#6b6760"    # Tag summaries, captions, lightbox meta
//! border = "#e4e0d8"
//! link = "#2f2d2a"
//! link_hover = "#000000"
//!
//! [colors.dark]
//! background = "#121110"
//! text = "#ece9e3"
//! text_muted = "#9a958c"
//! border = "#2e2b27"
//! link = "#d6d2ca"
//! link_hover = "#ffffff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::filter::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title and header text.
    pub site_title: String,
    /// Path of the artwork JSON, relative to the source directory.
    pub data_file: String,
    /// Directories copied verbatim into the output (images, fonts, favicon).
    pub copy_dirs: Vec<String>,
    /// Cover shown for a series none of whose works has an image.
    pub default_cover: String,
    pub filters: FiltersConfig,
    pub theme: ThemeConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Portfolio".to_string(),
            data_file: "data/artworks.json".to_string(),
            copy_dirs: vec!["images".to_string(), "assets".to_string()],
            default_cover: "assets/sample-images/series-cover-1.jpg".to_string(),
            filters: FiltersConfig::default(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        if self.data_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data_file must not be empty".into(),
            ));
        }
        if !is_contained(&self.data_file) {
            return Err(ConfigError::Validation(format!(
                "data_file must be a relative path inside the source directory: {}",
                self.data_file
            )));
        }
        for dir in &self.copy_dirs {
            if dir.trim().is_empty() || !is_contained(dir) {
                return Err(ConfigError::Validation(format!(
                    "copy_dirs entries must be relative paths inside the source directory: {dir:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Relative, and never climbs out with `..`.
fn is_contained(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Tag filter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FiltersConfig {
    /// How active tags decide series and work visibility.
    pub policy: MatchPolicy,
}

/// A responsive CSS size expressed as `clamp(min, size, max)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampSize {
    /// Preferred/fluid value, typically viewport-relative (e.g. `"4vw"`).
    pub size: String,
    /// Minimum bound (e.g. `"1rem"`).
    pub min: String,
    /// Maximum bound (e.g. `"3rem"`).
    pub max: String,
}

impl ClampSize {
    /// Render as a CSS `clamp()` expression.
    pub fn to_css(&self) -> String {
        format!("clamp({}, {}, {})", self.min, self.size, self.max)
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Gap between work cards in a series grid (CSS value).
    pub thumbnail_gap: String,
    /// Padding around the series list (CSS value).
    pub grid_padding: String,
    /// Space around the image inside the lightbox.
    pub lightbox_padding: ClampSize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            thumbnail_gap: "1rem".to_string(),
            grid_padding: "2rem".to_string(),
            lightbox_padding: ClampSize {
                size: "4vw".to_string(),
                min: "1rem".to_string(),
                max: "3rem".to_string(),
            },
        }
    }
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
    /// Muted/secondary text color (tag summaries, captions, lightbox meta).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fbfaf7".to_string(),
            text: "#1c1b19".to_string(),
            text_muted: "#6b6760".to_string(),
            border: "#e4e0d8".to_string(),
            link: "#2f2d2a".to_string(),
            link_hover: "#000000".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121110".to_string(),
            text: "#ece9e3".to_string(),
            text_muted: "#9a958c".to_string(),
            border: "#2e2b27".to_string(),
            link: "#d6d2ca".to_string(),
            link_hover: "#ffffff".to_string(),
        }
    }

    fn css_variables(&self, indent: &str) -> String {
        [
            ("--color-bg", &self.background),
            ("--color-text", &self.text),
            ("--color-text-muted", &self.text_muted),
            ("--color-border", &self.border),
            ("--color-link", &self.link),
            ("--color-link-hover", &self.link_hover),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
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

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value()?, overlay),
        None => stock_defaults_value()?,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# series-gal configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Page title and header text.
site_title = "Portfolio"

# Artwork list (JSON array), relative to the source directory.
data_file = "data/artworks.json"

# Directories copied verbatim into the output. Image paths in the data file
# are used as-is, so they should point inside one of these.
copy_dirs = ["images", "assets"]

# Cover shown for a series none of whose works has an image.
default_cover = "assets/sample-images/series-cover-1.jpg"

# ---------------------------------------------------------------------------
# Tag filters
# ---------------------------------------------------------------------------
[filters]
# How active tags decide what is shown:
#   "series"  - a series shows if any work has any active tag; works never hide
#   "item"    - a work shows only if it has every active tag; a series hides
#               when none of its works show
#   "layered" - series by "any tag", works inside them by "every tag"
policy = "layered"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Gap between work cards in a series grid (CSS value).
thumbnail_gap = "1rem"

# Padding around the series list (CSS value).
grid_padding = "2rem"

# Space around the image inside the lightbox, as CSS clamp(min, size, max).
[theme.lightbox_padding]
size = "4vw"
min = "1rem"
max = "3rem"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#fbfaf7"
text = "#1c1b19"
text_muted = "#6b6760"    # Tag summaries, captions, lightbox meta
border = "#e4e0d8"
link = "#2f2d2a"
link_hover = "#000000"

# ---------------------------------------------------------------------------
# Colors - Dark mode (theme toggle, defaulting to the system preference)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121110"
text = "#ece9e3"
text_muted = "#9a958c"
border = "#2e2b27"
link = "#d6d2ca"
link_hover = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
///
/// Light colors are the root default; dark colors apply under
/// `data-theme="dark"`, which the page script sets from the stored preference
/// or the system color scheme.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

:root[data-theme="dark"] {{
{dark}
}}"#,
        light = colors.light.css_variables("    "),
        dark = colors.dark.css_variables("    "),
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --thumbnail-gap: {thumbnail_gap};
    --grid-padding: {grid_padding};
    --lightbox-padding: {lightbox_padding};
}}"#,
        thumbnail_gap = theme.thumbnail_gap,
        grid_padding = theme.grid_padding,
        lightbox_padding = theme.lightbox_padding.to_css(),
    )
}
