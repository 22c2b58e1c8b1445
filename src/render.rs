//! HTML rendering and site output.
//!
//! Turns an [`AppState`] into the gallery page. Rendering is a pure function
//! of state and config: filters, expanded sections, the lightbox and the
//! theme all show up in the markup, so a test can apply commands and inspect
//! the result without a browser.
//!
//! ## Page Structure
//!
//! ```text
//! header.site-header        title + theme toggle
//! nav.filters               tag pills, Clear, Expand all / Collapse all
//! section#seriesList        one article per series, in display order
//!   article#series-{slug}
//!     div.series-head       cover button, title, tag summary, toggles
//!     div#body-{slug}       description + works grid (hidden unless expanded)
//! div#lightbox              shared modal
//! ```
//!
//! Everything the browser needs to act on a click is precomputed here and
//! carried in `data-*` attributes: tag lists for filtering, and the composed
//! lightbox title/meta/description for each work. The page script only
//! flips visibility and index arithmetic.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── gallery.3f2a9c1e.css      # fingerprinted by content hash
//! ├── gallery.8b0d44a7.js
//! ├── images/                   # copy_dirs, verbatim
//! └── assets/
//! ```
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/); all interpolation
//! is escaped.

use crate::artwork::Artwork;
use crate::config::{self, SiteConfig};
use crate::filter::FilterRegistry;
use crate::lightbox::LightboxView;
use crate::naming::{body_anchor, section_anchor};
use crate::series::Series;
use crate::state::AppState;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// Fingerprinted file names of the page's stylesheet and script.
#[derive(Debug, Clone, Default)]
pub struct AssetNames {
    pub css: String,
    pub js: String,
}

/// What a build wrote, for the CLI summary.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub series: usize,
    pub works: usize,
    pub assets: AssetNames,
    pub copied_files: usize,
    pub missing_dirs: Vec<String>,
}

/// Full stylesheet: config-driven custom properties, then the static rules.
pub fn build_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    )
}

/// `gallery.{first 8 hex of sha256}.{ext}`
pub fn fingerprinted_name(content: &str, ext: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let hex: String = digest[..4].iter().map(|b| format!("{b:02x}")).collect();
    format!("gallery.{hex}.{ext}")
}

/// Write the site: `index.html`, fingerprinted CSS/JS, and the copy dirs.
pub fn generate(
    state: &AppState,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let css = build_css(config);
    let assets = AssetNames {
        css: fingerprinted_name(&css, "css"),
        js: fingerprinted_name(JS, "js"),
    };
    fs::write(output_dir.join(&assets.css), &css)?;
    fs::write(output_dir.join(&assets.js), JS)?;

    let page = render_page(state, config, &assets);
    fs::write(output_dir.join("index.html"), page.into_string())?;

    let mut copied_files = 0;
    let mut missing_dirs = Vec::new();
    for dir in &config.copy_dirs {
        let src = source_dir.join(dir);
        if src.is_dir() {
            copied_files += copy_dir_recursive(&src, &output_dir.join(dir))?;
        } else {
            tracing::warn!(dir = %src.display(), "copy directory not found, skipping");
            missing_dirs.push(dir.clone());
        }
    }

    Ok(GenerateSummary {
        series: state.series().len(),
        works: state.series().iter().map(Series::len).sum(),
        assets,
        copied_files,
        missing_dirs,
    })
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        // Skip hidden files and directories (.DS_Store, .git)
        if rel
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        {
            continue;
        }
        let target: PathBuf = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    theme: &str,
    assets: &AssetNames,
    scroll_target: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(assets.css);
            }
            body data-scroll-target=[scroll_target] {
                (content)
                script src=(assets.js) defer {}
            }
        }
    }
}

/// Renders the site header with the theme toggle
fn site_header(title: &str, theme: &str) -> Markup {
    let next = if theme == "dark" { "light" } else { "dark" };
    html! {
        header.site-header {
            h1.site-title { (title) }
            button.theme-toggle #themeToggle type="button" aria-label={ "Switch to " (next) " theme" } {
                @if theme == "dark" { "☀" } @else { "☾" }
            }
        }
    }
}

/// Renders the tag pills and the global controls
pub fn render_filter_bar(filters: &FilterRegistry) -> Markup {
    html! {
        nav.filters aria-label="Filter by subcategory" {
            div.filter-pills #filterPills {
                @for tag in filters.all_tags() {
                    @let active = filters.is_active(tag);
                    button.pill.active[active] type="button" data-tag=(tag)
                        aria-pressed=(if active { "true" } else { "false" }) {
                        (tag)
                    }
                }
            }
            div.filter-actions {
                button #clearFilters type="button" { "Clear" }
                button #expandAll type="button" { "Expand all" }
                button #collapseAll type="button" { "Collapse all" }
            }
        }
    }
}

/// Renders one expandable series section
pub fn render_series_section(series: &Series, state: &AppState, config: &SiteConfig) -> Markup {
    let visible = state.filters().series_visible(series);
    let expanded = state.is_expanded(&series.slug);
    let body_id = body_anchor(&series.slug);
    let cover = series.cover.as_deref().unwrap_or(&config.default_cover);

    html! {
        article.series-item id=(section_anchor(&series.slug)) role="listitem"
            data-slug=(series.slug) hidden[!visible] {
            div.series-head {
                button.thumb-button type="button" data-series=(series.slug) data-index="0"
                    aria-label={ "Open " (series.name) " gallery" } {
                    img.series-cover src=(cover) alt={ "Cover for " (series.name) } loading="lazy";
                }
                div.series-info {
                    h2.series-title { (series.name) }
                    p.series-meta { (series.tag_summary()) }
                    div.series-actions {
                        button.series-toggle type="button" data-action="toggle"
                            aria-controls=(body_id) aria-expanded=(if expanded { "true" } else { "false" }) {
                            @if expanded { "Hide works " span.chev { "▴" } }
                            @else { "Show works " span.chev { "▾" } }
                        }
                        button.series-collapse type="button" data-action="collapse"
                            aria-controls=(body_id) title="Collapse section" {
                            "Collapse " span.chev { "▴" }
                        }
                    }
                }
            }
            div.series-body.open[expanded] id=(body_id) hidden[!expanded] {
                @if let Some(description) = &series.description {
                    div.series-description { (render_markdown(description)) }
                }
                div.works-grid {
                    @for (index, artwork) in series.items.iter().enumerate() {
                        (render_work_card(series, index, artwork, state.filters().item_visible(artwork)))
                    }
                }
            }
        }
    }
}

/// Renders a single work card; the link opens the lightbox at `index`
pub fn render_work_card(series: &Series, index: usize, artwork: &Artwork, visible: bool) -> Markup {
    let view = LightboxView::compose(artwork);
    let tags = artwork.tags().join(",");
    html! {
        figure.work-card data-tags=(tags) hidden[!visible] {
            a.lightbox-link href=(artwork.image_file)
                data-series=(series.slug)
                data-index=(index)
                data-image=(view.image)
                data-alt=(view.alt)
                data-title=(view.title)
                data-meta=(view.meta)
                data-description=(view.description) {
                @if let Some(src) = artwork.grid_image() {
                    img src=(src) alt=(view.alt) loading="lazy";
                }
            }
            figcaption.cap {
                div.title { (artwork.title) }
                div.meta { (artwork.caption_meta()) }
            }
        }
    }
}

/// Renders the shared lightbox modal, showing the current work when open
pub fn render_lightbox(state: &AppState) -> Markup {
    let open = state.lightbox().is_open();
    let view = state
        .lightbox()
        .current(state.series())
        .filter(|_| open)
        .map(LightboxView::compose)
        .unwrap_or_default();
    html! {
        div.lightbox.open[open] #lightbox role="dialog" aria-modal="true"
            aria-hidden=(if open { "false" } else { "true" }) {
            button.lb-close type="button" aria-label="Close" { "×" }
            button.lb-prev type="button" aria-label="Previous work" { "‹" }
            figure.lb-frame {
                img #lbImg src=(view.image) alt=(view.alt);
                figcaption {
                    h3 #lbTitle { (view.title) }
                    p #lbDetails { (view.meta) }
                    p #lbDesc { (view.description) }
                }
            }
            button.lb-next type="button" aria-label="Next work" { "›" }
        }
    }
}

/// Renders the whole gallery page
pub fn render_page(state: &AppState, config: &SiteConfig, assets: &AssetNames) -> Markup {
    let content = html! {
        (site_header(&config.site_title, state.theme().as_str()))
        main.gallery {
            (render_filter_bar(state.filters()))
            section.series-list #seriesList role="list"
                data-filter-policy=(state.filters().policy().as_str()) {
                @for series in state.series().display_order() {
                    (render_series_section(series, state, config))
                }
            }
            @if state.series().is_empty() {
                p.empty-gallery { "No works to show yet." }
            }
        }
        (render_lightbox(state))
    };

    base_document(
        &config.site_title,
        state.theme().as_str(),
        assets,
        state.scroll_target().map(section_anchor).as_deref(),
        content,
    )
}

fn render_markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MatchPolicy;
    use crate::state::Command;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn assets() -> AssetNames {
        AssetNames {
            css: "gallery.test.css".into(),
            js: "gallery.test.js".into(),
        }
    }

    fn state() -> AppState {
        AppState::new(
            vec![
                with_sub_order(with_tags(artwork("Field", "Sky Studies"), "landscape, oil"), 1.0),
                with_sub_order(with_tags(artwork("Sitter", "Sky Studies"), "oil, portrait"), 2.0),
                with_order(with_tags(artwork("Harbor", "Coast"), "ink"), 1.0),
            ],
            MatchPolicy::Layered,
        )
    }

    fn page(state: &AppState) -> String {
        render_page(state, &SiteConfig::default(), &assets()).into_string()
    }

    /// Extract the opening tag of the element with the given id.
    fn open_tag<'a>(html: &'a str, id: &str) -> &'a str {
        let needle = format!(r#"id="{id}""#);
        let at = html
            .find(&needle)
            .unwrap_or_else(|| panic!("no element with id {id}"));
        let start = html[..at].rfind('<').unwrap();
        let end = at + html[at..].find('>').unwrap();
        &html[start..=end]
    }

    #[test]
    fn page_includes_doctype_and_assets() {
        let html = page(&state());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"href="gallery.test.css""#));
        assert!(html.contains(r#"src="gallery.test.js""#));
        assert!(html.contains(r#"data-theme="light""#));
    }

    #[test]
    fn sections_in_display_order() {
        let html = page(&state());
        let coast = html.find(r#"id="series-coast""#).unwrap();
        let sky = html.find(r#"id="series-sky-studies""#).unwrap();
        assert!(coast < sky, "ordered series first, unhinted last");
    }

    #[test]
    fn section_header_contents() {
        let html = page(&state());
        assert!(html.contains("Subcategories: landscape, oil, portrait"));
        assert!(html.contains(r#"aria-label="Open Sky Studies gallery""#));
        assert!(html.contains(r#"alt="Cover for Sky Studies""#));
        assert!(html.contains(r#"src="images/thumbs/Field.jpg""#));
    }

    #[test]
    fn bodies_collapsed_by_default() {
        let html = page(&state());
        assert!(open_tag(&html, "body-coast").contains("hidden"));
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains("Show works"));
    }

    #[test]
    fn expanded_body_is_visible() {
        let state = state().apply(Command::ExpandSeries("coast".into()));
        let html = page(&state);
        let body = open_tag(&html, "body-coast");
        assert!(!body.contains("hidden"));
        assert!(body.contains("open"));
        assert!(open_tag(&html, "body-sky-studies").contains("hidden"));
        assert!(html.contains("Hide works"));
    }

    #[test]
    fn deep_link_sets_scroll_target() {
        let html = page(&state().apply_deep_link("#series-coast"));
        assert!(html.contains(r#"data-scroll-target="series-coast""#));
        assert!(!open_tag(&html, "body-coast").contains("hidden"));
    }

    #[test]
    fn filtered_out_series_is_hidden() {
        let state = state().apply(Command::ToggleFilter("ink".into()));
        let html = page(&state);
        assert!(!open_tag(&html, "series-coast").contains("hidden"));
        assert!(open_tag(&html, "series-sky-studies").contains("hidden"));
        assert!(html.contains(r#"aria-pressed="true""#));
    }

    #[test]
    fn item_filter_hides_cards() {
        let state = state()
            .apply(Command::ToggleFilter("oil".into()))
            .apply(Command::ToggleFilter("portrait".into()));
        let sky = find_series(state.series(), "sky-studies");
        let card_html: Vec<String> = sky
            .items
            .iter()
            .enumerate()
            .map(|(i, a)| render_work_card(sky, i, a, state.filters().item_visible(a)).into_string())
            .collect();
        assert!(card_html[0].contains("hidden"));
        assert!(!card_html[1].contains("hidden"));
    }

    #[test]
    fn work_card_carries_lightbox_data() {
        let state = state();
        let sky = find_series(state.series(), "sky-studies");
        let html = render_work_card(sky, 1, &sky.items[1], true).into_string();
        assert!(html.contains(r#"data-series="sky-studies""#));
        assert!(html.contains(r#"data-index="1""#));
        assert!(html.contains(r#"data-tags="oil,portrait""#));
        assert!(html.contains(r#"data-title="Sitter, 2021""#));
        assert!(html.contains(r#"data-meta="2021 · Oil on linen · oil, portrait""#));
        assert!(html.contains(r#"href="images/Sitter.jpg""#));
    }

    #[test]
    fn filter_bar_lists_every_tag() {
        let html = render_filter_bar(state().filters()).into_string();
        for tag in ["ink", "landscape", "oil", "portrait"] {
            assert!(html.contains(&format!(r#"data-tag="{tag}""#)));
        }
        assert!(html.contains("clearFilters"));
        assert!(html.contains("expandAll"));
        assert!(html.contains("collapseAll"));
    }

    #[test]
    fn lightbox_hidden_until_opened() {
        let html = render_lightbox(&state()).into_string();
        assert!(html.contains(r#"aria-hidden="true""#));

        let opened = state().apply(Command::OpenLightbox {
            series: "sky-studies".into(),
            index: 0,
        });
        let html = render_lightbox(&opened).into_string();
        assert!(html.contains(r#"aria-hidden="false""#));
        assert!(html.contains("Field, 2021"));
        assert!(html.contains(r#"src="images/Field.jpg""#));
    }

    #[test]
    fn closed_lightbox_shows_nothing() {
        let closed = state()
            .apply(Command::OpenLightbox {
                series: "coast".into(),
                index: 0,
            })
            .apply(Command::CloseLightbox);
        let html = render_lightbox(&closed).into_string();
        assert!(!html.contains("Harbor"));
    }

    #[test]
    fn dark_theme_rendered() {
        let html = page(&state().apply(Command::ToggleTheme));
        assert!(html.contains(r#"data-theme="dark""#));
    }

    #[test]
    fn default_cover_used_without_images() {
        let mut a = artwork("Blank", "Empty Walls");
        a.image_file.clear();
        a.thumb_file.clear();
        let state = AppState::new(vec![a], MatchPolicy::default());
        let html = page(&state);
        assert!(html.contains("assets/sample-images/series-cover-1.jpg"));
    }

    #[test]
    fn series_description_rendered_as_markdown() {
        let mut a = artwork("Field", "Sky");
        a.series_description = "Painted *outdoors*.".into();
        let html = page(&AppState::new(vec![a], MatchPolicy::default()));
        assert!(html.contains("<em>outdoors</em>"));
    }

    #[test]
    fn empty_gallery_renders_message() {
        let html = page(&AppState::new(Vec::new(), MatchPolicy::default()));
        assert!(html.contains("No works to show yet."));
    }

    #[test]
    fn html_escape_in_titles() {
        let a = artwork("<script>alert('xss')</script>", "S");
        let html = page(&AppState::new(vec![a], MatchPolicy::default()));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let a = fingerprinted_name("body {}", "css");
        assert_eq!(a, fingerprinted_name("body {}", "css"));
        assert_ne!(a, fingerprinted_name("body { }", "css"));
        assert!(a.starts_with("gallery.") && a.ends_with(".css"));
        assert_eq!(a.len(), "gallery.".len() + 8 + ".css".len());
    }

    #[test]
    fn css_includes_config_variables() {
        let css = build_css(&SiteConfig::default());
        assert!(css.contains("--color-bg: #fbfaf7"));
        assert!(css.contains("--thumbnail-gap: 1rem"));
    }

    #[test]
    fn generate_writes_site() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("site");
        let output = tmp.path().join("dist");
        fs::create_dir_all(source.join("images/thumbs")).unwrap();
        fs::write(source.join("images/Field.jpg"), b"fake").unwrap();
        fs::write(source.join("images/thumbs/Field.jpg"), b"fake").unwrap();
        fs::write(source.join("images/.DS_Store"), b"junk").unwrap();

        let summary = generate(&state(), &SiteConfig::default(), &source, &output).unwrap();

        assert!(output.join("index.html").exists());
        assert!(output.join(&summary.assets.css).exists());
        assert!(output.join(&summary.assets.js).exists());
        assert!(output.join("images/thumbs/Field.jpg").exists());
        assert!(!output.join("images/.DS_Store").exists());
        assert_eq!(summary.copied_files, 2);
        assert_eq!(summary.series, 2);
        assert_eq!(summary.works, 3);
        assert_eq!(summary.missing_dirs, vec!["assets"]);
    }
}
