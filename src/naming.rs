//! Series naming: slugs and the anchor ids derived from them.
//!
//! Every series is addressed by a URL-safe slug computed from its display
//! name. The slug is also the grouping key, so two spellings of the same name
//! (`"Sky Studies"`, `"  sky   studies "`) land in the same series.
//!
//! ## Anchors
//!
//! Each rendered series carries two element ids built from the slug:
//!
//! - `series-{slug}`: the section itself, used as the URL fragment for
//!   deep links (`index.html#series-sky-studies`)
//! - `body-{slug}`: the collapsible body holding the works grid

/// Display name used for artworks that carry no series name.
pub const UNTITLED_SERIES: &str = "Untitled Series";

const SECTION_PREFIX: &str = "series-";
const BODY_PREFIX: &str = "body-";

/// Convert a series name into a URL-safe slug.
///
/// - Lowercases ASCII letters
/// - Replaces every run of characters outside `[a-z0-9]` with one dash
/// - Strips leading and trailing dashes
///
/// Non-ASCII letters count as separators, so `"Café Nights"` becomes
/// `"caf-nights"`. The result may be empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Resolve the display name and slug for a raw series field.
///
/// Blank names fall back to [`UNTITLED_SERIES`]. Names that produce an empty
/// slug keep their display name but group under the untitled slug.
pub fn series_identity(raw: &str) -> (String, String) {
    let name = raw.trim();
    if name.is_empty() {
        return (UNTITLED_SERIES.to_string(), slugify(UNTITLED_SERIES));
    }
    let slug = slugify(name);
    if slug.is_empty() {
        (name.to_string(), slugify(UNTITLED_SERIES))
    } else {
        (name.to_string(), slug)
    }
}

/// Element id (and URL fragment) of a series section.
pub fn section_anchor(slug: &str) -> String {
    format!("{SECTION_PREFIX}{slug}")
}

/// Element id of a series' collapsible body.
pub fn body_anchor(slug: &str) -> String {
    format!("{BODY_PREFIX}{slug}")
}

/// Extract the series slug from a URL fragment like `#series-sky-studies`.
///
/// The leading `#` is optional. Returns `None` for fragments that don't use
/// the section prefix or name an empty slug.
pub fn parse_fragment(fragment: &str) -> Option<&str> {
    let id = fragment.strip_prefix('#').unwrap_or(fragment);
    id.strip_prefix(SECTION_PREFIX).filter(|slug| !slug.is_empty())
}
