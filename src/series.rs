//! Grouping artworks into series.
//!
//! The data file is a flat list; the gallery shows it as series. Grouping
//! walks the list once, keyed by the slug of each artwork's series name, and
//! then sorts each series' works.
//!
//! ## Ordering
//!
//! Two independent orderings apply:
//!
//! - **Works within a series**: by `sub_order`, then by title (case-sensitive,
//!   byte-wise). Works without a `sub_order` come after every work with one.
//! - **Series on the page**: by the series' `order` hint, taken from the
//!   series' first artwork. Series without a hint come after every hinted
//!   series; ties keep first-seen order.
//!
//! The cover is the thumbnail (else image) of the first artwork in input
//! order that has one, not the first in display order.
//!
//! The [`SeriesIndex`] itself preserves first-seen order; display order is
//! computed on demand by [`SeriesIndex::display_order`].

use crate::artwork::{Artwork, split_tags};
use crate::naming::series_identity;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// A named collection of works with metadata computed from its artworks.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    pub items: Vec<Artwork>,
    /// Thumbnail (else image) of the first work in input order that has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Series {
    fn new(name: String, slug: String) -> Self {
        Self {
            name,
            slug,
            order: None,
            items: Vec::new(),
            cover: None,
            tags: BTreeSet::new(),
            description: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Tag summary line shown under the series title.
    pub fn tag_summary(&self) -> String {
        if self.tags.is_empty() {
            "—".to_string()
        } else {
            let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
            format!("Subcategories: {}", tags.join(", "))
        }
    }
}

/// All series of a gallery, in first-seen order, addressable by slug.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesIndex {
    series: Vec<Series>,
    #[serde(skip)]
    by_slug: HashMap<String, usize>,
}

impl SeriesIndex {
    pub fn get(&self, slug: &str) -> Option<&Series> {
        self.by_slug.get(slug).map(|&i| &self.series[i])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// Slugs in first-seen order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.slug.as_str())
    }

    /// Series sorted for display: by order hint, unhinted last, stable.
    pub fn display_order(&self) -> Vec<&Series> {
        let mut sorted: Vec<&Series> = self.series.iter().collect();
        sorted.sort_by(|a, b| compare_order(a.order, b.order));
        sorted
    }
}

/// Partition artworks into series.
///
/// Every artwork lands in exactly one series. Artworks with a blank series
/// name are grouped under "Untitled Series" rather than dropped.
pub fn group_series(artworks: &[Artwork]) -> SeriesIndex {
    let mut index = SeriesIndex::default();

    for artwork in artworks {
        let (name, slug) = series_identity(&artwork.series);
        let position = *index.by_slug.entry(slug.clone()).or_insert_with(|| {
            let mut series = Series::new(name, slug);
            series.order = artwork.order;
            index.series.push(series);
            index.series.len() - 1
        });
        let series = &mut index.series[position];

        if series.cover.is_none() {
            series.cover = artwork.grid_image().map(String::from);
        }
        if series.description.is_none() && !artwork.series_description.is_empty() {
            series.description = Some(artwork.series_description.clone());
        }
        series.tags.extend(split_tags(&artwork.subcategories));
        series.items.push(artwork.clone());
    }

    for series in &mut index.series {
        series.items.sort_by(compare_works);
    }

    index
}

/// Order works by `sub_order` (missing last), then title.
pub fn compare_works(a: &Artwork, b: &Artwork) -> Ordering {
    compare_order(a.sub_order, b.sub_order).then_with(|| a.title.cmp(&b.title))
}

/// Compare optional order hints: explicit values ascending, `None` last.
pub fn compare_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn groups_by_series_name() {
        let artworks = vec![
            artwork("Dawn", "Sky Studies"),
            artwork("Harbor", "Coast"),
            artwork("Dusk", "Sky Studies"),
        ];
        let index = group_series(&artworks);
        assert_eq!(series_names(&index), vec!["Sky Studies", "Coast"]);
        assert_eq!(find_series(&index, "sky-studies").len(), 2);
    }

    #[test]
    fn every_artwork_lands_in_exactly_one_series() {
        let artworks = vec![
            artwork("A", "One"),
            artwork("B", ""),
            artwork("C", "Two"),
            artwork("D", "one"),
            artwork("E", "   "),
        ];
        let index = group_series(&artworks);
        let total: usize = index.iter().map(Series::len).sum();
        assert_eq!(total, artworks.len());
        for a in &artworks {
            let hits = index
                .iter()
                .filter(|s| s.items.iter().any(|i| i.title == a.title))
                .count();
            assert_eq!(hits, 1, "artwork {} in {hits} series", a.title);
        }
    }

    #[test]
    fn grouping_is_case_and_whitespace_insensitive() {
        let artworks = vec![
            artwork("Dawn", "Sky Studies"),
            artwork("Dusk", "  sky   STUDIES "),
        ];
        let index = group_series(&artworks);
        assert_eq!(index.len(), 1);
        // First-seen spelling wins
        assert_eq!(find_series(&index, "sky-studies").name, "Sky Studies");
    }

    #[test]
    fn sky_studies_and_untitled_scenario() {
        let artworks = vec![
            with_sub_order(artwork("Second", "Sky Studies"), 2.0),
            with_sub_order(artwork("First", "Sky Studies"), 1.0),
            artwork("Loose", ""),
        ];
        let index = group_series(&artworks);

        let sky = find_series(&index, "sky-studies");
        assert_eq!(item_titles(sky), vec!["First", "Second"]);

        let untitled = find_series(&index, "untitled-series");
        assert_eq!(untitled.name, "Untitled Series");
        assert_eq!(item_titles(untitled), vec!["Loose"]);
    }

    #[test]
    fn items_sorted_by_sub_order_then_title() {
        let artworks = vec![
            with_sub_order(artwork("b", "S"), 2.0),
            with_sub_order(artwork("a", "S"), 2.0),
            artwork("Unordered", "S"),
            with_sub_order(artwork("z", "S"), 1.0),
            with_sub_order(artwork("B", "S"), 2.0),
        ];
        let index = group_series(&artworks);
        // Uppercase sorts before lowercase in byte order
        assert_eq!(
            item_titles(find_series(&index, "s")),
            vec!["z", "B", "a", "b", "Unordered"]
        );
    }

    #[test]
    fn missing_sub_order_sorts_after_large_explicit_values() {
        let artworks = vec![
            artwork("None", "S"),
            with_sub_order(artwork("Huge", "S"), 100_000.0),
        ];
        let index = group_series(&artworks);
        assert_eq!(item_titles(find_series(&index, "s")), vec!["Huge", "None"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut first = artwork("Same", "S");
        first.medium = "first".into();
        let mut second = artwork("Same", "S");
        second.medium = "second".into();
        let index = group_series(&[first, second]);
        let media: Vec<&str> = find_series(&index, "s")
            .items
            .iter()
            .map(|a| a.medium.as_str())
            .collect();
        assert_eq!(media, vec!["first", "second"]);
    }

    #[test]
    fn display_order_by_hint_with_unhinted_last() {
        let artworks = vec![
            artwork("a", "No Hint"),
            with_order(artwork("b", "Third"), 30.0),
            with_order(artwork("c", "First"), 1.0),
            with_order(artwork("d", "Second"), 2.0),
            artwork("e", "Also No Hint"),
        ];
        let index = group_series(&artworks);
        let names: Vec<&str> = index
            .display_order()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["First", "Second", "Third", "No Hint", "Also No Hint"]
        );
    }

    #[test]
    fn series_order_comes_from_first_artwork_only() {
        let artworks = vec![
            artwork("a", "S"),
            with_order(artwork("b", "S"), 5.0),
            with_order(artwork("c", "T"), 1.0),
        ];
        let index = group_series(&artworks);
        assert_eq!(find_series(&index, "s").order, None);
        assert_eq!(find_series(&index, "t").order, Some(1.0));
    }

    #[test]
    fn unhinted_first_record_sorts_series_last() {
        let artworks = vec![
            artwork("a", "X"),
            with_order(artwork("b", "X"), 1.0),
            with_order(artwork("c", "Y"), 5.0),
        ];
        let index = group_series(&artworks);
        let names: Vec<&str> = index
            .display_order()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Y", "X"]);
    }

    #[test]
    fn tags_aggregated_across_items() {
        let artworks = vec![
            with_tags(artwork("a", "S"), "landscape, oil"),
            with_tags(artwork("b", "S"), "oil, portrait"),
            with_tags(artwork("c", "T"), "ink"),
        ];
        let index = group_series(&artworks);
        let tags: Vec<&str> = find_series(&index, "s")
            .tags
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(tags, vec!["landscape", "oil", "portrait"]);
    }

    #[test]
    fn cover_is_first_available_image_in_input_order() {
        let mut no_image = with_sub_order(artwork("a", "S"), 1.0);
        no_image.image_file.clear();
        no_image.thumb_file.clear();
        let mut full_only = with_sub_order(artwork("b", "S"), 2.0);
        full_only.thumb_file.clear();
        let later = with_sub_order(artwork("c", "S"), 3.0);

        let index = group_series(&[no_image, full_only, later]);
        assert_eq!(
            find_series(&index, "s").cover.as_deref(),
            Some("images/b.jpg")
        );
    }

    #[test]
    fn cover_ignores_sub_order() {
        let late = with_sub_order(artwork("Late", "S"), 2.0);
        let early = with_sub_order(artwork("Early", "S"), 1.0);
        let index = group_series(&[late, early]);
        let series = find_series(&index, "s");
        assert_eq!(item_titles(series), vec!["Early", "Late"]);
        assert_eq!(series.cover.as_deref(), Some("images/thumbs/Late.jpg"));
    }

    #[test]
    fn cover_none_when_no_images() {
        let mut a = artwork("a", "S");
        a.image_file.clear();
        a.thumb_file.clear();
        let index = group_series(&[a]);
        assert_eq!(find_series(&index, "s").cover, None);
    }

    #[test]
    fn description_is_first_non_empty() {
        let mut a = artwork("a", "S");
        a.series_description = String::new();
        let mut b = artwork("b", "S");
        b.series_description = "Painted outdoors.".into();
        let index = group_series(&[a, b]);
        assert_eq!(
            find_series(&index, "s").description.as_deref(),
            Some("Painted outdoors.")
        );
    }

    #[test]
    fn tag_summary_formats() {
        let index = group_series(&[with_tags(artwork("a", "S"), "oil, ink")]);
        assert_eq!(
            find_series(&index, "s").tag_summary(),
            "Subcategories: ink, oil"
        );
        let bare = group_series(&[artwork("a", "T")]);
        assert_eq!(find_series(&bare, "t").tag_summary(), "—");
    }

    #[test]
    fn empty_input_yields_empty_index() {
        let index = group_series(&[]);
        assert!(index.is_empty());
        assert!(index.display_order().is_empty());
    }
}
