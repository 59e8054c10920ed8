//! Gallery filtering, section grouping and lightbox navigation.
//!
//! Everything here is a pure function of a `Catalog`. Order always follows
//! catalog declaration order, which is also the lightbox sequence.

use crate::catalog::{Catalog, CategoryTag, ContentItem};
use serde::Serialize;

/// What a gallery filter asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every item, unfiltered
    All,
    Category(CategoryTag),
    /// A label that names no category; matches nothing
    Unrecognized,
}

impl Selector {
    /// Parse a selector label. Never fails: unknown labels become `Unrecognized`.
    pub fn parse(label: &str) -> Selector {
        if label == "all" {
            return Selector::All;
        }
        label
            .parse::<CategoryTag>()
            .map(Selector::Category)
            .unwrap_or(Selector::Unrecognized)
    }
}

impl From<CategoryTag> for Selector {
    fn from(tag: CategoryTag) -> Self {
        Selector::Category(tag)
    }
}

/// Items matching a selector, in catalog order.
///
/// `All` yields the whole catalog, a category yields exactly the items
/// tagged with it, and an unrecognized selector yields nothing.
pub fn filter(catalog: &Catalog, selector: Selector) -> Vec<&ContentItem> {
    match selector {
        Selector::All => catalog.items().iter().collect(),
        Selector::Category(tag) => catalog
            .items()
            .iter()
            .filter(|item| item.has_category(tag))
            .collect(),
        Selector::Unrecognized => Vec::new(),
    }
}

/// Filter by a raw selector label such as `"food"` or `"all"`.
pub fn filter_by_label<'a>(catalog: &'a Catalog, label: &str) -> Vec<&'a ContentItem> {
    filter(catalog, Selector::parse(label))
}

/// One titled block of the gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section<'a> {
    pub category: CategoryTag,
    pub items: Vec<&'a ContentItem>,
}

/// Gallery sections in display order, without empty ones.
pub fn sections(catalog: &Catalog) -> Vec<Section<'_>> {
    CategoryTag::ALL
        .iter()
        .map(|&category| Section {
            category,
            items: filter(catalog, Selector::Category(category)),
        })
        .filter(|section| !section.items.is_empty())
        .collect()
}

/// Item after `current_id` in the lightbox, wrapping to the first.
///
/// Returns `None` when `current_id` is not in the sequence.
pub fn next<'a>(items: &[&'a ContentItem], current_id: &str) -> Option<&'a ContentItem> {
    let index = position(items, current_id)?;
    items.get((index + 1) % items.len()).copied()
}

/// Item before `current_id` in the lightbox, wrapping to the last.
pub fn previous<'a>(items: &[&'a ContentItem], current_id: &str) -> Option<&'a ContentItem> {
    let index = position(items, current_id)?;
    items.get((index + items.len() - 1) % items.len()).copied()
}

fn position(items: &[&ContentItem], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryTag::*;
    use proptest::prelude::*;

    fn ids(items: &[&ContentItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.id).collect()
    }

    // ==================== filter Tests ====================

    #[test]
    fn test_all_returns_full_catalog_in_order() {
        let catalog = Catalog::builtin();
        let all = filter(catalog, Selector::All);
        let expected: Vec<_> = catalog.items().iter().collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_filter_by_category() {
        let river = filter(Catalog::builtin(), River.into());
        assert_eq!(ids(&river), vec!["river-day", "river-night"]);
    }

    #[test]
    fn test_filter_preserves_declaration_order() {
        let food = filter_by_label(Catalog::builtin(), "food");
        assert_eq!(
            ids(&food),
            vec!["breakfast", "mookata", "grilled-fish", "grilled-prawn", "grilled-squid"]
        );
    }

    #[test]
    fn test_unrecognized_label_returns_empty() {
        for label in ["morning", "evening", "night", "rooms", "", "ALL", "Food"] {
            assert!(
                filter_by_label(Catalog::builtin(), label).is_empty(),
                "label {:?} matched items",
                label
            );
        }
    }

    #[test]
    fn test_multi_category_items_appear_in_each() {
        let items = vec![
            ContentItem {
                id: "deck",
                src: "/images/deck.jpg",
                text: crate::i18n::LocalizedText::new("River deck", "ระเบียงริมน้ำ"),
                categories: &[Overview, River],
                priority: false,
            },
            ContentItem {
                id: "bbq",
                src: "/images/bbq.jpg",
                text: crate::i18n::LocalizedText::new("BBQ", "บาร์บีคิว"),
                categories: &[Food],
                priority: false,
            },
        ];
        let catalog = Catalog::new(items, vec![]).unwrap();

        assert_eq!(ids(&filter(&catalog, Overview.into())), vec!["deck"]);
        assert_eq!(ids(&filter(&catalog, River.into())), vec!["deck"]);
        assert!(filter(&catalog, NordicRoom.into()).is_empty());
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse("all"), Selector::All);
        assert_eq!(Selector::parse("japanRoom"), Selector::Category(JapanRoom));
        assert_eq!(Selector::parse("japan"), Selector::Unrecognized);
    }

    // ==================== sections Tests ====================

    #[test]
    fn test_sections_follow_display_order() {
        let categories: Vec<_> = sections(Catalog::builtin())
            .iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(categories, CategoryTag::ALL.to_vec());
    }

    #[test]
    fn test_sections_skip_empty_categories() {
        let items = vec![ContentItem {
            id: "only",
            src: "/images/only.jpg",
            text: crate::i18n::LocalizedText::new("Only", "เท่านั้น"),
            categories: &[Food],
            priority: false,
        }];
        let catalog = Catalog::new(items, vec![]).unwrap();
        let sections = sections(&catalog);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, Food);
    }

    // ==================== Lightbox Tests ====================

    #[test]
    fn test_next_and_previous() {
        let all = filter(Catalog::builtin(), Selector::All);
        assert_eq!(next(&all, "garden-evening").unwrap().id, "garden-night");
        assert_eq!(previous(&all, "garden-evening").unwrap().id, "resort-panorama");
    }

    #[test]
    fn test_lightbox_wraps_around() {
        let all = filter(Catalog::builtin(), Selector::All);
        assert_eq!(next(&all, "grilled-squid").unwrap().id, "resort-panorama");
        assert_eq!(previous(&all, "resort-panorama").unwrap().id, "grilled-squid");
    }

    #[test]
    fn test_lightbox_single_item_points_to_itself() {
        let river = filter(Catalog::builtin(), River.into());
        let single = &river[..1];
        assert_eq!(next(single, "river-day").unwrap().id, "river-day");
        assert_eq!(previous(single, "river-day").unwrap().id, "river-day");
    }

    #[test]
    fn test_lightbox_unknown_id() {
        let all = filter(Catalog::builtin(), Selector::All);
        assert!(next(&all, "nope").is_none());
        assert!(previous(&[], "nope").is_none());
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_filter_is_exact(index in 0usize..CategoryTag::ALL.len()) {
            let catalog = Catalog::builtin();
            let tag = CategoryTag::ALL[index];
            let result = filter(catalog, tag.into());

            prop_assert!(result.iter().all(|item| item.has_category(tag)));
            let expected = catalog.items().iter().filter(|item| item.has_category(tag)).count();
            prop_assert_eq!(result.len(), expected);
        }

        #[test]
        fn prop_filter_is_idempotent(label in "[a-zA-Z]{0,12}") {
            let catalog = Catalog::builtin();
            prop_assert_eq!(filter_by_label(catalog, &label), filter_by_label(catalog, &label));
        }
    }
}
