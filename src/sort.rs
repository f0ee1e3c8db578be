//! Display ordering and section grouping for list items.
//!
//! Unbought items come first, then bought ones; within each partition items
//! are ordered by section name using a collation-style comparison. Sorting is
//! stable so items that compare equal keep their server order.

use std::cmp::Ordering;

use serde::Serialize;
use unicase::UniCase;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::Item;

/// `s` decomposed with its combining marks dropped, so `É` compares as `E`.
fn base_letters(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Compare section names in three levels, like a locale collation does for
/// Latin labels: base letters ignoring accents and case, then accents, then
/// case with lower case first. Scripts with language-specific tailoring are
/// not handled. The order is total.
pub fn compare_sections(a: &str, b: &str) -> Ordering {
    UniCase::new(base_letters(a))
        .cmp(&UniCase::new(base_letters(b)))
        .then_with(|| UniCase::new(a).cmp(&UniCase::new(b)))
        .then_with(|| b.cmp(a))
}

fn compare_items(a: &Item, b: &Item) -> Ordering {
    a.bought
        .cmp(&b.bought)
        .then_with(|| compare_sections(a.display_section(), b.display_section()))
}

/// Sort items in place into display order
pub fn sort_items(items: &mut [Item]) {
    items.sort_by(compare_items);
}

/// Items in display order, borrowed from the input
pub fn display_order(items: &[Item]) -> Vec<&Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by(|a, b| compare_items(a, b));
    ordered
}

/// A run of consecutive display-ordered items sharing a section and bought state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionGroup<'a> {
    pub section: &'a str,
    pub bought: bool,
    pub items: Vec<&'a Item>,
}

/// Group items for display, preserving display order.
pub fn group_by_section(items: &[Item]) -> Vec<SectionGroup<'_>> {
    let mut groups: Vec<SectionGroup<'_>> = Vec::new();

    for item in display_order(items) {
        let section = item.display_section();
        match groups.last_mut() {
            Some(group) if group.bought == item.bought && unicase::eq(group.section, section) => {
                group.items.push(item);
            }
            _ => groups.push(SectionGroup {
                section,
                bought: item.bought,
                items: vec![item],
            }),
        }
    }

    groups
}
