// Emoji picker tests
// These tests verify category browsing and search over the fixed catalog

use chatflow::emoji::{self, EmojiPicker, CATEGORIES, DEFAULT_CATEGORY};

fn category_emojis(key: &str) -> Vec<&'static str> {
    emoji::category(key).expect("Known category").emojis.to_vec()
}

#[test]
fn test_catalog_shape() {
    let keys: Vec<&str> = CATEGORIES.iter().map(|c| c.key).collect();
    assert_eq!(keys, ["smileys", "nature", "food", "activities", "objects", "symbols"]);
    assert!(CATEGORIES.iter().all(|c| !c.emojis.is_empty()));
    assert_eq!(emoji::category("food").map(|c| c.name), Some("Food & Drink"));
}

#[test]
fn test_without_search_shows_active_category() {
    let mut picker = EmojiPicker::new(DEFAULT_CATEGORY);
    assert_eq!(picker.visible(), category_emojis("smileys"));

    assert!(picker.select_category("objects"));
    assert_eq!(picker.visible(), category_emojis("objects"));

    assert!(!picker.select_category("weather"));
    assert_eq!(picker.active_category().key, "objects");
}

/// A term found in exactly one category name returns just that category
#[test]
fn test_search_by_category_name() {
    let mut picker = EmojiPicker::new(DEFAULT_CATEGORY);

    picker.set_search("drink");
    assert_eq!(picker.visible(), category_emojis("food"));

    picker.set_search("NATURE");
    assert_eq!(picker.visible(), category_emojis("nature"));
}

/// A term matching several category names concatenates them in catalog order
#[test]
fn test_search_spans_categories() {
    // "s" appears in every category name except "Food & Drink"
    let found = emoji::search("s");
    let expected: Vec<&str> = ["smileys", "nature", "activities", "objects", "symbols"]
        .iter()
        .flat_map(|k| category_emojis(k))
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_search_by_symbol() {
    let found = emoji::search("🍕");
    assert_eq!(found, vec!["🍕"]);
}

#[test]
fn test_category_cycling() {
    let mut picker = EmojiPicker::new("symbols");
    assert!(picker.next_category());
    assert_eq!(picker.active_category().key, "smileys");
    assert!(picker.previous_category());
    assert_eq!(picker.active_category().key, "symbols");

    // Category buttons are hidden while a search is active
    picker.set_search("food");
    assert!(!picker.next_category());
    assert_eq!(picker.active_category().key, "symbols");
}

#[test]
fn test_clearing_search_restores_category() {
    let mut picker = EmojiPicker::new("activities");
    picker.set_search("symbols");
    assert!(picker.is_searching());
    picker.set_search("");
    assert!(!picker.is_searching());
    assert_eq!(picker.visible(), category_emojis("activities"));
}
