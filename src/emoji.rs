//! Emoji catalog and the picker overlay state.
//!
//! The picker is created fresh every time the overlay opens and dropped when
//! it closes, so search text and the active category never outlive a single
//! opening.

use crossterm::event::Event;
use tui_input::{backend::crossterm::EventHandler, Input};

pub const DEFAULT_CATEGORY: &str = "smileys";

/// Number of symbols per row in the picker grid
pub const GRID_COLUMNS: usize = 8;

#[derive(Debug)]
pub struct EmojiCategory {
    pub key: &'static str,
    pub name: &'static str,
    pub emojis: &'static [&'static str],
}

impl EmojiCategory {
    /// Short caption for the category button: the first word of the name
    pub fn label(&self) -> &'static str {
        self.name.split(' ').next().unwrap_or(self.name)
    }

    fn matches(&self, emoji: &str, term: &str) -> bool {
        emoji.contains(term) || self.name.to_lowercase().contains(&term.to_lowercase())
    }
}

pub static CATEGORIES: [EmojiCategory; 6] = [
    EmojiCategory { key: "smileys", name: "Smileys & People", emojis: SMILEYS },
    EmojiCategory { key: "nature", name: "Animals & Nature", emojis: NATURE },
    EmojiCategory { key: "food", name: "Food & Drink", emojis: FOOD },
    EmojiCategory { key: "activities", name: "Activities", emojis: ACTIVITIES },
    EmojiCategory { key: "objects", name: "Objects", emojis: OBJECTS },
    EmojiCategory { key: "symbols", name: "Symbols", emojis: SYMBOLS },
];

pub fn category(key: &str) -> Option<&'static EmojiCategory> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Symbols from every category, in catalog order, whose literal contains
/// `term` or whose category name contains it (case-insensitive).
pub fn search(term: &str) -> Vec<&'static str> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.emojis.iter().copied().filter(move |e| c.matches(e, term)))
        .collect()
}

pub struct EmojiPicker {
    search: Input,
    active: usize,
    highlighted: usize,
}

impl EmojiPicker {
    /// Opens on `category_key`, or on the first category if the key is unknown
    pub fn new(category_key: &str) -> Self {
        let active = CATEGORIES
            .iter()
            .position(|c| c.key == category_key)
            .unwrap_or(0);
        EmojiPicker {
            search: Input::default(),
            active,
            highlighted: 0,
        }
    }

    pub fn search_term(&self) -> &str {
        self.search.value()
    }

    pub fn search_cursor(&self) -> usize {
        self.search.cursor()
    }

    pub fn is_searching(&self) -> bool {
        !self.search.value().is_empty()
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = Input::new(term.to_string());
        self.highlighted = 0;
    }

    /// Feed a terminal event to the search box
    pub fn handle_search_event(&mut self, event: &Event) {
        if let Some(change) = self.search.handle_event(event) {
            if change.value {
                self.highlighted = 0;
            }
        }
    }

    pub fn active_category(&self) -> &'static EmojiCategory {
        &CATEGORIES[self.active]
    }

    pub fn select_category(&mut self, key: &str) -> bool {
        match CATEGORIES.iter().position(|c| c.key == key) {
            Some(index) => {
                self.active = index;
                self.highlighted = 0;
                true
            }
            None => false,
        }
    }

    /// Category buttons are hidden while searching, so these are no-ops then
    pub fn next_category(&mut self) -> bool {
        if self.is_searching() {
            return false;
        }
        self.active = (self.active + 1) % CATEGORIES.len();
        self.highlighted = 0;
        true
    }

    pub fn previous_category(&mut self) -> bool {
        if self.is_searching() {
            return false;
        }
        self.active = (self.active + CATEGORIES.len() - 1) % CATEGORIES.len();
        self.highlighted = 0;
        true
    }

    pub fn visible(&self) -> Vec<&'static str> {
        if self.is_searching() {
            search(self.search.value())
        } else {
            self.active_category().emojis.to_vec()
        }
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&'static str> {
        self.visible().get(self.highlighted).copied()
    }

    /// Move the grid cursor by whole cells; the cursor stays on the grid
    pub fn move_highlight(&mut self, columns: isize, rows: isize) {
        let count = self.visible().len();
        if count == 0 {
            self.highlighted = 0;
            return;
        }
        let step = columns + rows * GRID_COLUMNS as isize;
        let target = self.highlighted as isize + step;
        self.highlighted = target.clamp(0, count as isize - 1) as usize;
    }
}

const SMILEYS: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊", "😇", "🥰", "😍", "🤩", "😘",
    "😗", "😚", "😙", "😋", "😛", "😜", "🤪", "😝", "🤑", "🤗", "🤭", "🤫", "🤔", "🤐", "🤨", "😐", "😑",
    "😶", "😏", "😒", "🙄", "😬", "🤥", "😔", "😪", "🤤", "😴", "😷", "🤒", "🤕", "🤢", "🤮", "🤧", "🥵",
    "🥶", "🥴", "😵", "🤯", "🤠", "🥳", "😎", "🤓", "🧐",
];

const NATURE: &[&str] = &[
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐽", "🐸", "🐵", "🙈",
    "🙉", "🙊", "🐒", "🐔", "🐧", "🐦", "🐤", "🐣", "🐥", "🦆", "🦅", "🦉", "🦇", "🐺", "🐗", "🐴", "🦄",
    "🐝", "🐛", "🦋", "🐌", "🐞", "🐜", "🦟", "🦗", "🕷", "🕸", "🦂", "🐢", "🐍", "🦎", "🦖", "🦕", "🐙",
    "🦑", "🦐", "🦞", "🦀", "🐡", "🐠", "🐟", "🦈", "🐳", "🐋", "🐊", "🐅", "🐆", "🦓", "🦍", "🦧", "🐘",
    "🦛", "🦏", "🐪", "🐫", "🦒", "🦘", "🐃", "🐂", "🐄", "🐎", "🐖", "🐏", "🐑", "🦙", "🐐", "🦌", "🐕",
    "🐩", "🦮", "🐕‍🦺", "🐈", "🐓", "🦃", "🦚", "🦜", "🦢", "🦩", "🕊", "🐇", "🦝", "🦨", "🦡", "🦦", "🦥",
    "🐁", "🐀", "🐿", "🦔",
];

const FOOD: &[&str] = &[
    "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🫐", "🍈", "🍒", "🍑", "🥭", "🍍", "🥥", "🥝", "🍅",
    "🍆", "🥑", "🥦", "🥬", "🥒", "🌶", "🫑", "🌽", "🥕", "🫒", "🧄", "🧅", "🥔", "🍠", "🥐", "🥯", "🍞",
    "🥖", "🥨", "🧀", "🥚", "🍳", "🧈", "🥞", "🧇", "🥓", "🥩", "🍗", "🍖", "🦴", "🌭", "🍔", "🍟", "🍕",
    "🫓", "🥪", "🥙", "🧆", "🌮", "🌯", "🫔", "🥗", "🥘", "🫕", "🥫", "🍝", "🍜", "🍲", "🍛", "🍣", "🍱",
    "🥟", "🦪", "🍤", "🍙", "🍚", "🍘", "🍥", "🥠", "🥮", "🍢", "🍡", "🍧", "🍨", "🍦", "🥧", "🧁", "🍰",
    "🎂", "🍮", "🍭", "🍬", "🍫", "🍿", "🍩", "🍪", "🌰", "🥜", "🍯",
];

const ACTIVITIES: &[&str] = &[
    "⚽", "🏀", "🏈", "⚾", "🥎", "🎾", "🏐", "🏉", "🥏", "🎱", "🪀", "🏓", "🏸", "🏒", "🏑", "🥍", "🏏",
    "🪃", "🥅", "⛳", "🪁", "🏹", "🎣", "🤿", "🥊", "🥋", "🎽", "🛹", "🛷", "⛸", "🥌", "🎿", "⛷", "🏂",
    "🪂", "🏋️‍♀️", "🏋️", "🏋️‍♂️", "🤼‍♀️", "🤼", "🤼‍♂️", "🤸‍♀️", "🤸", "🤸‍♂️", "⛹️‍♀️", "⛹️",
    "⛹️‍♂️", "🤺", "🤾‍♀️", "🤾", "🤾‍♂️", "🏌️‍♀️", "🏌️", "🏌️‍♂️", "🏇", "🧘‍♀️", "🧘", "🧘‍♂️",
    "🏄‍♀️", "🏄", "🏄‍♂️", "🏊‍♀️", "🏊", "🏊‍♂️", "🤽‍♀️", "🤽", "🤽‍♂️", "🚣‍♀️", "🚣", "🚣‍♂️",
    "🧗‍♀️", "🧗", "🧗‍♂️", "🚵‍♀️", "🚵", "🚵‍♂️", "🚴‍♀️", "🚴", "🚴‍♂️", "🏆", "🥇", "🥈", "🥉",
    "🏅", "🎖", "🏵", "🎗", "🎫", "🎟", "🎪", "🤹‍♀️", "🤹", "🤹‍♂️", "🎭", "🩰", "🎨", "🎬", "🎤", "🎧",
    "🎼", "🎵", "🎶", "🪘", "🥁", "🪗", "🎷", "🎺", "🪕", "🎸", "🪈", "🎻", "🎲", "♟", "🎯", "🎳", "🎮",
    "🎰", "🧩",
];

const OBJECTS: &[&str] = &[
    "⌚", "📱", "📲", "💻", "⌨", "🖥", "🖨", "🖱", "🖲", "🕹", "🗜", "💽", "💾", "💿", "📀", "📼", "📷",
    "📸", "📹", "🎥", "📽", "🎞", "📞", "☎", "📟", "📠", "📺", "📻", "🎙", "🎚", "🎛", "🧭", "⏱", "⏲",
    "⏰", "🕰", "⌛", "⏳", "📡", "🔋", "🔌", "💡", "🔦", "🕯", "🪔", "🧯", "🛢", "💸", "💵", "💴", "💶",
    "💷", "🪙", "💰", "💳", "💎", "⚖", "🪜", "🧰", "🔧", "🔨", "⚒", "🛠", "⛏", "🪓", "🪚", "🔩", "⚙",
    "🪤", "🧱", "⛓", "🧲", "🔫", "💣", "🧨", "🪓", "🔪", "🗡", "⚔", "🛡", "🚬", "⚰", "🪦", "⚱", "🏺",
    "🔮", "📿", "🧿", "💈", "⚗", "🔭", "🔬", "🕳", "🩹", "🩺", "💊", "💉", "🧬", "🦠", "🧫", "🧪", "🌡",
    "🧹", "🪠", "🧽", "🧴", "🛎", "🔑", "🗝", "🚪", "🪑", "🛋", "🛏", "🛌", "🧸", "🪆", "🖼", "🪞", "🪟",
    "🛍", "🛒", "🎁", "🎈", "🎏", "🎀", "🪄", "🪅", "🎊", "🎉", "🪩", "🎎", "🏮", "🎐", "🧧", "✉", "📩",
    "📨", "📧", "💌", "📥", "📤", "📦", "🏷", "🪧", "📪", "📫", "📬", "📭", "📮", "📯", "📜", "📃", "📄",
    "📑", "🧾", "📊", "📈", "📉", "🗒", "🗓", "📆", "📅", "🗑", "📇", "🗃", "🗳", "🗄", "📋", "📁", "📂",
    "🗂", "🗞", "📰", "📓", "📔", "📒", "📕", "📗", "📘", "📙", "📚", "📖", "🔖", "🧷", "🔗", "📎", "🖇",
    "📐", "📏", "🧮", "📌", "📍", "✂", "🖊", "🖋", "✒", "🖌", "🖍", "📝", "✏", "🔍", "🔎", "🔏", "🔐",
    "🔒", "🔓",
];

const SYMBOLS: &[&str] = &[
    "❤", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎", "💔", "❣", "💕", "💞", "💓", "💗", "💖", "💘",
    "💝", "💟", "☮", "✝", "☪", "🕉", "☸", "✡", "🔯", "🕎", "☯", "☦", "🛐", "⛎", "♈", "♉", "♊",
    "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓", "🆔", "⚛", "🉑", "☢", "☣", "📴", "📳", "🈶",
    "🈚", "🈸", "🈺", "🈷", "✴", "🆚", "💮", "🉐", "㊙", "㊗", "🈴", "🈵", "🈹", "🈲", "🅰", "🅱", "🆎",
    "🆑", "🅾", "🆘", "❌", "⭕", "🛑", "⛔", "📛", "🚫", "💯", "💢", "♨", "🚷", "🚯", "🚳", "🚱", "🔞",
    "📵", "🚭", "❗", "❕", "❓", "❔", "‼", "⁉", "🔅", "🔆", "〽", "⚠", "🚸", "🔱", "⚜", "🔰", "♻",
    "✅", "🈯", "💹", "❇", "✳", "❎", "🌐", "💠", "Ⓜ", "🌀", "💤", "🏧", "🚾", "♿", "🅿", "🛗", "🈳",
    "🈂", "🛂", "🛃", "🛄", "🛅", "🚹", "🚺", "🚼", "⚧", "🚻", "🚮", "🎦", "📶", "🈁", "🔣", "ℹ", "🔤",
    "🔡", "🔠", "🆖", "🆗", "🆙", "🆒", "🆕", "🆓", "0️⃣", "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣",
    "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        let labels: Vec<&str> = CATEGORIES.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Smileys", "Animals", "Food", "Activities", "Objects", "Symbols"]);
    }

    #[test]
    fn test_unknown_category_falls_back_to_first() {
        let picker = EmojiPicker::new("weather");
        assert_eq!(picker.active_category().key, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_highlight_is_clamped_to_grid() {
        let mut picker = EmojiPicker::new("smileys");
        picker.move_highlight(-1, -1);
        assert_eq!(picker.highlighted_index(), 0);

        picker.move_highlight(1, 1);
        assert_eq!(picker.highlighted_index(), GRID_COLUMNS + 1);
        assert_eq!(picker.highlighted(), Some(SMILEYS[GRID_COLUMNS + 1]));

        picker.move_highlight(0, 100);
        assert_eq!(picker.highlighted_index(), SMILEYS.len() - 1);
    }

    #[test]
    fn test_search_resets_highlight() {
        let mut picker = EmojiPicker::new("smileys");
        picker.move_highlight(3, 0);
        picker.set_search("drink");
        assert_eq!(picker.highlighted_index(), 0);
        assert_eq!(picker.highlighted(), Some(FOOD[0]));
    }

    #[test]
    fn test_empty_search_result_has_no_highlight() {
        let mut picker = EmojiPicker::new("smileys");
        picker.set_search("zzz-no-such-category");
        picker.move_highlight(1, 0);
        assert!(picker.visible().is_empty());
        assert_eq!(picker.highlighted(), None);
    }
}
