//! Chat screen state: contact directory, per-contact threads, the draft
//! being typed, reply mode and the emoji overlay.

use chrono::Utc;
use crossterm::event::Event;
use log::{debug, info};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::emoji::EmojiPicker;
use crate::models::{seed_contacts, seed_messages, Contact, Message, MessageStore, User, SELF_CONTACT_ID};

pub struct ChatView {
    user: User,
    contacts: Vec<Contact>,
    selected: Option<usize>,
    store: MessageStore,
    draft: Input,
    reply_mode: bool,
    emoji_picker: Option<EmojiPicker>,
    emoji_category: String,
}

impl ChatView {
    pub fn new(user: User, emoji_category: &str) -> Self {
        let now = Utc::now();
        let contacts = seed_contacts(&user, now);
        let store = seed_messages(&contacts, now);
        info!("Chat view opened for {} with {} contacts", user.username, contacts.len());
        ChatView {
            user,
            contacts,
            selected: None,
            store,
            draft: Input::default(),
            reply_mode: false,
            emoji_picker: None,
            emoji_category: emoji_category.to_string(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn thread(&self, contact_id: &str) -> &[Message] {
        self.store.thread(contact_id)
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.selected.map(|i| &self.contacts[i])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn select_contact(&mut self, contact_id: &str) -> bool {
        match self.contacts.iter().position(|c| c.id == contact_id) {
            Some(index) => {
                self.select_index(index);
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        let next = match self.selected {
            Some(i) => (i + 1) % self.contacts.len(),
            None => 0,
        };
        self.select_index(next);
    }

    pub fn select_previous(&mut self) {
        let len = self.contacts.len();
        let previous = match self.selected {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.select_index(previous);
    }

    fn select_index(&mut self, index: usize) {
        if self.selected != Some(index) {
            debug!("UI: Selected contact {}", self.contacts[index].id);
        }
        self.selected = Some(index);
    }

    /// Messages of the selected contact, empty while nothing is selected
    pub fn current_messages(&self) -> &[Message] {
        match self.selected_contact() {
            Some(contact) => self.store.thread(&contact.id),
            None => &[],
        }
    }

    pub fn draft(&self) -> &str {
        self.draft.value()
    }

    pub fn draft_cursor(&self) -> usize {
        self.draft.cursor()
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = Input::new(text.to_string());
    }

    pub fn handle_draft_event(&mut self, event: &Event) {
        self.draft.handle_event(event);
    }

    pub fn draft_placeholder(&self) -> String {
        match self.selected_contact() {
            Some(contact) if self.reply_mode => format!("Reply as {}...", contact.username),
            Some(contact) if contact.is_self() => "Message yourself...".to_string(),
            Some(contact) => format!("Message {}...", contact.username),
            None => String::new(),
        }
    }

    pub fn can_send(&self) -> bool {
        self.selected.is_some() && !self.draft.value().trim().is_empty()
    }

    /// Append the draft to a thread.
    ///
    /// With reply mode off the message is ours and lands in the selected
    /// contact's thread. With reply mode on it is attributed to the selected
    /// contact and lands in the self thread; reply mode is then switched off
    /// and the selection moves to self.
    pub fn send_message(&mut self) -> Option<&Message> {
        let contact = self.selected_contact()?.clone();
        if self.draft.value().trim().is_empty() {
            return None;
        }

        let text = self.draft.value().to_string();
        let replying = self.reply_mode;
        let (sender, target) = if replying {
            (contact.username.as_str(), SELF_CONTACT_ID)
        } else {
            (self.user.username.as_str(), contact.id.as_str())
        };
        let message = Message::new(&text, sender, !replying);
        let target = target.to_string();
        debug!("UI: Appending message {} to thread {}", message.id, target);

        self.draft = Input::default();
        self.emoji_picker = None;

        if replying {
            self.reply_mode = false;
            self.select_contact(SELF_CONTACT_ID);
        }

        Some(self.store.append(&target, message))
    }

    pub fn is_reply_mode(&self) -> bool {
        self.reply_mode
    }

    /// Reply mode is only offered while a contact other than self is selected
    pub fn can_reply(&self) -> bool {
        self.selected_contact().map_or(false, |c| !c.is_self())
    }

    pub fn toggle_reply_mode(&mut self) -> bool {
        if !self.can_reply() {
            return false;
        }
        self.reply_mode = !self.reply_mode;
        self.draft = Input::default();
        info!("UI: Reply mode {}", if self.reply_mode { "enabled" } else { "disabled" });
        true
    }

    pub fn emoji_picker(&self) -> Option<&EmojiPicker> {
        self.emoji_picker.as_ref()
    }

    pub fn emoji_picker_mut(&mut self) -> Option<&mut EmojiPicker> {
        self.emoji_picker.as_mut()
    }

    pub fn is_emoji_picker_open(&self) -> bool {
        self.emoji_picker.is_some()
    }

    pub fn toggle_emoji_picker(&mut self) {
        self.emoji_picker = match self.emoji_picker {
            Some(_) => None,
            None => Some(EmojiPicker::new(&self.emoji_category)),
        };
    }

    pub fn close_emoji_picker(&mut self) {
        self.emoji_picker = None;
    }

    /// Append `emoji` to the draft and close the picker
    pub fn insert_emoji(&mut self, emoji: &str) {
        let text = format!("{}{}", self.draft.value(), emoji);
        self.draft = Input::new(text);
        self.emoji_picker = None;
    }

    /// Insert whatever the open picker has highlighted
    pub fn pick_highlighted_emoji(&mut self) -> bool {
        match self.emoji_picker.as_ref().and_then(|p| p.highlighted()) {
            Some(emoji) => {
                self.insert_emoji(emoji);
                true
            }
            None => false,
        }
    }
}
