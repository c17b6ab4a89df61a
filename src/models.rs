use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, Utc};
use uuid::Uuid;

/// Contact id reserved for the signed-in user's own thread
pub const SELF_CONTACT_ID: &str = "me";

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: String,
    pub username: String,
    pub email: String,
    pub last_seen: DateTime<Utc>,
    pub is_online: bool,
}

impl Contact {
    pub fn is_self(&self) -> bool {
        self.id == SELF_CONTACT_ID
    }

    /// Name shown in the contact list and chat header
    pub fn display_name(&self) -> String {
        if self.is_self() {
            format!("{} (You)", self.username)
        } else {
            self.username.clone()
        }
    }

    pub fn presence_label(&self, now: DateTime<Utc>) -> String {
        if self.is_online {
            "online".to_string()
        } else {
            format_last_seen(self.last_seen, now)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    pub is_own: bool,
}

impl Message {
    pub fn new(text: &str, sender: &str, is_own: bool) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            sender: sender.to_string(),
            timestamp: Utc::now(),
            is_own,
        }
    }
}

/// Per-contact message history.
///
/// Every contact the store was seeded with keeps an entry, possibly empty,
/// and threads only ever grow at the end.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    threads: HashMap<String, Vec<Message>>,
}

impl MessageStore {
    pub fn for_contacts(contacts: &[Contact]) -> Self {
        let threads = contacts
            .iter()
            .map(|c| (c.id.clone(), Vec::new()))
            .collect();
        MessageStore { threads }
    }

    pub fn thread(&self, contact_id: &str) -> &[Message] {
        self.threads
            .get(contact_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn append(&mut self, contact_id: &str, message: Message) -> &Message {
        let thread = self.threads.entry(contact_id.to_string()).or_default();
        thread.push(message);
        &thread[thread.len() - 1]
    }

    pub fn last(&self, contact_id: &str) -> Option<&Message> {
        self.thread(contact_id).last()
    }

    pub fn contains(&self, contact_id: &str) -> bool {
        self.threads.contains_key(contact_id)
    }

    /// Text of the newest message in a thread, for the contact list
    pub fn preview(&self, contact_id: &str) -> &str {
        self.last(contact_id)
            .map(|m| m.text.as_str())
            .unwrap_or("No messages yet")
    }
}

/// The fixed demo directory: the user first, then three simulated peers.
pub fn seed_contacts(user: &User, now: DateTime<Utc>) -> Vec<Contact> {
    let peer = |id: &str, username: &str, email: &str, last_seen, is_online| Contact {
        id: id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        last_seen,
        is_online,
    };

    vec![
        peer(SELF_CONTACT_ID, &user.username, &user.email, now, true),
        peer("1", "John Doe", "john@example.com", now, true),
        peer("2", "Jane Smith", "jane@example.com", now - Duration::minutes(5), false),
        peer("3", "Mike Johnson", "mike@example.com", now, true),
    ]
}

pub fn seed_messages(contacts: &[Contact], now: DateTime<Utc>) -> MessageStore {
    let mut store = MessageStore::for_contacts(contacts);
    let greetings = [
        ("1", "Hey there! How are you?", "John Doe", Duration::hours(1)),
        ("2", "Good morning!", "Jane Smith", Duration::hours(2)),
    ];
    for (contact_id, text, sender, age) in greetings {
        let mut message = Message::new(text, sender, false);
        message.timestamp = now - age;
        store.append(contact_id, message);
    }
    store
}

pub fn format_last_seen(last_seen: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - last_seen).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        last_seen.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
