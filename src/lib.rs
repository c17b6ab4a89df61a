// Re-export needed modules for testing
pub mod models;
pub mod auth;
pub mod chat;
pub mod emoji;
pub mod session;
pub mod config;

// Re-export main types for convenience
pub use models::*;
pub use session::{Screen, Session};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn test_user() -> User {
        User {
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_seeded_contacts() {
        let now = Utc::now();
        let contacts = seed_contacts(&test_user(), now);

        let ids: Vec<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["me", "1", "2", "3"]);

        assert!(contacts[0].is_self());
        assert_eq!(contacts[0].display_name(), "alice (You)");
        assert_eq!(contacts[1].display_name(), "John Doe");

        // Only Jane is offline, seen five minutes ago
        assert!(!contacts[2].is_online);
        assert_eq!(contacts[2].presence_label(now), "5m ago");
        assert_eq!(contacts[3].presence_label(now), "online");
    }

    #[test]
    fn test_seeded_store_has_entry_per_contact() {
        let now = Utc::now();
        let contacts = seed_contacts(&test_user(), now);
        let store = seed_messages(&contacts, now);

        for contact in &contacts {
            assert!(store.contains(&contact.id), "No thread for {}", contact.id);
        }
        assert!(store.thread("me").is_empty());
        assert!(store.thread("3").is_empty());

        let john = store.thread("1");
        assert_eq!(john.len(), 1);
        assert_eq!(john[0].text, "Hey there! How are you?");
        assert_eq!(john[0].sender, "John Doe");
        assert!(!john[0].is_own);
        assert_eq!(john[0].timestamp, now - Duration::hours(1));

        assert_eq!(store.preview("2"), "Good morning!");
        assert_eq!(store.preview("3"), "No messages yet");
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let contacts = seed_contacts(&test_user(), Utc::now());
        let mut store = MessageStore::for_contacts(&contacts);

        store.append("3", Message::new("first", "alice", true));
        store.append("3", Message::new("second", "alice", true));

        let texts: Vec<&str> = store.thread("3").iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(store.last("3").map(|m| m.text.as_str()), Some("second"));
        assert!(store.thread("1").is_empty());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::new("hi", "alice", true);
        let b = Message::new("hi", "alice", true);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_last_seen_formatting() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();

        assert_eq!(format_last_seen(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_last_seen(now - Duration::minutes(1), now), "1m ago");
        assert_eq!(format_last_seen(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_last_seen(now - Duration::minutes(60), now), "1h ago");
        assert_eq!(format_last_seen(now - Duration::minutes(1439), now), "23h ago");

        // A week back falls through to a calendar date
        let label = format_last_seen(now - Duration::days(7), now);
        assert!(label.starts_with("2024-05-0"), "Unexpected label {}", label);
    }
}
