// Common test utilities for integration tests
// This module contains shared code for all integration tests
#![allow(dead_code)]

use std::sync::Once;

use log::LevelFilter;

use chatflow::auth::AuthHandler;
use chatflow::chat::ChatView;
use chatflow::config::Settings;
use chatflow::emoji::DEFAULT_CATEGORY;
use chatflow::models::User;
use chatflow::session::Session;

// Initialize logging once
static INIT_LOGGER: Once = Once::new();

/// Set up the logger for the tests
pub fn setup_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();
    });
}

/// A call made to an [`AuthHandler`], as recorded by [`RecordingHandler`]
#[derive(Debug, Clone, PartialEq)]
pub enum AuthCall {
    Login { email: String, password: String },
    Register { email: String, password: String, username: String },
}

/// Auth collaborator that only remembers what it was called with
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub calls: Vec<AuthCall>,
}

impl AuthHandler for RecordingHandler {
    fn login(&mut self, email: &str, password: &str) {
        self.calls.push(AuthCall::Login {
            email: email.to_string(),
            password: password.to_string(),
        });
    }

    fn register(&mut self, email: &str, password: &str, username: &str) {
        self.calls.push(AuthCall::Register {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
        });
    }
}

pub fn test_user() -> User {
    User {
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
    }
}

pub fn chat_view() -> ChatView {
    setup_logging();
    ChatView::new(test_user(), DEFAULT_CATEGORY)
}

pub fn new_session() -> Session {
    setup_logging();
    Session::new(&Settings::default())
}
