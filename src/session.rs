//! Root view: owns the signed-in user (if any) and decides which screen is
//! shown.

use log::info;

use crate::auth::{AuthForm, AuthHandler, Submission};
use crate::chat::ChatView;
use crate::config::Settings;
use crate::models::User;

/// Accepts every login and registration without checking anything
#[derive(Debug, Default)]
pub struct DemoAuthenticator {
    signed_in: Option<User>,
}

impl DemoAuthenticator {
    pub fn take_user(&mut self) -> Option<User> {
        self.signed_in.take()
    }
}

/// Username for a login: everything before the first '@'
pub fn username_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

impl AuthHandler for DemoAuthenticator {
    fn login(&mut self, email: &str, _password: &str) {
        info!("Login attempt for {}", email);
        self.signed_in = Some(User {
            email: email.to_string(),
            username: username_from_email(email),
        });
    }

    fn register(&mut self, email: &str, _password: &str, username: &str) {
        info!("Register attempt for {} as {}", email, username);
        self.signed_in = Some(User {
            email: email.to_string(),
            username: username.to_string(),
        });
    }
}

pub enum Screen {
    Auth(AuthForm),
    Chat(ChatView),
}

pub struct Session {
    screen: Screen,
    authenticator: DemoAuthenticator,
    emoji_category: String,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Session {
            screen: Screen::Auth(AuthForm::new()),
            authenticator: DemoAuthenticator::default(),
            emoji_category: settings.emoji_category.clone(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn user(&self) -> Option<&User> {
        match &self.screen {
            Screen::Chat(chat) => Some(chat.user()),
            Screen::Auth(_) => None,
        }
    }

    /// Submit the auth form; a successful submission opens the chat screen.
    /// Returns `None` when the chat screen is already showing.
    pub fn submit_auth(&mut self) -> Option<Submission> {
        let Screen::Auth(form) = &mut self.screen else {
            return None;
        };
        let outcome = form.submit(&mut self.authenticator);
        if let Some(user) = self.authenticator.take_user() {
            info!("Signed in as {} <{}>", user.username, user.email);
            self.screen = Screen::Chat(ChatView::new(user, &self.emoji_category));
        }
        Some(outcome)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user() {
            info!("Signed out {}", user.username);
        }
        self.screen = Screen::Auth(AuthForm::new());
    }
}
