//! Sign-in / sign-up form state.
//!
//! The form never validates credentials itself. Apart from refusing to submit
//! while a required field is empty, it hands the entered values to an
//! [`AuthHandler`] exactly as typed.

use crossterm::event::Event;
use log::debug;
use tui_input::{backend::crossterm::EventHandler, Input};

/// Collaborator that receives submitted credentials.
///
/// This is where a real backend would be plugged in. Calls are assumed to
/// succeed.
pub trait AuthHandler {
    fn login(&mut self, email: &str, password: &str);
    fn register(&mut self, email: &str, password: &str, username: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Email,
    Password,
}

impl AuthField {
    pub fn placeholder(self) -> &'static str {
        match self {
            AuthField::Username => "Username",
            AuthField::Email => "Email address",
            AuthField::Password => "Password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The handler was invoked
    Sent,
    /// A required field was empty; nothing was sent
    Blocked(AuthField),
}

pub struct AuthForm {
    email: Input,
    password: Input,
    username: Input,
    mode: AuthMode,
    show_password: bool,
    busy: bool,
    focus: AuthField,
    missing: Option<AuthField>,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthForm {
    pub fn new() -> Self {
        AuthForm {
            email: Input::default(),
            password: Input::default(),
            username: Input::default(),
            mode: AuthMode::SignIn,
            show_password: false,
            busy: false,
            focus: AuthField::Email,
            missing: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_sign_in(&self) -> bool {
        self.mode == AuthMode::SignIn
    }

    /// Switch between sign-in and sign-up. Entered values are kept.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.missing = None;
        if !self.visible_fields().contains(&self.focus) {
            self.focus = AuthField::Email;
        }
        debug!("Auth form switched to {:?}", self.mode);
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Fields shown in the current mode, top to bottom
    pub fn visible_fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::SignIn => &[AuthField::Email, AuthField::Password],
            AuthMode::SignUp => &[AuthField::Username, AuthField::Email, AuthField::Password],
        }
    }

    pub fn value(&self, field: AuthField) -> &str {
        self.input(field).value()
    }

    pub fn cursor(&self, field: AuthField) -> usize {
        self.input(field).cursor()
    }

    pub fn set_value(&mut self, field: AuthField, value: &str) {
        *self.input_mut(field) = Input::new(value.to_string());
        if self.missing == Some(field) && !value.is_empty() {
            self.missing = None;
        }
    }

    pub fn focus(&self) -> AuthField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.shift_focus(1);
    }

    pub fn focus_previous(&mut self) {
        let len = self.visible_fields().len();
        self.shift_focus(len - 1);
    }

    fn shift_focus(&mut self, by: usize) {
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(current + by) % fields.len()];
    }

    /// Feed a terminal event to the focused field
    pub fn handle_event(&mut self, event: &Event) {
        let field = self.focus;
        if let Some(change) = self.input_mut(field).handle_event(event) {
            if change.value && self.missing == Some(field) && !self.value(field).is_empty() {
                self.missing = None;
            }
        }
    }

    /// Field currently flagged as "please fill out this field", if any
    pub fn missing_field(&self) -> Option<AuthField> {
        self.missing
    }

    pub fn first_missing(&self) -> Option<AuthField> {
        self.visible_fields()
            .iter()
            .copied()
            .find(|f| self.value(*f).is_empty())
    }

    pub fn submit(&mut self, handler: &mut dyn AuthHandler) -> Submission {
        if let Some(field) = self.first_missing() {
            debug!("Auth submission blocked, {:?} is empty", field);
            self.missing = Some(field);
            self.focus = field;
            return Submission::Blocked(field);
        }

        self.missing = None;
        self.busy = true;
        match self.mode {
            AuthMode::SignIn => handler.login(self.email.value(), self.password.value()),
            AuthMode::SignUp => handler.register(
                self.email.value(),
                self.password.value(),
                self.username.value(),
            ),
        }
        self.busy = false;
        Submission::Sent
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::SignIn => "Welcome Back",
            AuthMode::SignUp => "Join ChatFlow",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self.mode {
            AuthMode::SignIn => "Sign in to continue chatting",
            AuthMode::SignUp => "Create your account to get started",
        }
    }

    pub fn submit_caption(&self) -> &'static str {
        if self.busy {
            return "Please wait...";
        }
        match self.mode {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        }
    }

    /// (question, action) pair for the mode switch link
    pub fn toggle_prompt(&self) -> (&'static str, &'static str) {
        match self.mode {
            AuthMode::SignIn => ("Don't have an account?", "Sign up"),
            AuthMode::SignUp => ("Already have an account?", "Sign in"),
        }
    }

    fn input(&self, field: AuthField) -> &Input {
        match field {
            AuthField::Username => &self.username,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    fn input_mut(&mut self, field: AuthField) -> &mut Input {
        match field {
            AuthField::Username => &mut self.username,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps_over_visible_fields() {
        let mut form = AuthForm::new();
        assert_eq!(form.focus(), AuthField::Email);
        form.focus_next();
        assert_eq!(form.focus(), AuthField::Password);
        form.focus_next();
        assert_eq!(form.focus(), AuthField::Email);

        form.toggle_mode();
        form.focus_previous();
        assert_eq!(form.focus(), AuthField::Username);
    }

    #[test]
    fn test_hidden_focus_moves_to_email() {
        let mut form = AuthForm::new();
        form.toggle_mode();
        form.focus_previous();
        assert_eq!(form.focus(), AuthField::Username);

        form.toggle_mode();
        assert_eq!(form.focus(), AuthField::Email);
    }

    #[test]
    fn test_captions_follow_mode() {
        let mut form = AuthForm::new();
        assert_eq!(form.submit_caption(), "Sign In");
        assert_eq!(form.toggle_prompt().1, "Sign up");
        form.toggle_mode();
        assert_eq!(form.title(), "Join ChatFlow");
        assert_eq!(form.submit_caption(), "Create Account");
    }

    #[test]
    fn test_filling_missing_field_clears_prompt() {
        struct Ignore;
        impl AuthHandler for Ignore {
            fn login(&mut self, _: &str, _: &str) {}
            fn register(&mut self, _: &str, _: &str, _: &str) {}
        }

        let mut form = AuthForm::new();
        form.set_value(AuthField::Email, "a@b.com");
        assert_eq!(form.submit(&mut Ignore), Submission::Blocked(AuthField::Password));
        assert_eq!(form.missing_field(), Some(AuthField::Password));
        assert_eq!(form.focus(), AuthField::Password);

        form.set_value(AuthField::Password, "x");
        assert_eq!(form.missing_field(), None);
    }
}
