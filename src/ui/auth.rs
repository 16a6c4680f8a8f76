// SPDX-License-Identifier: MPL-2.0
//! Sign-in, registration, and password recovery forms.
//!
//! Client-side validation (empty fields, password confirmation mismatch,
//! minimum length) runs before any request is sent; server-side validation
//! failures are shown inline using the first field error.

use crate::api::types::AuthSession;
use crate::api::{ApiClient, ApiError};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Task};

/// Minimum password length accepted by the backend.
const MIN_PASSWORD_LEN: usize = 8;

/// Which form is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
}

#[derive(Debug, Clone)]
pub enum Message {
    SwitchMode(Mode),
    NameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmationChanged(String),
    ResetTokenChanged(String),
    Submit,
    SignedIn(Result<AuthSession, ApiError>),
    RequestDone(Result<(), ApiError>),
}

/// Events propagated to the application root.
pub enum Event {
    None,
    SignedIn(Box<AuthSession>),
    Notify(Notification),
}

#[derive(Debug, Default)]
pub struct State {
    mode: Mode,
    name: String,
    email: String,
    password: String,
    confirmation: String,
    reset_token: String,
    /// Inline form error (client-side or first server field error).
    error: Option<String>,
    busy: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the current form without touching the network.
    /// Returns the first problem found, if any.
    fn validate(&self) -> Option<String> {
        if self.email.trim().is_empty() {
            return Some("Email is required".to_string());
        }
        if !self.email.contains('@') {
            return Some("Enter a valid email address".to_string());
        }
        match self.mode {
            Mode::Login => {
                if self.password.is_empty() {
                    return Some("Password is required".to_string());
                }
            }
            Mode::Register => {
                if self.name.trim().is_empty() {
                    return Some("Name is required".to_string());
                }
                if self.password.len() < MIN_PASSWORD_LEN {
                    return Some(format!(
                        "Password must be at least {MIN_PASSWORD_LEN} characters"
                    ));
                }
                if self.password != self.confirmation {
                    return Some("Passwords do not match".to_string());
                }
            }
            Mode::ForgotPassword => {}
            Mode::ResetPassword => {
                if self.reset_token.trim().is_empty() {
                    return Some("Reset code is required".to_string());
                }
                if self.password.len() < MIN_PASSWORD_LEN {
                    return Some(format!(
                        "Password must be at least {MIN_PASSWORD_LEN} characters"
                    ));
                }
                if self.password != self.confirmation {
                    return Some("Passwords do not match".to_string());
                }
            }
        }
        None
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::SwitchMode(mode) => {
                self.mode = mode;
                self.error = None;
                self.password.clear();
                self.confirmation.clear();
                (Event::None, Task::none())
            }
            Message::NameChanged(value) => {
                self.name = value;
                (Event::None, Task::none())
            }
            Message::EmailChanged(value) => {
                self.email = value;
                (Event::None, Task::none())
            }
            Message::PasswordChanged(value) => {
                self.password = value;
                (Event::None, Task::none())
            }
            Message::ConfirmationChanged(value) => {
                self.confirmation = value;
                (Event::None, Task::none())
            }
            Message::ResetTokenChanged(value) => {
                self.reset_token = value;
                (Event::None, Task::none())
            }
            Message::Submit => {
                if self.busy {
                    return (Event::None, Task::none());
                }
                if let Some(problem) = self.validate() {
                    self.error = Some(problem);
                    return (Event::None, Task::none());
                }
                self.error = None;
                self.busy = true;
                (Event::None, self.submit_task(api))
            }
            Message::SignedIn(result) => {
                self.busy = false;
                match result {
                    Ok(session) => {
                        self.password.clear();
                        self.confirmation.clear();
                        (Event::SignedIn(Box::new(session)), Task::none())
                    }
                    Err(error) => {
                        self.error = Some(
                            error
                                .first_field_error()
                                .map(str::to_string)
                                .unwrap_or_else(|| error.to_string()),
                        );
                        (Event::None, Task::none())
                    }
                }
            }
            Message::RequestDone(result) => {
                self.busy = false;
                match result {
                    Ok(()) => {
                        let event = match self.mode {
                            Mode::ForgotPassword => {
                                self.mode = Mode::ResetPassword;
                                Event::Notify(Notification::info(
                                    "Check your email for the reset code",
                                ))
                            }
                            Mode::ResetPassword => {
                                self.mode = Mode::Login;
                                self.password.clear();
                                self.confirmation.clear();
                                Event::Notify(Notification::success(
                                    "Password updated, sign in with the new one",
                                ))
                            }
                            _ => Event::None,
                        };
                        (event, Task::none())
                    }
                    Err(error) => {
                        self.error = Some(
                            error
                                .first_field_error()
                                .map(str::to_string)
                                .unwrap_or_else(|| error.to_string()),
                        );
                        (Event::None, Task::none())
                    }
                }
            }
        }
    }

    fn submit_task(&self, api: &ApiClient) -> Task<Message> {
        let api = api.clone();
        let email = self.email.trim().to_string();
        let password = self.password.clone();
        let confirmation = self.confirmation.clone();

        match self.mode {
            Mode::Login => Task::perform(
                async move { api.login(&email, &password).await },
                Message::SignedIn,
            ),
            Mode::Register => {
                let name = self.name.trim().to_string();
                Task::perform(
                    async move { api.register(&name, &email, &password, &confirmation).await },
                    Message::SignedIn,
                )
            }
            Mode::ForgotPassword => Task::perform(
                async move { api.forgot_password(&email).await },
                Message::RequestDone,
            ),
            Mode::ResetPassword => {
                let token = self.reset_token.trim().to_string();
                Task::perform(
                    async move {
                        api.reset_password(&token, &email, &password, &confirmation)
                            .await
                    },
                    Message::RequestDone,
                )
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let title = match self.mode {
            Mode::Login => "Sign in",
            Mode::Register => "Create account",
            Mode::ForgotPassword => "Forgot password",
            Mode::ResetPassword => "Reset password",
        };

        let mut form = Column::new()
            .spacing(spacing::SM)
            .width(Length::Fixed(sizing::FORM_WIDTH))
            .push(Text::new(title).size(typography::TITLE_MD));

        if let Some(error) = &self.error {
            form = form.push(
                Text::new(error.clone())
                    .size(typography::BODY_SM)
                    .style(|theme: &iced::Theme| iced::widget::text::Style {
                        color: Some(theme.extended_palette().danger.base.color),
                    }),
            );
        }

        if self.mode == Mode::Register {
            form = form.push(
                text_input("Name", &self.name)
                    .on_input(Message::NameChanged)
                    .padding(spacing::XS),
            );
        }

        form = form.push(
            text_input("Email", &self.email)
                .on_input(Message::EmailChanged)
                .padding(spacing::XS),
        );

        if self.mode == Mode::ResetPassword {
            form = form.push(
                text_input("Reset code", &self.reset_token)
                    .on_input(Message::ResetTokenChanged)
                    .padding(spacing::XS),
            );
        }

        if self.mode != Mode::ForgotPassword {
            form = form.push(
                text_input("Password", &self.password)
                    .on_input(Message::PasswordChanged)
                    .secure(true)
                    .padding(spacing::XS),
            );
        }

        if matches!(self.mode, Mode::Register | Mode::ResetPassword) {
            form = form.push(
                text_input("Confirm password", &self.confirmation)
                    .on_input(Message::ConfirmationChanged)
                    .secure(true)
                    .padding(spacing::XS),
            );
        }

        let submit_label = if self.busy {
            "Please wait..."
        } else {
            match self.mode {
                Mode::Login => "Sign in",
                Mode::Register => "Create account",
                Mode::ForgotPassword => "Send reset email",
                Mode::ResetPassword => "Set new password",
            }
        };
        let mut submit = button(
            Text::new(submit_label).align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .padding(spacing::XS)
        .style(styles::button::primary);
        if !self.busy {
            submit = submit.on_press(Message::Submit);
        }
        form = form.push(submit);

        form = form.push(self.footer_links());

        Container::new(Container::new(form).padding(spacing::LG).style(styles::container::card))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into()
    }

    fn footer_links(&self) -> Element<'_, Message> {
        let link = |label: &'static str, mode: Mode| {
            button(Text::new(label).size(typography::BODY_SM))
                .on_press(Message::SwitchMode(mode))
                .padding(spacing::XXS)
                .style(styles::button::link)
        };

        let row = match self.mode {
            Mode::Login => Row::new()
                .push(link("Create account", Mode::Register))
                .push(link("Forgot password?", Mode::ForgotPassword)),
            Mode::Register | Mode::ForgotPassword | Mode::ResetPassword => {
                Row::new().push(link("Back to sign in", Mode::Login))
            }
        };

        row.spacing(spacing::MD).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8000", "http://localhost:8000/storage")
            .expect("client construction should not fail")
    }

    fn type_credentials(state: &mut State, email: &str, password: &str) {
        let api = api();
        let _ = state.update(Message::EmailChanged(email.to_string()), &api);
        let _ = state.update(Message::PasswordChanged(password.to_string()), &api);
    }

    #[test]
    fn empty_login_is_rejected_client_side() {
        let mut state = State::new();
        let (event, _) = state.update(Message::Submit, &api());

        assert!(matches!(event, Event::None));
        assert!(state.error().is_some());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut state = State::new();
        type_credentials(&mut state, "not-an-email", "password123");
        let _ = state.update(Message::Submit, &api());
        assert_eq!(state.error(), Some("Enter a valid email address"));
    }

    #[test]
    fn register_requires_matching_passwords() {
        let mut state = State::new();
        let api = api();
        let _ = state.update(Message::SwitchMode(Mode::Register), &api);
        let _ = state.update(Message::NameChanged("Mai".into()), &api);
        type_credentials(&mut state, "mai@example.com", "password123");
        let _ = state.update(Message::ConfirmationChanged("different".into()), &api);

        let _ = state.update(Message::Submit, &api);
        assert_eq!(state.error(), Some("Passwords do not match"));
    }

    #[test]
    fn short_password_is_rejected_on_register() {
        let mut state = State::new();
        let api = api();
        let _ = state.update(Message::SwitchMode(Mode::Register), &api);
        let _ = state.update(Message::NameChanged("Mai".into()), &api);
        type_credentials(&mut state, "mai@example.com", "short");
        let _ = state.update(Message::ConfirmationChanged("short".into()), &api);

        let _ = state.update(Message::Submit, &api);
        assert!(state
            .error()
            .is_some_and(|error| error.contains("at least")));
    }

    #[test]
    fn server_validation_error_is_shown_inline() {
        let mut state = State::new();
        let mut errors = std::collections::BTreeMap::new();
        errors.insert(
            "email".to_string(),
            vec!["The email has already been taken.".to_string()],
        );

        let (event, _) = state.update(
            Message::SignedIn(Err(ApiError::Validation {
                message: "The given data was invalid.".into(),
                errors,
            })),
            &api(),
        );

        assert!(matches!(event, Event::None));
        assert_eq!(state.error(), Some("The email has already been taken."));
    }

    #[test]
    fn switching_mode_clears_password_and_error() {
        let mut state = State::new();
        type_credentials(&mut state, "mai@example.com", "password123");
        state.error = Some("old".into());

        let _ = state.update(Message::SwitchMode(Mode::Register), &api());
        assert!(state.error().is_none());
        assert!(state.password.is_empty());
    }

    #[test]
    fn forgot_password_flow_advances_to_reset() {
        let mut state = State::new();
        let api = api();
        let _ = state.update(Message::SwitchMode(Mode::ForgotPassword), &api);
        let (event, _) = state.update(Message::RequestDone(Ok(())), &api);

        assert!(matches!(event, Event::Notify(_)));
        assert_eq!(state.mode(), Mode::ResetPassword);
    }
}
