// SPDX-License-Identifier: MPL-2.0
//! Account screen: profile details, password change, avatar, storage usage,
//! and sign-out.

use crate::api::types::{StorageInfo, User};
use crate::api::{ApiClient, ApiError};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use iced::widget::{button, progress_bar, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Task};
use std::path::PathBuf;

/// Minimum password length accepted by the backend.
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    StorageLoaded(Result<StorageInfo, ApiError>),
    NameChanged(String),
    EmailChanged(String),
    SaveProfile,
    ProfileSaved(Result<User, ApiError>),
    CurrentPasswordChanged(String),
    NewPasswordChanged(String),
    ConfirmationChanged(String),
    ChangePassword,
    PasswordChanged(Result<(), ApiError>),
    PickAvatar,
    AvatarPicked(Option<PathBuf>),
    AvatarUploaded(Result<String, ApiError>),
    Logout,
}

/// Events propagated to the application root.
pub enum Event {
    None,
    Notify(Notification),
    /// Profile fields changed server-side; the root updates its copy.
    ProfileUpdated(Box<User>),
    /// The user asked to sign out.
    LogoutRequested,
}

#[derive(Debug, Default)]
pub struct State {
    name_input: String,
    email_input: String,
    current_password: String,
    new_password: String,
    confirmation: String,
    storage: Option<StorageInfo>,
    password_error: Option<String>,
    busy: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the profile form from the signed-in user.
    pub fn set_user(&mut self, user: &User) {
        self.name_input = user.name.clone();
        self.email_input = user.email.clone();
    }

    pub fn load(&mut self, api: &ApiClient) -> Task<Message> {
        let api = api.clone();
        Task::perform(async move { api.storage_info().await }, Message::StorageLoaded)
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> (Event, Task<Message>) {
        match message {
            Message::Refresh => (Event::None, self.load(api)),
            Message::StorageLoaded(result) => {
                match result {
                    Ok(storage) => self.storage = Some(storage),
                    Err(_) => self.storage = None,
                }
                (Event::None, Task::none())
            }
            Message::NameChanged(value) => {
                self.name_input = value;
                (Event::None, Task::none())
            }
            Message::EmailChanged(value) => {
                self.email_input = value;
                (Event::None, Task::none())
            }
            Message::SaveProfile => {
                let name = self.name_input.trim().to_string();
                let email = self.email_input.trim().to_string();
                if name.is_empty() || email.is_empty() || !email.contains('@') {
                    return (
                        Event::Notify(Notification::warning("Name and a valid email are required")),
                        Task::none(),
                    );
                }
                self.busy = true;
                let api = api.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.update_profile(Some(&name), Some(&email)).await },
                        Message::ProfileSaved,
                    ),
                )
            }
            Message::ProfileSaved(result) => {
                self.busy = false;
                match result {
                    Ok(user) => {
                        self.set_user(&user);
                        (Event::ProfileUpdated(Box::new(user)), Task::none())
                    }
                    Err(error) => (
                        Event::Notify(Notification::error(
                            error
                                .first_field_error()
                                .map(str::to_string)
                                .unwrap_or_else(|| error.to_string()),
                        )),
                        Task::none(),
                    ),
                }
            }
            Message::CurrentPasswordChanged(value) => {
                self.current_password = value;
                (Event::None, Task::none())
            }
            Message::NewPasswordChanged(value) => {
                self.new_password = value;
                (Event::None, Task::none())
            }
            Message::ConfirmationChanged(value) => {
                self.confirmation = value;
                (Event::None, Task::none())
            }
            Message::ChangePassword => {
                if self.current_password.is_empty() {
                    self.password_error = Some("Current password is required".into());
                    return (Event::None, Task::none());
                }
                if self.new_password.len() < MIN_PASSWORD_LEN {
                    self.password_error = Some(format!(
                        "New password must be at least {MIN_PASSWORD_LEN} characters"
                    ));
                    return (Event::None, Task::none());
                }
                if self.new_password != self.confirmation {
                    self.password_error = Some("Passwords do not match".into());
                    return (Event::None, Task::none());
                }
                self.password_error = None;
                self.busy = true;
                let api = api.clone();
                let current = self.current_password.clone();
                let new = self.new_password.clone();
                let confirmation = self.confirmation.clone();
                (
                    Event::None,
                    Task::perform(
                        async move { api.update_password(&current, &new, &confirmation).await },
                        Message::PasswordChanged,
                    ),
                )
            }
            Message::PasswordChanged(result) => {
                self.busy = false;
                match result {
                    Ok(()) => {
                        self.current_password.clear();
                        self.new_password.clear();
                        self.confirmation.clear();
                        (
                            Event::Notify(Notification::success("Password updated")),
                            Task::none(),
                        )
                    }
                    Err(error) => {
                        self.password_error = Some(
                            error
                                .first_field_error()
                                .map(str::to_string)
                                .unwrap_or_else(|| error.to_string()),
                        );
                        (Event::None, Task::none())
                    }
                }
            }
            Message::PickAvatar => (
                Event::None,
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .add_filter("Images", crate::media::extensions::IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::AvatarPicked,
                ),
            ),
            Message::AvatarPicked(path) => match path {
                Some(path) => {
                    self.busy = true;
                    let api = api.clone();
                    (
                        Event::None,
                        Task::perform(
                            async move { api.upload_avatar(&path).await },
                            Message::AvatarUploaded,
                        ),
                    )
                }
                None => (Event::None, Task::none()),
            },
            Message::AvatarUploaded(result) => {
                self.busy = false;
                match result {
                    Ok(_path) => (
                        Event::Notify(Notification::success("Avatar updated")),
                        Task::none(),
                    ),
                    Err(error) => (
                        Event::Notify(Notification::error(error.to_string())),
                        Task::none(),
                    ),
                }
            }
            Message::Logout => (Event::LogoutRequested, Task::none()),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut profile = Column::new()
            .spacing(spacing::SM)
            .push(Text::new("Profile").size(typography::TITLE_SM))
            .push(
                text_input("Name", &self.name_input)
                    .on_input(Message::NameChanged)
                    .padding(spacing::XS),
            )
            .push(
                text_input("Email", &self.email_input)
                    .on_input(Message::EmailChanged)
                    .padding(spacing::XS),
            );
        let mut save = button(Text::new("Save profile").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button::primary);
        let mut avatar = button(Text::new("Change avatar").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button::quiet);
        if !self.busy {
            save = save.on_press(Message::SaveProfile);
            avatar = avatar.on_press(Message::PickAvatar);
        }
        profile = profile.push(Row::new().spacing(spacing::SM).push(save).push(avatar));

        let mut password = Column::new()
            .spacing(spacing::SM)
            .push(Text::new("Change password").size(typography::TITLE_SM));
        if let Some(error) = &self.password_error {
            password = password.push(
                Text::new(error.clone())
                    .size(typography::BODY_SM)
                    .style(|theme: &iced::Theme| iced::widget::text::Style {
                        color: Some(theme.extended_palette().danger.base.color),
                    }),
            );
        }
        password = password
            .push(
                text_input("Current password", &self.current_password)
                    .on_input(Message::CurrentPasswordChanged)
                    .secure(true)
                    .padding(spacing::XS),
            )
            .push(
                text_input("New password", &self.new_password)
                    .on_input(Message::NewPasswordChanged)
                    .secure(true)
                    .padding(spacing::XS),
            )
            .push(
                text_input("Confirm new password", &self.confirmation)
                    .on_input(Message::ConfirmationChanged)
                    .secure(true)
                    .padding(spacing::XS),
            );
        let mut change = button(Text::new("Update password").size(typography::BODY))
            .padding(spacing::XS)
            .style(styles::button::primary);
        if !self.busy {
            change = change.on_press(Message::ChangePassword);
        }
        password = password.push(change);

        let mut storage = Column::new()
            .spacing(spacing::SM)
            .push(Text::new("Storage").size(typography::TITLE_SM));
        match &self.storage {
            Some(info) => {
                let label = match (&info.used_human, &info.quota_human) {
                    (Some(used), Some(quota)) => format!("{used} of {quota} used"),
                    _ => format!("{} of {} bytes used", info.used, info.quota),
                };
                storage = storage
                    .push(progress_bar(0.0..=100.0, info.percentage))
                    .push(Text::new(label).size(typography::BODY_SM));
            }
            None => {
                storage = storage.push(Text::new("Storage usage unavailable").size(typography::BODY_SM));
            }
        }

        let logout = button(Text::new("Sign out").size(typography::BODY))
            .on_press(Message::Logout)
            .padding(spacing::XS)
            .style(styles::button::danger);

        let content = Column::new()
            .spacing(spacing::LG)
            .width(Length::Fixed(sizing::DIALOG_WIDTH))
            .push(Container::new(profile).padding(spacing::MD).style(styles::container::card))
            .push(Container::new(password).padding(spacing::MD).style(styles::container::card))
            .push(Container::new(storage).padding(spacing::MD).style(styles::container::card))
            .push(logout);

        Container::new(iced::widget::scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .padding(spacing::LG)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> ApiClient {
        ApiClient::new("http://localhost:8000", "http://localhost:8000/storage")
            .expect("client construction should not fail")
    }

    fn user() -> User {
        User {
            id: 1,
            name: "Mai".into(),
            email: "mai@example.com".into(),
            avatar_path: None,
            storage_used: None,
            storage_quota: None,
            created_at: None,
        }
    }

    #[test]
    fn set_user_seeds_the_form() {
        let mut state = State::new();
        state.set_user(&user());
        assert_eq!(state.name_input, "Mai");
        assert_eq!(state.email_input, "mai@example.com");
    }

    #[test]
    fn password_mismatch_is_caught_locally() {
        let mut state = State::new();
        state.current_password = "old-password".into();
        state.new_password = "new-password".into();
        state.confirmation = "different".into();

        let _ = state.update(Message::ChangePassword, &api());
        assert_eq!(state.password_error.as_deref(), Some("Passwords do not match"));
        assert!(!state.busy);
    }

    #[test]
    fn short_new_password_is_caught_locally() {
        let mut state = State::new();
        state.current_password = "old-password".into();
        state.new_password = "short".into();
        state.confirmation = "short".into();

        let _ = state.update(Message::ChangePassword, &api());
        assert!(state
            .password_error
            .as_deref()
            .is_some_and(|error| error.contains("at least")));
    }

    #[test]
    fn successful_password_change_clears_fields() {
        let mut state = State::new();
        state.current_password = "old-password".into();
        state.new_password = "new-password".into();
        state.confirmation = "new-password".into();

        let (event, _) = state.update(Message::PasswordChanged(Ok(())), &api());
        assert!(matches!(event, Event::Notify(_)));
        assert!(state.current_password.is_empty());
        assert!(state.new_password.is_empty());
    }

    #[test]
    fn profile_save_propagates_updated_user() {
        let mut state = State::new();
        let (event, _) = state.update(Message::ProfileSaved(Ok(user())), &api());
        assert!(matches!(event, Event::ProfileUpdated(_)));
    }

    #[test]
    fn logout_is_an_event_not_a_request() {
        let mut state = State::new();
        let (event, _task) = state.update(Message::Logout, &api());
        assert!(matches!(event, Event::LogoutRequested));
    }
}
