// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are the visual representation of notifications, appearing as
//! small cards with severity-colored accents and a dismiss button.

use super::manager::{Manager, Message};
use super::notification::{Notification, Severity};
use crate::ui::design_tokens::{border, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification.
    pub fn view(notification: &Notification) -> Element<'_, Message> {
        let severity = notification.severity();
        let accent_color = severity.color();

        // Severity marker: a colored glyph; PNG icon assets would be
        // overkill for four states.
        let marker = Text::new(Self::severity_glyph(severity))
            .size(typography::BODY_LG)
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent_color),
            });

        let message_widget =
            Text::new(notification.message().to_string())
                .size(typography::BODY)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme.palette().text),
                });

        let notification_id = notification.id();
        let dismiss_button = button(Text::new("\u{00D7}").size(typography::BODY_LG))
            .on_press(Message::Dismiss(notification_id))
            .padding(spacing::XXS)
            .style(crate::ui::styles::button::quiet);

        // Layout: [marker] [message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(marker).padding(spacing::XXS))
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Renders the toast overlay with all visible notifications.
    ///
    /// Positions toasts in the bottom-right corner, stacked vertically.
    pub fn view_overlay(manager: &Manager) -> Element<'_, Message> {
        let toasts: Vec<Element<'_, Message>> =
            manager.visible().map(Self::view).collect();

        if toasts.is_empty() {
            // Return an empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::MD)
                .into()
        }
    }

    fn severity_glyph(severity: Severity) -> &'static str {
        match severity {
            Severity::Success => "\u{2713}",
            Severity::Info => "\u{2139}",
            Severity::Warning | Severity::Error => "\u{26A0}",
        }
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_container_style_uses_accent_color() {
        let theme = Theme::Dark;
        let accent = crate::ui::design_tokens::palette::SUCCESS_500;
        let style = toast_container_style(&theme, accent);

        assert_eq!(style.border.color, accent);
        assert!(style.background.is_some());
    }

    #[test]
    fn severity_glyphs_are_distinct_for_success_and_info() {
        assert_ne!(
            Toast::severity_glyph(Severity::Success),
            Toast::severity_glyph(Severity::Info)
        );
    }

    #[test]
    fn overlay_renders_for_empty_and_non_empty_managers() {
        let mut manager = Manager::new();
        let _empty = Toast::view_overlay(&manager);
        drop(_empty);

        manager.push(Notification::error("boom"));
        let _non_empty = Toast::view_overlay(&manager);
    }
}
