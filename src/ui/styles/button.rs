// SPDX-License-Identifier: MPL-2.0
//! Button style functions shared across screens.

use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::widget::button;
use iced::{Border, Color, Theme};

/// Filled brand-colored button for the primary action of a screen.
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let colors = theme.extended_palette();
    let base = button::Style {
        background: Some(colors.primary.strong.color.into()),
        text_color: colors.primary.strong.text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(colors.primary.base.color.into()),
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(palette::PRIMARY_700.into()),
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(
                Color {
                    a: opacity::OVERLAY_MEDIUM,
                    ..colors.primary.strong.color
                }
                .into(),
            ),
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..colors.primary.strong.text
            },
            ..base
        },
    }
}

/// Red button for destructive actions (delete, force delete, block).
pub fn danger(theme: &Theme, status: button::Status) -> button::Style {
    let colors = theme.extended_palette();
    let base = button::Style {
        background: Some(palette::ERROR_500.into()),
        text_color: palette::WHITE,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(
                Color {
                    a: opacity::OVERLAY_HOVER,
                    ..palette::ERROR_500
                }
                .into(),
            ),
            ..base
        },
        button::Status::Pressed => base,
        button::Status::Disabled => button::Style {
            background: Some(
                Color {
                    a: opacity::OVERLAY_SUBTLE,
                    ..palette::ERROR_500
                }
                .into(),
            ),
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..colors.background.base.text
            },
            ..base
        },
    }
}

/// Quiet button: no fill until hovered. Used for toolbars and list rows.
pub fn quiet(theme: &Theme, status: button::Status) -> button::Style {
    let colors = theme.extended_palette();

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: colors.background.base.text,
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(colors.background.strong.color.into()),
            text_color: colors.background.base.text,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Pressed => button::Style {
            background: Some(colors.primary.strong.color.into()),
            text_color: colors.primary.strong.text,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: colors.background.weak.text,
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Highlighted variant of [`quiet`] marking the active navigation tab.
pub fn selected(theme: &Theme, _status: button::Status) -> button::Style {
    let colors = theme.extended_palette();
    button::Style {
        background: Some(colors.primary.weak.color.into()),
        text_color: colors.primary.weak.text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Text-only button rendered like a hyperlink (auth screen footers).
pub fn link(theme: &Theme, status: button::Status) -> button::Style {
    let colors = theme.extended_palette();
    let color = match status {
        button::Status::Hovered | button::Status::Pressed => colors.primary.base.color,
        _ => colors.primary.strong.color,
    };
    button::Style {
        background: None,
        text_color: color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}
