// SPDX-License-Identifier: MPL-2.0
//! Container style functions shared across screens.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Border, Color, Theme};

/// Raised card with a subtle border, used for forms and list sections.
pub fn card(theme: &Theme) -> container::Style {
    let colors = theme.extended_palette();
    container::Style {
        background: Some(colors.background.weak.color.into()),
        border: Border {
            color: colors.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Toolbar strip along the top of a screen.
pub fn toolbar(theme: &Theme) -> container::Style {
    let colors = theme.extended_palette();
    container::Style {
        background: Some(colors.background.weak.color.into()),
        ..Default::default()
    }
}

/// Floating bar shown while the grid is in selection mode.
pub fn action_bar(theme: &Theme) -> container::Style {
    let colors = theme.extended_palette();
    container::Style {
        background: Some(colors.background.base.color.into()),
        border: Border {
            color: colors.primary.strong.color,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Dimmed backdrop behind the full-screen viewer and dialogs.
pub fn scrim(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(
            Color {
                a: opacity::OVERLAY_HOVER,
                ..palette::BLACK
            }
            .into(),
        ),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Dashed-border look for the upload drop zone.
pub fn drop_zone(theme: &Theme, active: bool) -> container::Style {
    let colors = theme.extended_palette();
    let accent = if active {
        colors.primary.strong.color
    } else {
        colors.background.strong.color
    };
    container::Style {
        background: Some(colors.background.weak.color.into()),
        border: Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}
