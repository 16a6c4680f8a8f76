// SPDX-License-Identifier: MPL-2.0
//! Full-screen viewer overlay.
//!
//! Pure view: the gallery owns the navigation state ([`crate::viewer_navigation`])
//! and maps these messages onto it. Previous/next buttons only render when
//! the corresponding direction is available; there is no wraparound.

use crate::api::types::Photo;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, image, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, ContentFit, Element, Length};

#[derive(Debug, Clone)]
pub enum Message {
    Close,
    Previous,
    Next,
    ToggleFavorite,
    Download,
    CreateShareLink,
    Delete,
}

/// Everything the overlay needs to render one photo.
pub struct ViewContext<'a> {
    pub photo: &'a Photo,
    pub position_label: String,
    pub has_previous: bool,
    pub has_next: bool,
    /// Full-resolution image, once fetched. Falls back to the grid thumbnail.
    pub full_image: Option<&'a image::Handle>,
    pub thumbnail: Option<&'a image::Handle>,
    /// Disables mutating actions while a request for this photo is in flight.
    pub busy: bool,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let surface: Element<'_, Message> = match ctx.full_image.or(ctx.thumbnail) {
        Some(handle) => image::Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        None => Container::new(
            Text::new(if ctx.photo.is_video() {
                "Loading video preview..."
            } else {
                "Loading..."
            })
            .size(typography::BODY_LG),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into(),
    };

    let chrome = Column::new()
        .push(header(&ctx))
        .push(nav_row(&ctx))
        .push(footer(&ctx))
        .width(Length::Fill)
        .height(Length::Fill);

    Container::new(Stack::new().push(surface).push(chrome))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::scrim)
        .into()
}

fn header<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let close = button(Text::new("\u{2190}").size(typography::TITLE_MD))
        .on_press(Message::Close)
        .padding(spacing::XS)
        .style(styles::button::quiet);

    let favorite_glyph = if ctx.photo.is_favorite {
        "\u{2605}"
    } else {
        "\u{2606}"
    };
    let mut favorite = button(Text::new(favorite_glyph).size(typography::TITLE_MD))
        .padding(spacing::XS)
        .style(styles::button::quiet);
    let mut download = button(Text::new("Download").size(typography::BODY))
        .padding(spacing::XS)
        .style(styles::button::quiet);
    let mut share = button(Text::new("Share link").size(typography::BODY))
        .padding(spacing::XS)
        .style(styles::button::quiet);
    let mut delete = button(Text::new("Delete").size(typography::BODY))
        .padding(spacing::XS)
        .style(styles::button::danger);

    if !ctx.busy {
        favorite = favorite.on_press(Message::ToggleFavorite);
        download = download.on_press(Message::Download);
        share = share.on_press(Message::CreateShareLink);
        delete = delete.on_press(Message::Delete);
    }

    Row::new()
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(close)
        .push(Text::new(ctx.photo.original_filename.clone()).size(typography::BODY))
        .push(Space::new().width(Length::Fill).height(Length::Shrink))
        .push(favorite)
        .push(download)
        .push(share)
        .push(delete)
        .width(Length::Fill)
        .into()
}

fn nav_row<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut row = Row::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(alignment::Vertical::Center);

    if ctx.has_previous {
        row = row.push(
            button(
                Text::new("\u{2039}")
                    .size(sizing::VIEWER_NAV_BUTTON)
                    .align_x(alignment::Horizontal::Center),
            )
            .on_press(Message::Previous)
            .padding(spacing::XS)
            .style(styles::button::quiet),
        );
    }

    row = row.push(Space::new().width(Length::Fill).height(Length::Shrink));

    if ctx.has_next {
        row = row.push(
            button(
                Text::new("\u{203A}")
                    .size(sizing::VIEWER_NAV_BUTTON)
                    .align_x(alignment::Horizontal::Center),
            )
            .on_press(Message::Next)
            .padding(spacing::XS)
            .style(styles::button::quiet),
        );
    }

    row.into()
}

fn footer<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut details = Row::new()
        .spacing(spacing::MD)
        .padding(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(ctx.position_label.clone()).size(typography::BODY_SM));

    if let Some(captured) = ctx.photo.captured_at {
        details = details.push(
            Text::new(captured.format("%Y-%m-%d %H:%M").to_string()).size(typography::BODY_SM),
        );
    }
    if let Some(location) = &ctx.photo.location {
        details = details.push(Text::new(location.clone()).size(typography::BODY_SM));
    }
    if let (Some(width), Some(height)) = (ctx.photo.width, ctx.photo.height) {
        details = details.push(Text::new(format!("{width}\u{00D7}{height}")).size(typography::BODY_SM));
    }

    Container::new(details)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
}
