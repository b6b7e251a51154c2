// src/ui/mod.rs

use iced::widget::{button, column, container, text};
use iced::{Background, Border, Color, Element, Length, Shadow, Theme, Vector};

use crate::messages::Message;
use crate::models::RowDescriptor;

pub mod calendar;
pub mod home;
pub mod styles;

pub mod palette {
    use iced::Color;

    pub const SURFACE: Color = Color::WHITE;
    pub const TEXT_MAIN: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.5, 0.5, 0.5);
    pub const ACCENT: Color = Color::from_rgb(0.18, 0.545, 0.341); // seagreen
    pub const EMPTY_STATE: Color = Color::from_rgb(0.827, 0.827, 0.827); // lightgrey
    pub const DANGER: Color = Color::from_rgb(0.8, 0.4, 0.4);
}

// --- REUSABLE STYLES ---

pub fn card_style(_theme: &Theme) -> container::Appearance {
    container::Appearance {
        background: Some(Background::Color(palette::SURFACE)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 12.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.15),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 16.0,
        },
        text_color: Some(palette::TEXT_MAIN),
    }
}

// --- COMPONENT VIEWS ---

/// One pressable list row. Presses carry the document key, not the position.
pub fn view_announcement_row(row: &RowDescriptor) -> Element<'_, Message> {
    button(
        column![
            text(&row.title).size(17).style(palette::TEXT_MAIN),
            text(row.display_date()).size(12).style(palette::TEXT_MUTED),
            text(row.preview()).size(14).style(palette::TEXT_MUTED),
        ]
        .spacing(4),
    )
    .width(Length::Fill)
    .padding([12, 16])
    .style(iced::theme::Button::Custom(Box::new(styles::RowStyle)))
    .on_press(Message::AnnouncementPressed(row.key.clone()))
    .into()
}

/// Thin separator drawn between rows
pub fn row_divider<'a>() -> Element<'a, Message> {
    container("")
        .width(Length::Fill)
        .height(1)
        .style(container::Appearance {
            background: Some(Background::Color(palette::EMPTY_STATE)),
            ..Default::default()
        })
        .into()
}

// Helper for section headers
pub fn section_header(label: &str) -> Element<'_, Message> {
    text(label).size(20).style(palette::ACCENT).into()
}
