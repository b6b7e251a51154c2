// src/ui/calendar.rs

use iced::widget::{column, container, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::messages::Message;
use crate::ui::palette;
use crate::ui_state::CALENDAR_TITLE;

/// Calendar screen. Nothing is listed yet, the body is an empty scroll area.
pub fn view<'a>() -> Element<'a, Message> {
    let header = container(
        column![
            text(chrono::Local::now().format("%B %Y").to_string())
                .size(14)
                .style(palette::TEXT_MUTED),
            text(CALENDAR_TITLE).size(24).style(palette::TEXT_MAIN),
        ]
        .align_items(Alignment::Center),
    )
    .padding(20)
    .width(Length::Fill)
    .center_x();

    let entries = scrollable(column![].spacing(15).padding(20)).height(Length::Fill);

    column![header, entries].into()
}
