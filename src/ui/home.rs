// src/ui/home.rs

use iced::widget::{
    button, column, container, horizontal_space, mouse_area, row, scrollable, text, text_input,
};
use iced::{Alignment, Element, Length};

use crate::messages::Message;
use crate::sync::FeedStatus;
use crate::ui::styles::{
    AddButtonStyle, BackdropStyle, BannerStyle, HeaderBandStyle, InputStyle, ListFrameStyle,
    NavStyle, PrimaryButtonStyle,
};
use crate::ui::{card_style, palette, row_divider, section_header, view_announcement_row};
use crate::ui_state::{AddFormState, AlertDialog, HomeState, ListContent, Overlay};

const HEADER_TITLE: &str = "Announcements";

/// Home screen, or the topmost modal on a dimmed backdrop.
pub fn view(state: &HomeState) -> Element<'_, Message> {
    match state.overlay() {
        Overlay::None => view_board(state),
        Overlay::DetailPopup => backdrop(view_detail_popup(state), Some(Message::ToggleDetailPopup)),
        Overlay::AddForm => backdrop(view_add_form(&state.form), Some(Message::ToggleAddForm)),
        // The alert must be acknowledged explicitly.
        Overlay::Alert => match &state.alert {
            Some(alert) => backdrop(view_alert(alert), None),
            None => view_board(state),
        },
    }
}

fn view_board(state: &HomeState) -> Element<'_, Message> {
    let header = container(text(HEADER_TITLE).size(26))
        .width(Length::Fill)
        .padding([28, 24])
        .style(iced::theme::Container::Custom(Box::new(HeaderBandStyle)));

    let mut body = column![].spacing(12).padding([16, 20]);

    if let FeedStatus::Degraded(reason) = state.feed.status() {
        body = body.push(
            container(text(reason).size(13))
                .width(Length::Fill)
                .padding(10)
                .style(iced::theme::Container::Custom(Box::new(BannerStyle))),
        );
    }

    let list: Element<'_, Message> = match state.list_content() {
        ListContent::Loading => centered(text("Loading...").size(16).style(palette::TEXT_MUTED)),
        ListContent::Unavailable(label) => centered(text(label).size(16).style(palette::TEXT_MUTED)),
        ListContent::Empty(label) => centered(text(label).size(16).style(palette::EMPTY_STATE)),
        ListContent::Rows(rows) => {
            let mut items = column![];
            for (i, descriptor) in rows.iter().enumerate() {
                if i > 0 {
                    items = items.push(row_divider());
                }
                items = items.push(view_announcement_row(descriptor));
            }
            scrollable(items).height(Length::Fill).into()
        }
    };

    body = body.push(
        container(list)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(2)
            .style(iced::theme::Container::Custom(Box::new(ListFrameStyle))),
    );

    let add_button = button(
        text("+")
            .size(28)
            .horizontal_alignment(iced::alignment::Horizontal::Center),
    )
    .width(48)
    .height(48)
    .style(iced::theme::Button::Custom(Box::new(AddButtonStyle)))
    .on_press(Message::ToggleAddForm);

    body = body.push(row![horizontal_space(), add_button]);

    column![header, body].height(Length::Fill).into()
}

fn view_detail_popup(state: &HomeState) -> Element<'_, Message> {
    let content: Element<'_, Message> = match state.selected_announcement() {
        Some(record) => column![
            section_header(&record.title),
            text(record.display_date()).size(12).style(palette::TEXT_MUTED),
            scrollable(text(&record.content).size(15)).height(Length::Shrink),
        ]
        .spacing(10)
        .into(),
        None => text("This announcement is no longer available")
            .size(15)
            .style(palette::TEXT_MUTED)
            .into(),
    };

    modal_card(
        column![
            content,
            row![
                horizontal_space(),
                button(text("Close"))
                    .padding([8, 16])
                    .style(iced::theme::Button::Custom(Box::new(NavStyle)))
                    .on_press(Message::ToggleDetailPopup),
            ],
        ]
        .spacing(20),
    )
}

fn view_add_form(form: &AddFormState) -> Element<'_, Message> {
    let mut title_input = text_input("Title", &form.title)
        .padding(10)
        .style(iced::theme::TextInput::Custom(Box::new(InputStyle)));
    let mut content_input = text_input("Content", &form.content)
        .padding(10)
        .style(iced::theme::TextInput::Custom(Box::new(InputStyle)));

    // Inputs without on_input are read-only while the write is in flight.
    if let Some(submit) = submit_action(form) {
        title_input = title_input
            .on_input(Message::TitleChanged)
            .on_submit(submit.clone());
        content_input = content_input
            .on_input(Message::ContentChanged)
            .on_submit(submit);
    }

    let mut fields = column![section_header("New announcement"), title_input, content_input].spacing(12);

    if let Some(error) = &form.error {
        fields = fields.push(text(error).size(13).style(palette::DANGER));
    }

    let mut submit = button(text(if form.submitting { "Posting..." } else { "Post" }))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)));
    if let Some(message) = submit_action(form) {
        submit = submit.on_press(message);
    }

    let cancel = button(text("Cancel"))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(NavStyle)))
        .on_press(Message::ToggleAddForm);

    modal_card(
        column![fields, row![horizontal_space(), cancel, submit].spacing(10)].spacing(20),
    )
}

/// What Enter in either field and the Post button send. `None` while a write
/// is in flight.
fn submit_action(form: &AddFormState) -> Option<Message> {
    (!form.submitting).then_some(Message::SubmitAnnouncement)
}

fn view_alert(alert: &AlertDialog) -> Element<'_, Message> {
    modal_card(
        column![
            section_header(&alert.title),
            text(&alert.message).size(15),
            row![
                horizontal_space(),
                button(text(&alert.acknowledge_label))
                    .padding([8, 20])
                    .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)))
                    .on_press(Message::DismissAlert),
            ],
        ]
        .spacing(16),
    )
}

fn modal_card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    mouse_area(
        container(content)
            .width(Length::Fixed(340.0))
            .padding(20)
            .style(card_style),
    )
    .on_press(Message::ModalCardPressed)
    .into()
}

/// Dimmed full-screen layer around a modal card. Pressing it sends `on_press`.
fn backdrop(card: Element<'_, Message>, on_press: Option<Message>) -> Element<'_, Message> {
    let layer = container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .style(iced::theme::Container::Custom(Box::new(BackdropStyle)));

    match on_press {
        Some(message) => mouse_area(layer).on_press(message).into(),
        None => layer.into(),
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        column![content.into()].align_items(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x()
    .center_y()
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_action_follows_write_state() {
        let mut form = AddFormState {
            title: "Bake sale".to_string(),
            ..Default::default()
        };
        assert!(matches!(submit_action(&form), Some(Message::SubmitAnnouncement)));

        form.submitting = true;
        assert!(submit_action(&form).is_none());
    }

    #[test]
    fn test_every_overlay_builds_a_view() {
        let mut state = HomeState::new();
        let _ = view(&state);

        state.toggle_detail_popup();
        let _ = view(&state);

        state.toggle_add_form();
        state.form.submitting = true;
        let _ = view(&state);

        state.alert = Some(AlertDialog::warning("Title and content cannot be empty"));
        let _ = view(&state);
    }
}
