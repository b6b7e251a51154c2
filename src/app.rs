// Noticeboard - iced application shell

use std::sync::Arc;

use iced::futures::SinkExt;
use iced::keyboard::key::Named;
use iced::keyboard::{self, Key};
use iced::widget::{button, column, container, row, text};
use iced::{Application, Command, Element, Length, Subscription, Theme};
use log::{info, warn};

use crate::command_handlers::{AddFormController, KeyGenerator};
use crate::messages::Message;
use crate::store::DocumentStore;
use crate::sync::{SnapshotSubscription, SubscriptionOptions};
use crate::ui;
use crate::ui::styles::{ActiveNavStyle, BackgroundStyle, NavStyle, SidebarStyle};
use crate::ui_state::{UiState, View};

/// Everything the application needs from `main`.
pub struct AppFlags {
    pub store: Arc<dyn DocumentStore>,
    pub key_generator: KeyGenerator,
    pub subscription: SubscriptionOptions,
}

pub struct NoticeboardApp {
    store: Arc<dyn DocumentStore>,
    controller: AddFormController,
    options: SubscriptionOptions,
    ui_state: UiState,
}

impl Application for NoticeboardApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let controller = AddFormController::new(flags.store.clone(), flags.key_generator);
        let app = NoticeboardApp {
            store: flags.store,
            controller,
            options: flags.subscription,
            ui_state: UiState::new(),
        };
        // The first snapshot comes from the subscription.
        (app, Command::none())
    }

    fn title(&self) -> String {
        "Noticeboard".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        let home = &mut self.ui_state.home;
        match message {
            Message::ShowHome => {
                self.ui_state.current_view = View::Home;
                Command::none()
            }
            Message::ShowCalendar => {
                self.ui_state.current_view = View::Calendar;
                Command::none()
            }
            Message::BackPressed => {
                if self.ui_state.current_view == View::Home {
                    home.back_pressed();
                }
                Command::none()
            }
            Message::AnnouncementPressed(key) => {
                home.select(&key);
                Command::none()
            }
            Message::ToggleDetailPopup => {
                home.toggle_detail_popup();
                Command::none()
            }
            Message::ToggleAddForm => {
                home.toggle_add_form();
                Command::none()
            }
            Message::DismissAlert => {
                home.dismiss_alert();
                Command::none()
            }
            Message::ModalCardPressed => Command::none(),
            Message::TitleChanged(value) => {
                home.form.title = value;
                Command::none()
            }
            Message::ContentChanged(value) => {
                home.form.content = value;
                Command::none()
            }
            Message::SubmitAnnouncement => match home.begin_submit() {
                Some(announcement) => {
                    let controller = self.controller.clone();
                    Command::perform(
                        async move { controller.write(announcement).await.map_err(|e| e.to_string()) },
                        Message::AnnouncementWritten,
                    )
                }
                None => Command::none(),
            },
            Message::AnnouncementWritten(result) => {
                home.finish_submit(result);
                Command::none()
            }
            Message::FeedEvent(event) => {
                home.apply_event(event);
                Command::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        struct SnapshotLoop;

        let store = self.store.clone();
        let options = self.options.clone();

        let snapshots = iced::subscription::channel(
            std::any::TypeId::of::<SnapshotLoop>(),
            100,
            move |mut output| async move {
                let (sender, mut receiver) = tokio::sync::mpsc::channel(32);
                // Dropping the guard (when iced drops this future) stops the listener.
                let _listener = SnapshotSubscription::spawn(store, sender, options);
                info!("Listening for announcement snapshots");

                loop {
                    match receiver.recv().await {
                        Some(event) => {
                            let _ = output.send(Message::FeedEvent(event)).await;
                        }
                        None => {
                            warn!("Snapshot listener exited");
                            iced::futures::future::pending::<()>().await;
                        }
                    }
                }
            },
        );

        let back = keyboard::on_key_press(|key, _modifiers| match key {
            Key::Named(Named::Escape) => Some(Message::BackPressed),
            _ => None,
        });

        Subscription::batch(vec![snapshots, back])
    }

    fn view(&self) -> Element<'_, Message> {
        let current = self.ui_state.current_view;
        let nav_button = |label: &'static str, view: View, msg: Message| {
            button(
                text(label)
                    .size(14)
                    .horizontal_alignment(iced::alignment::Horizontal::Left),
            )
            .width(Length::Fill)
            .padding(10)
            .style(if view == current {
                iced::theme::Button::Custom(Box::new(ActiveNavStyle))
            } else {
                iced::theme::Button::Custom(Box::new(NavStyle))
            })
            .on_press(msg)
        };

        let sidebar = container(
            column![
                text("Noticeboard").size(22).style(ui::palette::ACCENT),
                column![
                    nav_button("Home", View::Home, Message::ShowHome),
                    nav_button("Calendar", View::Calendar, Message::ShowCalendar),
                ]
                .spacing(5),
            ]
            .spacing(40)
            .padding(20),
        )
        .width(170)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(SidebarStyle)));

        let content = container(match current {
            View::Home => ui::home::view(&self.ui_state.home),
            View::Calendar => ui::calendar::view(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        container(row![sidebar, content])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
