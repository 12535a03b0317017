use std::collections::HashMap;

use iced::widget::{button, column, container, mouse_area, row, scrollable, text, text_input, Space};
use iced::{Border, Element, Length, Padding, Theme};

use crate::app::Message;
use crate::core::config::{
    KEY_DISPLAY_MS, KEY_MAX_VISIBLE, KEY_MIN_VIEWPORT_WIDTH, KEY_NOTIFICATIONS_DISABLED,
    KEY_REMOVAL_MS, KEY_STAGGER_MS,
};
use crate::theme;

pub fn settings_modal(draft: &HashMap<String, String>) -> Element<'_, Message> {
    let disabled = draft_value(draft, KEY_NOTIFICATIONS_DISABLED) == "true";
    let toggle_bg = if disabled {
        theme::BG_TERTIARY
    } else {
        theme::with_alpha(theme::SUCCESS, 0.25)
    };

    let notifications_toggle = button(
        text(if disabled { "Notifications: off" } else { "Notifications: on" })
            .size(13)
            .color(theme::TEXT_PRIMARY),
    )
    .padding(Padding::from([6, 12]))
    .style(move |_, _| button::Style {
        background: Some(toggle_bg.into()),
        text_color: theme::TEXT_PRIMARY,
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    })
    .on_press(Message::SettingChanged(
        KEY_NOTIFICATIONS_DISABLED.to_string(),
        (!disabled).to_string(),
    ));

    let content = column![
        text("Settings").size(18).color(theme::TEXT_PRIMARY),
        settings_field("Max Visible", draft_value(draft, KEY_MAX_VISIBLE), KEY_MAX_VISIBLE),
        settings_field("Display Duration (ms)", draft_value(draft, KEY_DISPLAY_MS), KEY_DISPLAY_MS),
        settings_field("Stagger (ms)", draft_value(draft, KEY_STAGGER_MS), KEY_STAGGER_MS),
        settings_field("Removal Animation (ms)", draft_value(draft, KEY_REMOVAL_MS), KEY_REMOVAL_MS),
        settings_field(
            "Min Window Width (px)",
            draft_value(draft, KEY_MIN_VIEWPORT_WIDTH),
            KEY_MIN_VIEWPORT_WIDTH,
        ),
        notifications_toggle,
        Space::new().height(8),
        row![
            button(text("Cancel").size(13).color(theme::TEXT_PRIMARY))
                .padding(Padding::from([8, 20]))
                .style(|_, _| button::Style {
                    background: Some(theme::BG_TERTIARY.into()),
                    border: Border {
                        color: theme::BORDER,
                        width: 1.0,
                        radius: 6.0.into(),
                    },
                    ..Default::default()
                })
                .on_press(Message::ToggleSettings),
            Space::new().width(Length::Fill),
            button(text("Save").size(13).color(theme::TEXT_PRIMARY))
                .padding(Padding::from([8, 20]))
                .style(|_, _| button::Style {
                    background: Some(theme::ACCENT.into()),
                    border: Border::default().rounded(6),
                    ..Default::default()
                })
                .on_press(Message::SaveSettings),
        ]
        .align_y(iced::Alignment::Center),
    ]
    .spacing(12)
    .padding(24)
    .width(420);

    let modal = container(scrollable(content).height(Length::Shrink))
        .max_height(600)
        .style(|_: &Theme| container::Style {
            background: Some(theme::BG_SECONDARY.into()),
            border: Border {
                color: theme::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        });

    mouse_area(
        container(modal)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_: &Theme| container::Style {
                background: Some(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
                ..Default::default()
            }),
    )
    .on_press(Message::ToggleSettings)
    .into()
}

fn draft_value<'a>(draft: &'a HashMap<String, String>, key: &str) -> &'a str {
    draft.get(key).map(|s| s.as_str()).unwrap_or("")
}

fn settings_field<'a>(label: &'a str, value: &'a str, field: &str) -> Element<'a, Message> {
    let field = field.to_string();
    column![
        text(label).size(13).color(theme::TEXT_SECONDARY),
        text_input("", value)
            .on_input(move |v| Message::SettingChanged(field.clone(), v))
            .on_submit(Message::SaveSettings)
            .size(13)
            .padding(Padding::from([6, 10]))
            .style(|_, _| text_input::Style {
                background: theme::BG_TERTIARY.into(),
                border: Border {
                    color: theme::BORDER,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                icon: theme::TEXT_MUTED,
                placeholder: theme::TEXT_MUTED,
                value: theme::TEXT_PRIMARY,
                selection: theme::ACCENT,
            }),
    ]
    .spacing(4)
    .into()
}
