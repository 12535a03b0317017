use iced::widget::{button, column, container, pick_list, row, text, text_input, Space};
use iced::{Border, Element, Length, Padding, Theme};

use crate::app::Message;
use crate::core::notification::Severity;
use crate::theme;

/// Number of notifications fired by the burst button.
pub const BURST_SIZE: usize = 8;

pub fn composer<'a>(title: &'a str, body: &'a str, selected: Severity) -> Element<'a, Message> {
    let severity_options: Vec<String> = Severity::ALL.iter().map(|s| s.label().to_string()).collect();
    let severity_pick = pick_list(
        severity_options,
        Some(selected.label().to_string()),
        Message::SeverityPicked,
    )
    .text_size(13)
    .padding(Padding::from([4, 8]));

    let send_row = row![
        text("Enter sends as").size(13).color(theme::TEXT_SECONDARY),
        severity_pick,
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);

    let fire_buttons: Vec<Element<'a, Message>> = Severity::ALL
        .iter()
        .map(|&severity| severity_button(severity))
        .collect();

    let burst = button(text(format!("Burst ×{BURST_SIZE}")).size(13).color(theme::TEXT_PRIMARY))
        .padding(Padding::from([8, 16]))
        .style(|_, status| {
            let bg = match status {
                button::Status::Hovered => theme::BG_HOVER,
                _ => theme::BG_TERTIARY,
            };
            button::Style {
                background: Some(bg.into()),
                text_color: theme::TEXT_PRIMARY,
                border: Border {
                    color: theme::BORDER,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(Message::BurstRequested);

    let content = column![
        text("Compose").size(18).color(theme::TEXT_PRIMARY),
        field("Title", title, Message::TitleChanged, selected),
        field("Body", body, Message::BodyChanged, selected),
        send_row,
        Space::new().height(4),
        row(fire_buttons).spacing(8),
        burst,
    ]
    .spacing(12)
    .padding(24)
    .width(480);

    container(
        container(content).style(|_: &Theme| container::Style {
            background: Some(theme::BG_SECONDARY.into()),
            border: Border {
                color: theme::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        }),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

fn severity_button(severity: Severity) -> Element<'static, Message> {
    let color = theme::severity_color(severity);
    button(text(severity.label()).size(13).color(theme::TEXT_PRIMARY))
        .padding(Padding::from([8, 16]))
        .style(move |_, status| {
            let alpha = match status {
                button::Status::Hovered => 0.35,
                _ => 0.2,
            };
            button::Style {
                background: Some(theme::with_alpha(color, alpha).into()),
                text_color: theme::TEXT_PRIMARY,
                border: Border {
                    color,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press(Message::Fire(severity))
        .into()
}

fn field<'a>(
    label: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
    submit_as: Severity,
) -> Element<'a, Message> {
    column![
        text(label).size(13).color(theme::TEXT_SECONDARY),
        text_input("", value)
            .on_input(on_input)
            .on_submit(Message::Fire(submit_as))
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
