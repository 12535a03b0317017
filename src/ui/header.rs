use iced::widget::{button, container, row, text, Space};
use iced::{Border, Element, Length, Padding, Theme};

use crate::app::Message;
use crate::theme;

pub struct HeaderStats {
    pub visible: usize,
    pub queued: usize,
    pub timers: usize,
    /// Title of the next queued notification.
    pub next_up: Option<String>,
    pub clearable: bool,
    pub disabled: bool,
    pub narrow: bool,
}

pub fn header_bar(stats: HeaderStats) -> Element<'static, Message> {
    let title = row![
        text("Toast").size(20).color(theme::ACCENT),
        text("line").size(20).color(theme::TEXT_PRIMARY),
    ]
    .spacing(0);

    let mut stats_parts: Vec<Element<'static, Message>> = vec![
        text(format!("{} visible", stats.visible)).size(13).color(theme::TEXT_SECONDARY).into(),
        text(" · ").size(13).color(theme::TEXT_MUTED).into(),
        text(format!("{} queued", stats.queued)).size(13).color(theme::TEXT_SECONDARY).into(),
        text(" · ").size(13).color(theme::TEXT_MUTED).into(),
        text(format!("{} timers", stats.timers)).size(13).color(theme::TEXT_SECONDARY).into(),
    ];

    if let Some(next) = stats.next_up {
        stats_parts.push(text(" · ").size(13).color(theme::TEXT_MUTED).into());
        stats_parts.push(text(format!("next: {next}")).size(13).color(theme::TEXT_MUTED).into());
    }

    if stats.disabled {
        stats_parts.push(text(" · ").size(13).color(theme::TEXT_MUTED).into());
        stats_parts.push(text("muted").size(13).color(theme::WARNING).into());
    } else if stats.narrow {
        stats_parts.push(text(" · ").size(13).color(theme::TEXT_MUTED).into());
        stats_parts.push(text("window too narrow").size(13).color(theme::WARNING).into());
    }

    let stats_row = row(stats_parts).spacing(0);

    let left = row![title, Space::new().width(16), stats_row]
        .align_y(iced::Alignment::Center);

    let mute_label = if stats.disabled { "Unmute" } else { "Mute" };
    let mute_btn = styled_button(mute_label, Message::ToggleNotifications);
    let settings_btn = styled_button("Settings", Message::ToggleSettings);

    let clear_btn = button(text("Clear all").size(13).color(theme::TEXT_PRIMARY))
        .padding(Padding::from([6, 16]))
        .style(move |_, status| {
            let bg = match status {
                button::Status::Hovered => theme::ACCENT_HOVER,
                _ => theme::ACCENT,
            };
            button::Style {
                background: Some(bg.into()),
                text_color: theme::TEXT_PRIMARY,
                border: Border::default().rounded(6),
                ..Default::default()
            }
        })
        .on_press_maybe(stats.clearable.then_some(Message::ClearAll));

    let right = row![mute_btn, settings_btn, clear_btn]
        .spacing(8)
        .align_y(iced::Alignment::Center);

    container(
        row![left, Space::new().width(Length::Fill), right]
            .align_y(iced::Alignment::Center)
            .padding(Padding::from([12, 20])),
    )
    .width(Length::Fill)
    .style(|_: &Theme| container::Style {
        background: Some(theme::BG_SECONDARY.into()),
        ..Default::default()
    })
    .into()
}

fn styled_button(label: &str, msg: Message) -> Element<'static, Message> {
    let label = label.to_string();
    button(text(label).size(13).color(theme::TEXT_PRIMARY))
        .padding(Padding::from([6, 14]))
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
        .on_press(msg)
        .into()
}
