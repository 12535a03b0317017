use chrono::{DateTime, Local, Utc};
use iced::widget::{column, container, mouse_area, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Theme};
use std::time::Duration;

use crate::app::Message;
use crate::core::notification::{Notification, NotificationId, Severity};
use crate::core::scheduler::ToastRenderer;
use crate::theme;

/// View model for one on-screen toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    /// Fading out; still on screen until the scheduler removes it.
    pub closing: bool,
}

/// Renderer collaborator backing the toast overlay.
#[derive(Debug, Default)]
pub struct ToastLayer {
    toasts: Vec<Toast>,
}

impl ToastLayer {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

impl ToastRenderer for ToastLayer {
    fn render(&mut self, notification: &Notification) {
        self.toasts.push(Toast {
            id: notification.id,
            title: notification.title.clone(),
            body: notification.body.clone(),
            severity: notification.severity,
            created_at: notification.created_at,
            closing: false,
        });
    }

    fn closing(&mut self, id: NotificationId) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.closing = true;
        }
    }

    fn remove(&mut self, id: NotificationId) {
        self.toasts.retain(|t| t.id != id);
    }
}

fn toast_colors(toast: &Toast) -> (Color, Color, Color) {
    // (border, background, text)
    let accent = theme::severity_color(toast.severity);
    let fade = if toast.closing { 0.35 } else { 1.0 };
    (
        theme::with_alpha(accent, fade),
        theme::with_alpha(theme::BG_SECONDARY, 0.95 * fade),
        theme::with_alpha(theme::TEXT_PRIMARY, fade),
    )
}

/// Render the toast container (bottom-right, overlaid via Stack).
pub fn toast_container(
    toasts: &[Toast],
    remaining: impl Fn(NotificationId) -> Option<Duration>,
) -> Element<'_, Message> {
    if toasts.is_empty() {
        return container(column![]).width(0).height(0).into();
    }

    let toast_views: Vec<Element<'_, Message>> = toasts
        .iter()
        .map(|t| {
            let (border_color, bg_color, text_color) = toast_colors(t);
            let mut stamp = t.created_at.with_timezone(&Local).format("%H:%M:%S").to_string();
            if let Some(left) = remaining(t.id) {
                stamp.push_str(&format!(" · {:.1}s", left.as_secs_f32()));
            }

            let heading = row![
                text(t.severity.label()).size(11).color(border_color),
                Space::new().width(8),
                text(&t.title).size(13).color(text_color),
                Space::new().width(Length::Fill),
                text(stamp).size(11).color(theme::TEXT_MUTED),
            ]
            .align_y(iced::Alignment::Center);

            let mut content = column![heading].spacing(4);
            if !t.body.is_empty() {
                content = content.push(text(&t.body).size(12).color(theme::TEXT_SECONDARY));
            }

            mouse_area(
                container(content)
                    .padding(Padding::from([10, 16]))
                    .width(320)
                    .style(move |_: &Theme| container::Style {
                        background: Some(bg_color.into()),
                        border: Border {
                            color: border_color,
                            width: 1.0,
                            radius: 8.0.into(),
                        },
                        ..Default::default()
                    }),
            )
            .on_press(Message::DismissToast(t.id))
            .into()
        })
        .collect();

    container(column(toast_views).spacing(8))
        .padding(16)
        .width(Length::Shrink)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::config::SchedulerConfig;
    use crate::core::scheduler::Scheduler;

    #[test]
    fn test_layer_follows_scheduler_transitions() {
        let clock = ManualClock::new();
        let mut scheduler = Scheduler::with_clock(
            SchedulerConfig {
                max_visible: 2,
                ..SchedulerConfig::default()
            },
            ToastLayer::default(),
            clock.clone(),
        );

        let a = scheduler.enqueue("Saved", "settings written", Severity::Success).unwrap();
        scheduler.enqueue("Heads up", "", Severity::Warning).unwrap();
        scheduler.enqueue("Queued", "", Severity::Info).unwrap();
        assert_eq!(scheduler.renderer().toasts().len(), 2);

        scheduler.dismiss(a);
        let first = &scheduler.renderer().toasts()[0];
        assert_eq!(first.id, a);
        assert!(first.closing);

        clock.advance(Duration::from_millis(400));
        scheduler.poll();
        let titles: Vec<&str> = scheduler
            .renderer()
            .toasts()
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, ["Heads up", "Queued"]);
    }

    #[test]
    fn test_clear_all_empties_layer() {
        let mut scheduler = Scheduler::new(SchedulerConfig::default(), ToastLayer::default());
        scheduler.enqueue("one", "", Severity::Info);
        scheduler.enqueue("two", "", Severity::Error);

        scheduler.clear_all();
        assert!(scheduler.renderer().toasts().is_empty());
    }

    #[test]
    fn test_closing_unknown_id_is_ignored() {
        let mut layer = ToastLayer::default();
        layer.closing(NotificationId::from_raw(42));
        layer.remove(NotificationId::from_raw(42));
        assert!(layer.toasts().is_empty());
    }
}
