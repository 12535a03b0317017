use iced::widget::{column, container, stack};
use iced::{Element, Length, Subscription, Task, Theme};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::core::config::{SchedulerConfig, KEY_NOTIFICATIONS_DISABLED};
use crate::core::notification::{NotificationId, Severity};
use crate::core::scheduler::{Scheduler, TimerKind};
use crate::db::{self, queries, DbConn};
use crate::theme as app_theme;
use crate::ui;
use crate::ui::toast::ToastLayer;

pub const WINDOW_WIDTH: f32 = 1100.0;
pub const WINDOW_HEIGHT: f32 = 720.0;

/// Granularity of the timer tick while any toast timer is armed.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

// ── Message enum ──

#[derive(Debug, Clone)]
pub enum Message {
    // Init
    Loaded(Result<HashMap<String, String>, String>),

    // Composer
    TitleChanged(String),
    BodyChanged(String),
    SeverityPicked(String),
    Fire(Severity),
    BurstRequested,

    // Toast
    DismissToast(NotificationId),
    ClearAll,
    TickToasts,
    ToggleNotifications,
    NotificationsToggled(Result<(), String>),

    // Settings
    ToggleSettings,
    SettingChanged(String, String),
    SaveSettings,
    SettingsSaved(Result<SchedulerConfig, String>),

    // Window / keyboard
    WindowResized(iced::Size),
    KeyPressed(iced::keyboard::Key, iced::keyboard::Modifiers),
}

// ── App state ──

pub struct App {
    pub conn: DbConn,
    pub scheduler: Scheduler<ToastLayer>,

    // Composer
    pub compose_title: String,
    pub compose_body: String,
    pub compose_severity: Severity,
    pub burst_count: u64,

    // Settings
    pub settings_open: bool,
    pub settings: HashMap<String, String>,
    pub settings_draft: HashMap<String, String>,
}

impl App {
    /// Single entry point for raising a notification.
    pub fn notify(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        severity: Severity,
    ) -> Option<NotificationId> {
        let id = self.scheduler.enqueue(title, body, severity);
        if id.is_none() {
            debug!("Notification dropped: notifications are suppressed");
        }
        id
    }

    fn persist_settings(&self, pairs: Vec<(&'static str, String)>) -> Task<Result<(), String>> {
        let conn = self.conn.clone();

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    let pairs: Vec<(&str, &str)> =
                        pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
                    queries::update_settings(&conn, &pairs).map_err(|e| format!("DB error: {e}"))
                })
                .await
                .map_err(|e| format!("Task error: {e}"))?
            },
            |result| result,
        )
    }
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let db_path = db::db_path();
        let conn = match db::open_database(&db_path) {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Failed to open database at {}: {e}; settings will not persist", db_path.display());
                db::open_in_memory().expect("Failed to open in-memory database")
            }
        };

        let init_conn = conn.clone();
        let init_task = Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    queries::load_settings(&init_conn).map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| format!("Init error: {e}"))?
            },
            Message::Loaded,
        );

        let mut scheduler = Scheduler::new(SchedulerConfig::default(), ToastLayer::default());
        scheduler.set_viewport_width(WINDOW_WIDTH as u32);

        let app = App {
            conn,
            scheduler,
            compose_title: String::new(),
            compose_body: String::new(),
            compose_severity: Severity::default(),
            burst_count: 0,
            settings_open: false,
            settings: HashMap::new(),
            settings_draft: HashMap::new(),
        };

        (app, init_task)
    }

    pub fn title(&self) -> String {
        "Toastline".to_string()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![];

        // Drive toast timers only while one is armed
        if self.scheduler.next_deadline().is_some() {
            subs.push(iced::time::every(TICK_INTERVAL).map(|_| Message::TickToasts));
        }

        subs.push(iced::event::listen_with(|event, _status, _id| match event {
            iced::Event::Keyboard(iced::keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                Some(Message::KeyPressed(key, modifiers))
            }
            iced::Event::Window(iced::window::Event::Resized(size)) => {
                Some(Message::WindowResized(size))
            }
            _ => None,
        }));

        Subscription::batch(subs)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok(settings)) => {
                let config = SchedulerConfig::from_settings(&settings);
                info!("Loaded settings: {config:?}");
                self.scheduler.reconfigure(config);
                self.settings = settings.clone();
                self.settings_draft = settings;
                Task::none()
            }
            Message::Loaded(Err(e)) => {
                self.notify("Load error", e, Severity::Error);
                Task::none()
            }

            // ── Composer ──
            Message::TitleChanged(title) => {
                self.compose_title = title;
                Task::none()
            }
            Message::BodyChanged(body) => {
                self.compose_body = body;
                Task::none()
            }
            Message::SeverityPicked(label) => {
                self.compose_severity = Severity::from_str(&label);
                Task::none()
            }
            Message::Fire(severity) => {
                let title = match self.compose_title.trim() {
                    "" => format!("{} notification", severity.label()),
                    t => t.to_string(),
                };
                let body = self.compose_body.trim().to_string();
                self.notify(title, body, severity);
                Task::none()
            }
            Message::BurstRequested => {
                self.burst_count += 1;
                for i in 0..ui::composer::BURST_SIZE {
                    let severity = Severity::ALL[i % Severity::ALL.len()];
                    self.notify(
                        format!("Burst {}.{}", self.burst_count, i + 1),
                        "Fired together to exercise the queue",
                        severity,
                    );
                }
                Task::none()
            }

            // ── Toast ──
            Message::DismissToast(id) => {
                self.scheduler.dismiss(id);
                Task::none()
            }
            Message::ClearAll => {
                let cleared = self.scheduler.clear_all();
                debug!("Cleared {cleared} toasts");
                Task::none()
            }
            Message::TickToasts => {
                self.scheduler.poll();
                Task::none()
            }
            Message::ToggleNotifications => {
                let disabled = !self.scheduler.config().notifications_disabled;
                self.scheduler.set_notifications_disabled(disabled);
                self.settings
                    .insert(KEY_NOTIFICATIONS_DISABLED.to_string(), disabled.to_string());
                info!("Notifications {}", if disabled { "muted" } else { "unmuted" });

                if !disabled {
                    self.notify("Notifications on", "", Severity::Info);
                }

                let conn = self.conn.clone();
                Task::perform(
                    async move {
                        tokio::task::spawn_blocking(move || {
                            queries::set_setting(
                                &conn,
                                KEY_NOTIFICATIONS_DISABLED,
                                &disabled.to_string(),
                            )
                            .map_err(|e| format!("DB error: {e}"))
                        })
                        .await
                        .map_err(|e| format!("Task error: {e}"))?
                    },
                    Message::NotificationsToggled,
                )
            }
            Message::NotificationsToggled(Ok(())) => Task::none(),
            Message::NotificationsToggled(Err(e)) => {
                self.notify("Save error", e, Severity::Error);
                Task::none()
            }

            // ── Settings ──
            Message::ToggleSettings => {
                self.settings_open = !self.settings_open;
                if self.settings_open {
                    self.settings_draft = self.settings.clone();
                }
                Task::none()
            }
            Message::SettingChanged(key, value) => {
                self.settings_draft.insert(key, value);
                Task::none()
            }
            Message::SaveSettings => match SchedulerConfig::parse_draft(&self.settings_draft) {
                Ok(config) => self
                    .persist_settings(config.to_settings())
                    .map(move |result| Message::SettingsSaved(result.map(|()| config))),
                Err(e) => {
                    self.notify("Invalid settings", e, Severity::Error);
                    Task::none()
                }
            },
            Message::SettingsSaved(Ok(config)) => {
                self.scheduler.reconfigure(config);
                for (key, value) in config.to_settings() {
                    self.settings.insert(key.to_string(), value);
                }
                self.settings_open = false;
                info!("Settings saved");
                self.notify("Settings saved", "", Severity::Success);
                Task::none()
            }
            Message::SettingsSaved(Err(e)) => {
                self.notify("Save error", e, Severity::Error);
                Task::none()
            }

            // ── Window ──
            Message::WindowResized(size) => {
                let was_suppressed = self.scheduler.is_suppressed();
                self.scheduler.set_viewport_width(size.width.round() as u32);
                if was_suppressed != self.scheduler.is_suppressed() {
                    info!(
                        "Window width {} px: notifications {}",
                        size.width,
                        if was_suppressed { "resumed" } else { "suppressed" }
                    );
                }
                Task::none()
            }

            // ── Keyboard ──
            Message::KeyPressed(key, _modifiers) => {
                use iced::keyboard::key::Named;
                use iced::keyboard::Key;

                if let Key::Named(Named::Escape) = key {
                    if self.settings_open {
                        self.settings_open = false;
                    } else {
                        // Dismiss the oldest toast that is not already leaving
                        let oldest_live = self
                            .scheduler
                            .visible()
                            .map(|n| n.id)
                            .find(|id| !self.scheduler.is_closing(*id));
                        if let Some(id) = oldest_live {
                            self.scheduler.dismiss(id);
                        }
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let config = self.scheduler.config();
        let header = ui::header::header_bar(ui::header::HeaderStats {
            visible: self.scheduler.visible_count(),
            queued: self.scheduler.queued_count(),
            timers: self.scheduler.timer_count(),
            next_up: self.scheduler.queued().next().map(|n| n.title.clone()),
            clearable: self.scheduler.has_notifications(),
            disabled: config.notifications_disabled,
            narrow: self.scheduler.is_suppressed() && !config.notifications_disabled,
        });

        let composer = ui::composer::composer(
            &self.compose_title,
            &self.compose_body,
            self.compose_severity,
        );

        // Base layout
        let base = container(
            column![header, composer]
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_: &Theme| container::Style {
            background: Some(app_theme::BG_PRIMARY.into()),
            ..Default::default()
        });

        // Stack for overlays (modal, toasts)
        let mut layers: Vec<Element<'_, Message>> = vec![base.into()];

        if self.settings_open {
            layers.push(ui::settings_modal::settings_modal(&self.settings_draft));
        }

        let toasts = self.scheduler.renderer().toasts();
        if !toasts.is_empty() {
            // Countdown until eviction; closing toasts have no eviction timer
            let now = Instant::now();
            let remaining = |id: NotificationId| {
                self.scheduler
                    .timer(id)
                    .filter(|timer| timer.kind == TimerKind::Evict)
                    .map(|timer| timer.deadline.saturating_duration_since(now))
            };
            layers.push(
                container(ui::toast::toast_container(toasts, remaining))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(iced::alignment::Horizontal::Right)
                    .align_y(iced::alignment::Vertical::Bottom)
                    .into(),
            );
        }

        stack(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
