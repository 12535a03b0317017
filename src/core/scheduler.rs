//! Bounded, staggered notification scheduling.
//!
//! The [`Scheduler`] decides which notifications are visible. At most
//! `max_visible` are shown at once; the rest wait in a FIFO queue. Every
//! visible notification owns exactly one timer: live ones an eviction timer,
//! closing ones a removal timer that ends the exit animation. Whenever the set
//! of live notifications changes, all eviction timers are recomputed from
//! "now" so the oldest notification always leaves first.
//!
//! Nothing here sleeps. The host calls [`Scheduler::poll`] when
//! [`Scheduler::next_deadline`] has passed, and an expired eviction timer goes
//! through the same path as a user dismissal.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::config::SchedulerConfig;
use super::notification::{Notification, NotificationId, Severity};

/// Presentation side of the scheduler. Called once per transition.
pub trait ToastRenderer {
    fn render(&mut self, notification: &Notification);

    /// The removal window for `id` has started.
    fn closing(&mut self, _id: NotificationId) {}

    fn remove(&mut self, id: NotificationId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Starts the removal of a live notification.
    Evict,
    /// Ends the removal window of a closing notification.
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub deadline: Instant,
}

#[derive(Debug)]
struct Slot {
    notification: Notification,
    closing: bool,
}

pub struct Scheduler<R, C = SystemClock> {
    config: SchedulerConfig,
    viewport_width: Option<u32>,
    /// Oldest first.
    visible: Vec<Slot>,
    pending: VecDeque<Notification>,
    timers: HashMap<NotificationId, ScheduledTimer>,
    next_id: u64,
    next_handle: u64,
    renderer: R,
    clock: C,
}

impl<R: ToastRenderer> Scheduler<R, SystemClock> {
    pub fn new(config: SchedulerConfig, renderer: R) -> Self {
        Self::with_clock(config, renderer, SystemClock)
    }
}

impl<R: ToastRenderer, C: Clock> Scheduler<R, C> {
    pub fn with_clock(mut config: SchedulerConfig, renderer: R, clock: C) -> Self {
        config.max_visible = config.max_visible.max(1);
        Self {
            config,
            viewport_width: None,
            visible: Vec::new(),
            pending: VecDeque::new(),
            timers: HashMap::new(),
            next_id: 1,
            next_handle: 1,
            renderer,
            clock,
        }
    }

    // ── Public operations ──

    /// Requests a notification.
    ///
    /// Returns `None` when notifications are suppressed (disabled by the user
    /// or viewport too narrow); no id is allocated in that case. Otherwise the
    /// notification is shown right away if there is room, or queued.
    pub fn enqueue(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        severity: Severity,
    ) -> Option<NotificationId> {
        if self.is_suppressed() {
            debug!("Notification suppressed");
            return None;
        }

        let id = NotificationId::from_raw(self.next_id);
        self.next_id += 1;
        let notification = Notification::new(id, title, body, severity);

        if self.visible.len() < self.config.max_visible {
            self.show(notification);
            self.reschedule();
        } else {
            debug!("Notification {id} queued ({} pending)", self.pending.len() + 1);
            self.pending.push_back(notification);
        }

        Some(id)
    }

    /// Dismisses a notification, visible or queued.
    ///
    /// A live notification enters its removal window; capacity is released
    /// once the window ends. Returns `false` if nothing changed, which makes
    /// repeated calls harmless.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(slot) = self.visible.iter_mut().find(|s| s.notification.id == id) {
            if slot.closing {
                return false;
            }
            slot.closing = true;
            debug!("Evicting notification {id}");
            self.renderer.closing(id);

            if self.config.removal_delay.is_zero() {
                self.finish_removal(id);
            } else {
                let deadline = self.clock.now() + self.config.removal_delay;
                self.arm(id, TimerKind::Remove, deadline);
            }
            self.reschedule();
            return true;
        }

        if let Some(pos) = self.pending.iter().position(|n| n.id == id) {
            self.pending.remove(pos);
            debug!("Dropped queued notification {id}");
            return true;
        }

        false
    }

    /// Drops every notification and timer. Returns how many were visible.
    pub fn clear_all(&mut self) -> usize {
        self.timers.clear();
        self.pending.clear();

        let cleared = self.visible.len();
        for slot in self.visible.drain(..) {
            self.renderer.remove(slot.notification.id);
        }
        debug!("Cleared {cleared} visible notifications");
        cleared
    }

    /// Fires every timer that is due, earliest first. Returns how many fired.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while let Some((id, timer)) = self.next_due(now) {
            fired += 1;
            match timer.kind {
                TimerKind::Evict => {
                    self.dismiss(id);
                }
                TimerKind::Remove => {
                    if self.finish_removal(id) {
                        self.reschedule();
                    }
                }
            }
        }

        fired
    }

    /// Applies new settings to a running scheduler.
    ///
    /// If the capacity shrank below the number of visible notifications, the
    /// oldest are removed at once, without a removal window.
    pub fn reconfigure(&mut self, mut config: SchedulerConfig) {
        config.max_visible = config.max_visible.max(1);
        self.config = config;

        while self.visible.len() > self.config.max_visible {
            let slot = self.visible.remove(0);
            let id = slot.notification.id;
            self.timers.remove(&id);
            self.renderer.remove(id);
            debug!("Removed notification {id} to fit new capacity");
        }

        self.promote();
        self.reschedule();
        debug!("Scheduler reconfigured: {:?}", self.config);
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = Some(width);
    }

    pub fn set_notifications_disabled(&mut self, disabled: bool) {
        self.config.notifications_disabled = disabled;
    }

    pub fn is_suppressed(&self) -> bool {
        self.config.notifications_disabled
            || self
                .viewport_width
                .is_some_and(|w| w < self.config.min_viewport_width)
    }

    // ── Inspection ──

    /// Visible notifications, oldest first, closing ones included.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter().map(|s| &s.notification)
    }

    pub fn queued(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn queued_count(&self) -> usize {
        self.pending.len()
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn timer(&self, id: NotificationId) -> Option<ScheduledTimer> {
        self.timers.get(&id).copied()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    pub fn is_closing(&self, id: NotificationId) -> bool {
        self.visible
            .iter()
            .any(|s| s.notification.id == id && s.closing)
    }

    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.pending.is_empty()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    // ── Internals ──

    fn show(&mut self, notification: Notification) {
        debug!("Showing notification {}", notification.id);
        self.renderer.render(&notification);
        self.visible.push(Slot {
            notification,
            closing: false,
        });
    }

    /// Ends the removal window of `id`. Returns `true` if a queued
    /// notification took its place.
    fn finish_removal(&mut self, id: NotificationId) -> bool {
        self.timers.remove(&id);
        let Some(pos) = self.visible.iter().position(|s| s.notification.id == id) else {
            return false;
        };
        self.visible.remove(pos);
        self.renderer.remove(id);
        debug!("Removed notification {id}");

        self.promote()
    }

    fn promote(&mut self) -> bool {
        let mut promoted = false;
        while self.visible.len() < self.config.max_visible {
            let Some(notification) = self.pending.pop_front() else {
                break;
            };
            debug!("Promoting queued notification {}", notification.id);
            self.show(notification);
            promoted = true;
        }
        promoted
    }

    /// Recomputes every eviction timer from now: position `p` among the live
    /// notifications, oldest first, expires after `display + p * stagger`.
    fn reschedule(&mut self) {
        let now = self.clock.now();
        let display = self.config.display_duration;
        let stagger = self.config.stagger;

        let live: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|s| !s.closing)
            .map(|s| s.notification.id)
            .collect();

        for (position, id) in live.into_iter().enumerate() {
            let deadline = now + display + stagger * position as u32;
            self.arm(id, TimerKind::Evict, deadline);
        }
    }

    fn next_due(&self, now: Instant) -> Option<(NotificationId, ScheduledTimer)> {
        self.timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.handle))
            .map(|(id, t)| (*id, *t))
    }

    /// Replaces whatever timer `id` had.
    fn arm(&mut self, id: NotificationId, kind: TimerKind, deadline: Instant) {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(
            id,
            ScheduledTimer {
                handle,
                kind,
                deadline,
            },
        );
    }
}
