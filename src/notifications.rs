//! Toast notifications.
//!
//! `Toasts` queues notices, limits how many are visible at once and expires
//! them after a fixed delay. Time comes from egui's input clock (seconds since
//! start), which works the same natively and on the web.

use std::collections::VecDeque;

/// Maximum number of notifications visible at once.
const MAX_VISIBLE: usize = 3;

/// Seconds a notification stays on screen.
const AUTO_DISMISS_SECS: f64 = 3.0;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
}

impl Severity {
    fn color(self) -> egui::Color32 {
        match self {
            Self::Success => egui::Color32::from_rgb(34, 160, 90),
            Self::Info => egui::Color32::from_rgb(52, 120, 220),
        }
    }
}

/// A notice shown to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    /// Set when the notice becomes visible.
    shown_at: Option<f64>,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message: message.into(),
            shown_at: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn expired(&self, now: f64) -> bool {
        self.shown_at
            .is_some_and(|shown| now - shown >= AUTO_DISMISS_SECS)
    }
}

/// Manages the notification queue and visible notifications.
#[derive(Debug, Default)]
pub struct Toasts {
    /// Currently visible notifications (newest first).
    visible: VecDeque<Notification>,
    /// Waiting for a visible slot.
    queue: VecDeque<Notification>,
    /// Last clock value seen by `tick`.
    now: f64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut notification: Notification) {
        log::info!("{}", notification.message);
        if self.visible.len() < MAX_VISIBLE {
            notification.shown_at = Some(self.now);
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Removes a notification, visible or queued. Returns `true` if it was found.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Advances the clock to `now` and dismisses expired notifications.
    pub fn tick(&mut self, now: f64) {
        self.now = now;
        let before = self.visible.len();
        self.visible.retain(|n| !n.expired(now));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            let Some(mut notification) = self.queue.pop_front() else {
                break;
            };
            notification.shown_at = Some(self.now);
            self.visible.push_front(notification);
        }
    }

    /// Draws the visible toasts in the bottom-right corner.
    pub fn show(&mut self, ctx: &egui::Context) {
        if self.visible.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for notification in &self.visible {
                    egui::Frame::popup(ui.style())
                        .stroke(egui::Stroke::new(1.5, notification.severity.color()))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.colored_label(notification.severity.color(), "●");
                                ui.label(&notification.message);
                                if ui.small_button("✕").clicked() {
                                    dismissed = Some(notification.id);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(id) = dismissed {
            self.dismiss(id);
        }

        // Keep ticking while something is on screen so toasts expire without input.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
