//! Toast notifications.
//!
//! [`NotificationCenter::show`] keeps at most one notification on screen:
//! showing a new one destroys the current one, and each notification
//! dismisses itself after its duration.

use std::fmt;
use std::time::Duration;

use domlet::{Element, RenderSurface};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::registry::{Destroy, Singleton};

/// Message shown when none is given.
pub const DEFAULT_MESSAGE: &str = "Hello world!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Time on screen.
    ///
    /// Default: 1 second
    pub duration: Duration,

    /// Default: success
    pub kind: NotificationKind,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            kind: NotificationKind::Success,
        }
    }
}

impl NotificationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero duration keeps the default.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        if !duration.is_zero() {
            self.duration = duration;
        }
        self
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub duration: Duration,
}

impl Notification {
    /// An empty message falls back to [`DEFAULT_MESSAGE`].
    pub fn new(message: impl Into<String>, config: NotificationConfig) -> Self {
        let message = message.into();
        Self {
            id: Uuid::new_v4(),
            message: if message.is_empty() {
                DEFAULT_MESSAGE.to_string()
            } else {
                message
            },
            kind: config.kind,
            duration: config.duration,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn element(&self) -> Element {
        Element::div()
            .id(self.id.to_string())
            .class("notification")
            .class(self.kind.as_str())
            .data("duration", format!("{}s", self.duration.as_secs_f64()))
            .child(Element::div().class("timer"))
            .child(
                Element::div()
                    .class("inner-wrapper")
                    .child(
                        Element::div()
                            .class("notification-header")
                            .child(Element::text(self.kind.as_str())),
                    )
                    .child(
                        Element::div()
                            .class("notification-body")
                            .child(Element::text(self.message.clone())),
                    ),
            )
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE, NotificationConfig::default())
    }
}

/// A notification on screen with its dismissal timer.
pub struct ActiveNotification {
    notification: Notification,
    surface: Box<dyn RenderSurface>,
    timer: Option<JoinHandle<()>>,
}

impl fmt::Debug for ActiveNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveNotification")
            .field("notification", &self.notification)
            .finish_non_exhaustive()
    }
}

impl ActiveNotification {
    pub fn notification(&self) -> &Notification {
        &self.notification
    }
}

impl Destroy for ActiveNotification {
    fn destroy(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.surface.unmount();
        log::debug!("Notification {} dismissed", self.notification.id);
    }
}

/// Shows notifications one at a time.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    active: Singleton<ActiveNotification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `notification` into `surface`, replacing the active one.
    ///
    /// Dismissal is scheduled on the current tokio runtime; outside a
    /// runtime the notification stays until replaced or dismissed.
    pub fn show(
        &self,
        notification: Notification,
        mut surface: impl RenderSurface + 'static,
    ) -> Uuid {
        let id = notification.id;
        // The old notification may share the surface; unmount it first.
        self.active.clear();
        surface.mount(notification.element());

        let timer = match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let active = self.active.clone();
                let duration = notification.duration;
                Some(handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    active.clear_if(|current| current.notification.id == id);
                }))
            }
            Err(_) => {
                log::warn!("No runtime, notification {id} will not dismiss itself");
                None
            }
        };

        log::debug!("Showing notification {id}");
        self.active.replace(ActiveNotification {
            notification,
            surface: Box::new(surface),
            timer,
        });
        id
    }

    /// The notification on screen.
    pub fn active(&self) -> Option<Notification> {
        self.active.with(|a| a.notification.clone())
    }

    /// Dismiss `id` if it is still the active notification.
    pub fn dismiss(&self, id: Uuid) -> bool {
        self.active.clear_if(|current| current.notification.id == id)
    }
}
