//! Notifier that renders notifications as log events.

use crate::domain::{Notification, NotificationLevel};
use crate::ports::Notifier;
use tracing::{error, info};

/// [`Notifier`] writing to the `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!(target: "ks::notify", "{}", notification.message),
            NotificationLevel::Error => error!(target: "ks::notify", "{}", notification.message),
        }
    }
}
