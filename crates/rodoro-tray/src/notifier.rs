//! Desktop notifications.

use std::error::Error;

use notify_rust::{Notification, Timeout};
use rodoro_core::Notifier;

const NOTIFICATION_TIMEOUT_MS: u32 = 5000;

pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) -> Result<(), Box<dyn Error>> {
        Notification::new()
            .appname("rodoro")
            .summary(summary)
            .body(body)
            .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT_MS))
            .show()?;
        Ok(())
    }
}
