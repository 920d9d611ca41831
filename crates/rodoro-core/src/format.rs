//! Remaining-time formatting helpers shared by the tray icon and the
//! pre-expiry announcements.

use std::time::Duration;

/// Whole minutes, rounding the fraction half-up.
pub fn whole_minutes(d: Duration) -> u64 {
    (d.as_secs() + 30) / 60
}

/// Two-digit minute readout shown on the tray icon.
pub fn minutes_label(d: Duration) -> String {
    format!("{:02}", whole_minutes(d))
}
