//! Side-effect interfaces invoked by the session engine.
//!
//! Every transition fans out into a handful of fire-and-forget effects:
//! a desktop notification, a chat presence update, a media-player command,
//! the pause overlay, and the tray icon. The engine only ever sees these
//! narrow traits; the concrete implementations live in the tray crate and
//! in `crate::integrations`.

use std::error::Error;

use super::state::SessionState;

/// Remote chat availability, as understood by the presence endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Busy,
    Online,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Busy => "busy",
            PresenceStatus::Online => "online",
        }
    }
}

/// Transport-level media-player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCommand {
    Play,
    Pause,
}

impl MediaCommand {
    /// MPRIS method name for this command.
    pub fn method(&self) -> &'static str {
        match self {
            MediaCommand::Play => "Play",
            MediaCommand::Pause => "Pause",
        }
    }
}

/// Best-effort user-visible message.
pub trait Notifier: Send + Sync {
    fn notify(&self, summary: &str, body: &str) -> Result<(), Box<dyn Error>>;
}

/// Remote "busy/online" status.
pub trait Presence: Send + Sync {
    fn set_status(&self, status: PresenceStatus) -> Result<(), Box<dyn Error>>;
}

/// Play/pause commands toward a media-playback endpoint.
pub trait MediaControl: Send + Sync {
    fn send(&self, command: MediaCommand) -> Result<(), Box<dyn Error>>;
}

/// Full-screen break indicator across all displays.
pub trait Overlay: Send + Sync {
    fn show(&self) -> Result<(), Box<dyn Error>>;

    fn hide(&self) -> Result<(), Box<dyn Error>>;
}

/// Remaining-time readout on the tray icon.
pub trait StatusIcon: Send + Sync {
    fn update(&self, label: &str, state: SessionState) -> Result<(), Box<dyn Error>>;
}

/// The full set of effects a session engine drives.
pub struct Hooks {
    pub notifier: Box<dyn Notifier>,
    pub presence: Box<dyn Presence>,
    pub media: Box<dyn MediaControl>,
    pub overlay: Box<dyn Overlay>,
    pub icon: Box<dyn StatusIcon>,
}

/// Stand-in used when no presence endpoint is configured.
pub struct NoopPresence;

impl Presence for NoopPresence {
    fn set_status(&self, _status: PresenceStatus) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
