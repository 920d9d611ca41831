mod engine;
mod hooks;
mod state;

pub use engine::SessionEngine;
pub use hooks::{
    Hooks, MediaCommand, MediaControl, NoopPresence, Notifier, Overlay, Presence,
    PresenceStatus, StatusIcon,
};
pub use state::{Durations, SessionState};
