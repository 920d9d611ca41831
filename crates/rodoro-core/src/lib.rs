//! # Rodoro Core Library
//!
//! This library provides the core logic for Rodoro, a Pomodoro-style session
//! timer that alternates between work and pause intervals. The system-tray
//! binary is a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Session engine**: the state machine owning the Stopped/Working/Paused
//!   state and the countdown; it schedules its own tick callbacks and drives
//!   every side effect
//! - **Scheduler**: cancelable one-shot callbacks on the tokio timer wheel
//! - **Hooks**: narrow traits for the effects a transition fans out into
//!   (notification, presence, media, overlay, tray icon)
//! - **Integrations**: Rocket.Chat presence and MPRIS media control
//! - **Config**: TOML-based configuration read once at startup
//!
//! ## Key components
//!
//! - [`SessionEngine`]: core session state machine
//! - [`TickScheduler`]: one-shot callback scheduling
//! - [`Config`]: application configuration

pub mod config;
pub mod error;
pub mod format;
pub mod integrations;
pub mod scheduler;
pub mod session;

pub use config::{Config, MediaConfig, PresenceConfig, TimerConfig};
pub use error::{ConfigError, CoreError};
pub use integrations::{MprisMediaControl, RocketChatPresence};
pub use scheduler::{ScheduledTick, TickScheduler};
pub use session::{
    Durations, Hooks, MediaCommand, MediaControl, NoopPresence, Notifier, Overlay, Presence,
    PresenceStatus, SessionEngine, SessionState, StatusIcon,
};
