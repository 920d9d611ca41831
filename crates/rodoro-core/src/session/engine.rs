//! Session engine implementation.
//!
//! The engine is the sole owner of the session state and the countdown. It
//! alternates between work and pause intervals, driven by one-shot tick
//! callbacks it schedules for itself, and fans each transition out into the
//! configured side effects (notification, presence, media, overlay, icon).
//!
//! ## State transitions
//!
//! ```text
//! Stopped|Working|Paused --start_session--> Working
//! Stopped|Working|Paused --start_pause-->   Paused
//! any                    --stop_session-->  Stopped
//! Working --tick, remaining=0--> Paused     (auto)
//! Paused  --tick, remaining=0--> Working    (auto)
//! ```
//!
//! Every public operation and every tick callback serializes on one mutex,
//! so exactly one transition runs at a time. Each transition cancels the
//! pending tick and bumps an epoch counter; a tick that already fired but
//! carries a stale epoch is discarded under the same lock and can never
//! touch the counters of the state that replaced it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tracing::{debug, warn};

use crate::format;
use crate::scheduler::{ScheduledTick, TickScheduler};

use super::hooks::{Hooks, MediaCommand, PresenceStatus};
use super::state::{Durations, SessionState};

/// Label shown on the tray icon while no session is running.
const IDLE_LABEL: &str = "off";

struct Inner {
    state: SessionState,
    remaining: Duration,
    /// The one pending tick callback, if any.
    tick: Option<ScheduledTick>,
    /// Bumped on every transition; stale tick callbacks fail this gate.
    epoch: u64,
    /// Whether the pre-expiry announcement already fired this interval.
    announced: bool,
}

impl Inner {
    fn cancel_tick(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(tick) = self.tick.take() {
            tick.cancel();
        }
    }
}

/// Core session state machine.
///
/// Owns the state, the remaining-time counter, and the pending tick handle;
/// the only component that schedules or cancels timers.
pub struct SessionEngine {
    durations: Durations,
    hooks: Hooks,
    scheduler: TickScheduler,
    weak: Weak<SessionEngine>,
    inner: Mutex<Inner>,
}

impl SessionEngine {
    /// Create an engine in the `Stopped` state. Nothing is scheduled until
    /// the first `start_session`/`start_pause` call.
    pub fn new(durations: Durations, hooks: Hooks, scheduler: TickScheduler) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            durations,
            hooks,
            scheduler,
            weak: weak.clone(),
            inner: Mutex::new(Inner {
                state: SessionState::Stopped,
                remaining: Duration::ZERO,
                tick: None,
                epoch: 0,
                announced: false,
            }),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    pub fn remaining(&self) -> Duration {
        self.lock().remaining
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a work interval from full duration, from any state. Calling
    /// while already `Working` restarts the interval.
    pub fn start_session(&self) {
        let mut inner = self.lock();
        self.enter_working(&mut inner);
    }

    /// Begin a pause interval from full duration, from any state.
    pub fn start_pause(&self) {
        let mut inner = self.lock();
        self.enter_paused(&mut inner);
    }

    /// Stop the session. Callable from any state including `Stopped`; the
    /// side effects re-fire even when nothing was running.
    pub fn stop_session(&self) {
        let mut inner = self.lock();
        self.enter_stopped(&mut inner);
    }

    // ── Transitions ──────────────────────────────────────────────────

    fn enter_working(&self, inner: &mut Inner) {
        inner.cancel_tick();
        inner.state = SessionState::Working;
        inner.remaining = self.durations.work;
        inner.announced = false;
        inner.tick = Some(self.schedule_tick(inner.epoch));
        debug!(remaining = ?inner.remaining, "work session started");

        self.best_effort("presence update", self.hooks.presence.set_status(PresenceStatus::Busy));
        self.best_effort("media control", self.hooks.media.send(MediaCommand::Play));
        self.best_effort("overlay teardown", self.hooks.overlay.hide());
        self.update_icon(inner);
        self.best_effort("notification", self.hooks.notifier.notify("Work Started", ""));
    }

    fn enter_paused(&self, inner: &mut Inner) {
        inner.cancel_tick();
        inner.state = SessionState::Paused;
        inner.remaining = self.durations.pause;
        inner.announced = false;
        inner.tick = Some(self.schedule_tick(inner.epoch));
        debug!(remaining = ?inner.remaining, "pause started");

        self.best_effort("presence update", self.hooks.presence.set_status(PresenceStatus::Online));
        self.best_effort("media control", self.hooks.media.send(MediaCommand::Pause));
        self.best_effort("overlay", self.hooks.overlay.show());
        self.update_icon(inner);
        self.best_effort("notification", self.hooks.notifier.notify("Pause Started", ""));
    }

    fn enter_stopped(&self, inner: &mut Inner) {
        inner.cancel_tick();
        inner.state = SessionState::Stopped;
        inner.remaining = Duration::ZERO;
        inner.announced = false;
        debug!("session stopped");

        self.best_effort("presence update", self.hooks.presence.set_status(PresenceStatus::Online));
        self.best_effort("overlay teardown", self.hooks.overlay.hide());
        self.best_effort("icon update", self.hooks.icon.update(IDLE_LABEL, inner.state));
        self.best_effort("notification", self.hooks.notifier.notify("Session Stopped", ""));
    }

    // ── Tick ─────────────────────────────────────────────────────────

    fn on_tick(&self, epoch: u64) {
        let mut inner = self.lock();
        if epoch != inner.epoch || !inner.state.is_running() {
            // A transition raced this callback; the old interval's tick must
            // not touch the counters of the state that replaced it.
            return;
        }

        inner.remaining = inner.remaining.saturating_sub(self.durations.tick);
        inner.tick = Some(self.schedule_tick(epoch));
        self.update_icon(&inner);

        if inner.remaining.is_zero() {
            match inner.state {
                SessionState::Paused => self.enter_working(&mut inner),
                SessionState::Working => self.enter_paused(&mut inner),
                SessionState::Stopped => {}
            }
        } else if !inner.announced && inner.remaining <= self.durations.announce {
            inner.announced = true;
            self.announce(&inner);
        }
    }

    fn schedule_tick(&self, epoch: u64) -> ScheduledTick {
        let engine = self.weak.clone();
        self.scheduler.schedule(self.durations.tick, move || {
            if let Some(engine) = engine.upgrade() {
                engine.on_tick(epoch);
            }
        })
    }

    // ── Side effects ─────────────────────────────────────────────────

    fn update_icon(&self, inner: &Inner) {
        let label = format::minutes_label(inner.remaining);
        self.best_effort("icon update", self.hooks.icon.update(&label, inner.state));
    }

    fn announce(&self, inner: &Inner) {
        let minutes = format::whole_minutes(inner.remaining);
        let message = match inner.state {
            SessionState::Paused => format!("Session starts in {minutes:02} minutes."),
            _ => format!("Session ends in {minutes:02} minutes."),
        };
        self.best_effort("notification", self.hooks.notifier.notify(&message, ""));
    }

    /// Side effects never interrupt a transition; failures are logged and
    /// dropped.
    fn best_effort(&self, what: &str, result: Result<(), Box<dyn std::error::Error>>) {
        if let Err(e) = result {
            warn!("{what} failed: {e}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
