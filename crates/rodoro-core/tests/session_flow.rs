//! End-to-end session scenarios driven on a paused clock.
//!
//! These tests exercise the full engine through its public surface: commands
//! come in as a tray user would issue them, ticks come from the scheduler,
//! and the recorded side effects are checked against the expected flow.

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodoro_core::{
    Durations, Hooks, MediaCommand, MediaControl, Notifier, Overlay, Presence, PresenceStatus,
    SessionEngine, SessionState, StatusIcon, TickScheduler,
};

#[derive(Clone, Default)]
struct Recorder {
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn push(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }

    fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn count_of(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }

    fn clear(&self) {
        self.log.lock().unwrap().clear();
    }
}

impl Notifier for Recorder {
    fn notify(&self, summary: &str, _body: &str) -> Result<(), Box<dyn Error>> {
        self.push(format!("notify:{summary}"));
        Ok(())
    }
}

impl Presence for Recorder {
    fn set_status(&self, status: PresenceStatus) -> Result<(), Box<dyn Error>> {
        self.push(format!("presence:{}", status.as_str()));
        Ok(())
    }
}

impl MediaControl for Recorder {
    fn send(&self, command: MediaCommand) -> Result<(), Box<dyn Error>> {
        self.push(format!("media:{}", command.method()));
        Ok(())
    }
}

impl Overlay for Recorder {
    fn show(&self) -> Result<(), Box<dyn Error>> {
        self.push("overlay:show".into());
        Ok(())
    }

    fn hide(&self) -> Result<(), Box<dyn Error>> {
        self.push("overlay:hide".into());
        Ok(())
    }
}

impl StatusIcon for Recorder {
    fn update(&self, label: &str, _state: SessionState) -> Result<(), Box<dyn Error>> {
        self.push(format!("icon:{label}"));
        Ok(())
    }
}

fn engine_with(durations: Durations) -> (Arc<SessionEngine>, Recorder) {
    let rec = Recorder::default();
    let hooks = Hooks {
        notifier: Box::new(rec.clone()),
        presence: Box::new(rec.clone()),
        media: Box::new(rec.clone()),
        overlay: Box::new(rec.clone()),
        icon: Box::new(rec.clone()),
    };
    let scheduler = TickScheduler::new(tokio::runtime::Handle::current());
    (SessionEngine::new(durations, hooks, scheduler), rec)
}

/// The canonical configuration: 50 m work, 10 m pause, 1 m ticks, 5 m lead.
fn minute_tick_durations() -> Durations {
    Durations {
        work: Duration::from_secs(50 * 60),
        pause: Duration::from_secs(10 * 60),
        tick: Duration::from_secs(60),
        announce: Duration::from_secs(5 * 60),
    }
}

async fn advance_ticks(n: u32, tick: Duration) {
    // Let the already-scheduled tick register its timer before the first
    // clock advance, so paused time fires it rather than re-arming it.
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    for _ in 0..n {
        tokio::time::advance(tick).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn work_interval_announces_then_rolls_into_pause() {
    let durations = minute_tick_durations();
    let (engine, rec) = engine_with(durations);

    engine.start_session();
    assert_eq!(engine.state(), SessionState::Working);
    assert_eq!(engine.remaining(), Duration::from_secs(50 * 60));

    advance_ticks(45, durations.tick).await;
    assert_eq!(engine.remaining(), Duration::from_secs(5 * 60));
    assert_eq!(rec.count_of("notify:Session ends in 05 minutes."), 1);
    assert_eq!(engine.state(), SessionState::Working);

    advance_ticks(5, durations.tick).await;
    assert_eq!(engine.state(), SessionState::Paused);
    assert_eq!(engine.remaining(), Duration::from_secs(10 * 60));
    assert_eq!(rec.count_of("notify:Pause Started"), 1);
    assert_eq!(rec.count_of("overlay:show"), 1);
}

#[tokio::test(start_paused = true)]
async fn pause_interval_rolls_back_into_work() {
    let durations = minute_tick_durations();
    let (engine, rec) = engine_with(durations);

    engine.start_pause();
    advance_ticks(5, durations.tick).await;
    assert_eq!(rec.count_of("notify:Session starts in 05 minutes."), 1);

    advance_ticks(5, durations.tick).await;
    assert_eq!(engine.state(), SessionState::Working);
    assert_eq!(engine.remaining(), Duration::from_secs(50 * 60));
    assert_eq!(rec.count_of("notify:Work Started"), 1);
    // Overlay comes down when the pause ends.
    assert_eq!(rec.count_of("overlay:hide"), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_during_pause_clears_everything() {
    let durations = minute_tick_durations();
    let (engine, rec) = engine_with(durations);

    engine.start_pause();
    advance_ticks(7, durations.tick).await;
    assert_eq!(engine.remaining(), Duration::from_secs(3 * 60));

    engine.stop_session();
    assert_eq!(engine.state(), SessionState::Stopped);
    assert_eq!(engine.remaining(), Duration::ZERO);
    assert_eq!(rec.count_of("icon:off"), 1);
    assert_eq!(rec.count_of("overlay:hide"), 1);

    // No further ticks are scheduled.
    rec.clear();
    advance_ticks(20, durations.tick).await;
    assert!(rec.entries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_right_after_start_drains_the_pending_tick() {
    let durations = minute_tick_durations();
    let (engine, rec) = engine_with(durations);

    engine.start_session();
    engine.stop_session();
    rec.clear();

    advance_ticks(10, durations.tick).await;
    assert!(rec.entries().is_empty());
    assert_eq!(engine.state(), SessionState::Stopped);
    assert_eq!(engine.remaining(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn restarting_never_stacks_tick_callbacks() {
    let durations = minute_tick_durations();
    let (engine, rec) = engine_with(durations);

    for _ in 0..5 {
        engine.start_session();
    }
    rec.clear();

    // One live timer means exactly one icon refresh per tick.
    advance_ticks(1, durations.tick).await;
    assert_eq!(rec.count_of("icon:"), 1);
    assert_eq!(engine.remaining(), Duration::from_secs(49 * 60));
}

#[tokio::test(start_paused = true)]
async fn unaligned_lead_still_announces_once() {
    // 150 s work with 60 s ticks never passes through remaining == 70 s;
    // the announcement latches on the first tick at or below the lead.
    let durations = Durations {
        work: Duration::from_secs(150),
        pause: Duration::from_secs(120),
        tick: Duration::from_secs(60),
        announce: Duration::from_secs(70),
    };
    let (engine, rec) = engine_with(durations);

    engine.start_session();
    advance_ticks(1, durations.tick).await;
    // remaining = 90 s, above the lead.
    assert_eq!(rec.count_of("notify:Session ends in"), 0);

    advance_ticks(1, durations.tick).await;
    // remaining = 30 s, below the lead: announce once, rounded to 1 minute.
    assert_eq!(rec.count_of("notify:Session ends in 01 minutes."), 1);

    advance_ticks(1, durations.tick).await;
    assert_eq!(engine.state(), SessionState::Paused);
    assert_eq!(rec.count_of("notify:Session ends in"), 1);
}

#[tokio::test(start_paused = true)]
async fn full_cycle_alternates_work_and_pause() {
    let durations = Durations {
        work: Duration::from_secs(4),
        pause: Duration::from_secs(2),
        tick: Duration::from_secs(1),
        announce: Duration::from_secs(1),
    };
    let (engine, rec) = engine_with(durations);

    engine.start_session();
    // work -> pause -> work -> pause
    advance_ticks(12, durations.tick).await;

    assert_eq!(rec.count_of("notify:Pause Started"), 2);
    assert_eq!(rec.count_of("notify:Work Started"), 3);
    assert_eq!(engine.state(), SessionState::Working);
}
