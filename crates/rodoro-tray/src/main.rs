//! Rodoro -- a Pomodoro-style timer living in the system tray.
//!
//! The tray menu feeds commands into the session engine from
//! `rodoro-core`; the engine's side effects come back over a channel and
//! are applied here on the event-loop thread (tray icon, pause overlay).

use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tray_icon::menu::MenuEvent;
use tray_icon::{TrayIcon, TrayIconBuilder};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use rodoro_core::{
    Config, Hooks, MprisMediaControl, NoopPresence, Notifier, Presence, RocketChatPresence,
    SessionEngine, SessionState, TickScheduler,
};

mod bridge;
mod icon;
mod menu;
mod notifier;
mod overlay;

use bridge::{IconBridge, OverlayBridge, UiMessage};
use icon::IconRenderer;
use notifier::DesktopNotifier;
use overlay::OverlaySet;

#[derive(Parser)]
#[command(name = "rodoro", version, about = "Pomodoro timer in the system tray")]
struct Args {
    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Work interval in minutes
    #[arg(long)]
    work_minutes: Option<u64>,

    /// Pause interval in minutes
    #[arg(long)]
    pause_minutes: Option<u64>,

    /// Announcement lead in minutes
    #[arg(long)]
    announce_minutes: Option<u64>,

    /// Countdown granularity in seconds
    #[arg(long)]
    tick_seconds: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let (mut config, notices) = load_config(&args);
    if let Some(minutes) = args.work_minutes {
        config.timer.work_minutes = minutes;
    }
    if let Some(minutes) = args.pause_minutes {
        config.timer.pause_minutes = minutes;
    }
    if let Some(minutes) = args.announce_minutes {
        config.timer.announce_minutes = minutes;
    }
    if let Some(seconds) = args.tick_seconds {
        config.timer.tick_seconds = seconds;
    }
    let durations = config.timer.durations()?;

    // The runtime hosts the tick timers and the fire-and-forget presence
    // requests; it must outlive the event loop.
    let runtime = Runtime::new()?;
    let scheduler = TickScheduler::new(runtime.handle().clone());

    let startup_notifier = DesktopNotifier;
    for notice in &notices {
        eprintln!("{notice}");
        if let Err(e) = startup_notifier.notify(notice, "") {
            warn!("startup notification failed: {e}");
        }
    }

    let presence: Box<dyn Presence> = match &config.presence {
        Some(cfg) => match RocketChatPresence::new(cfg, runtime.handle().clone()) {
            Ok(client) => Box::new(client),
            Err(e) => {
                let message = format!("Presence control disabled: {e}");
                eprintln!("{message}");
                if let Err(e) = startup_notifier.notify(&message, "") {
                    warn!("startup notification failed: {e}");
                }
                Box::new(NoopPresence)
            }
        },
        None => Box::new(NoopPresence),
    };

    let (ui_tx, ui_rx) = channel();
    let hooks = Hooks {
        notifier: Box::new(DesktopNotifier),
        presence,
        media: Box::new(MprisMediaControl::new(&config.media.player)),
        overlay: Box::new(OverlayBridge::new(ui_tx.clone())),
        icon: Box::new(IconBridge::new(ui_tx)),
    };
    let engine = SessionEngine::new(durations, hooks, scheduler);

    let event_loop = EventLoop::new()?;
    let (tray_menu, items) = menu::build()?;
    let mut renderer = IconRenderer::new();
    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(tray_menu))
        .with_tooltip("Rodoro Timer")
        .with_icon(renderer.render(icon::IDLE_LABEL, SessionState::Stopped)?)
        .build()?;

    let mut app = TrayApp {
        engine,
        tray,
        items,
        ui_rx,
        renderer,
        overlays: OverlaySet::new(),
        _runtime: runtime,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Read the config file, collecting user-facing notices instead of failing:
/// a missing or broken file disables presence control but never blocks the
/// timer itself.
fn load_config(args: &Args) -> (Config, Vec<String>) {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => match Config::config_path() {
            Ok(path) => path,
            Err(e) => {
                return (
                    Config::default(),
                    vec![format!("Can't resolve config directory: {e}")],
                )
            }
        },
    };

    if !path.exists() {
        return (
            Config::default(),
            vec![format!("No presence credentials in {}", path.display())],
        );
    }

    match Config::load_from(&path) {
        Ok(config) => (config, Vec::new()),
        Err(e) => (
            Config::default(),
            vec![format!("Can't read config at {}: {e}", path.display())],
        ),
    }
}

struct TrayApp {
    engine: Arc<SessionEngine>,
    tray: TrayIcon,
    items: menu::MenuHandles,
    ui_rx: Receiver<UiMessage>,
    renderer: IconRenderer,
    overlays: OverlaySet,
    _runtime: Runtime,
}

impl TrayApp {
    fn drain_ui_messages(&mut self, event_loop: &ActiveEventLoop) {
        while let Ok(message) = self.ui_rx.try_recv() {
            match message {
                UiMessage::Icon { label, state } => match self.renderer.render(&label, state) {
                    Ok(rendered) => {
                        if let Err(e) = self.tray.set_icon(Some(rendered)) {
                            warn!("tray icon update failed: {e}");
                        }
                    }
                    Err(e) => warn!("icon rendering failed: {e}"),
                },
                UiMessage::ShowOverlay => self.overlays.show(event_loop),
                UiMessage::HideOverlay => self.overlays.hide(),
            }
        }
    }

    fn handle_menu_events(&mut self, event_loop: &ActiveEventLoop) {
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if event.id() == self.items.start.id() {
                self.engine.start_session();
            } else if event.id() == self.items.stop.id() {
                self.engine.stop_session();
            } else if event.id() == self.items.pause.id() {
                self.engine.start_pause();
            } else if event.id() == self.items.quit.id() {
                self.engine.stop_session();
                // Let the stop's icon/overlay effects land before leaving.
                self.drain_ui_messages(event_loop);
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for TrayApp {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Tray-only app; windows exist only while the pause overlay is up.
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::RedrawRequested => self.overlays.redraw(window_id),
            // Overlay windows only go away when the pause ends.
            WindowEvent::CloseRequested => {}
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        self.drain_ui_messages(event_loop);
        self.handle_menu_events(event_loop);
    }
}
