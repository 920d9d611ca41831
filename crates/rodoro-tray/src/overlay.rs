//! Full-screen pause overlay.
//!
//! One borderless fullscreen window per monitor, filled with a solid color.
//! The set is recreated from scratch on every show so monitor changes are
//! picked up, and destroyed wholesale on hide.

use std::error::Error;
use std::num::NonZeroU32;
use std::rc::Rc;

use tracing::warn;
use winit::event_loop::ActiveEventLoop;
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Window, WindowId};

/// Solid fill, in softbuffer's 0RGB layout. Black, like a switched-off display.
const FILL: u32 = 0x0000_0000;

struct Pane {
    window: Rc<Window>,
    surface: softbuffer::Surface<Rc<Window>, Rc<Window>>,
    _context: softbuffer::Context<Rc<Window>>,
}

impl Pane {
    fn new(event_loop: &ActiveEventLoop, monitor: MonitorHandle) -> Result<Self, Box<dyn Error>> {
        let attrs = Window::default_attributes()
            .with_title("Rodoro")
            .with_decorations(false)
            .with_fullscreen(Some(Fullscreen::Borderless(Some(monitor))));
        let window = Rc::new(event_loop.create_window(attrs)?);
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;
        window.request_redraw();
        Ok(Self {
            window,
            surface,
            _context: context,
        })
    }

    fn redraw(&mut self) {
        let size = self.window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        if let Err(e) = self.fill(w, h) {
            warn!("overlay redraw failed: {e}");
        }
    }

    fn fill(&mut self, w: NonZeroU32, h: NonZeroU32) -> Result<(), Box<dyn Error>> {
        self.surface.resize(w, h)?;
        let mut buffer = self.surface.buffer_mut()?;
        buffer.fill(FILL);
        buffer.present()?;
        Ok(())
    }
}

pub struct OverlaySet {
    panes: Vec<Pane>,
}

impl OverlaySet {
    pub fn new() -> Self {
        Self { panes: Vec::new() }
    }

    pub fn show(&mut self, event_loop: &ActiveEventLoop) {
        self.hide();
        for monitor in event_loop.available_monitors() {
            match Pane::new(event_loop, monitor) {
                Ok(pane) => self.panes.push(pane),
                Err(e) => warn!("overlay window creation failed: {e}"),
            }
        }
    }

    pub fn hide(&mut self) {
        self.panes.clear();
    }

    pub fn redraw(&mut self, id: WindowId) {
        if let Some(pane) = self.panes.iter_mut().find(|p| p.window.id() == id) {
            pane.redraw();
        }
    }
}
