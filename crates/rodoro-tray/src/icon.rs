//! Tray icon rendering.
//!
//! The icon is a small square showing the remaining minutes (or "off"),
//! with the text color keyed to the session state.

use std::error::Error;

use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use rodoro_core::SessionState;

/// Label shown while no session is running.
pub const IDLE_LABEL: &str = "off";

const SIZE: u32 = 22;
const FONT_SIZE: f32 = 14.0;

pub struct IconRenderer {
    font_system: FontSystem,
    swash: SwashCache,
}

impl IconRenderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash: SwashCache::new(),
        }
    }

    /// Render `label` into a square tray icon: green while working, red
    /// while paused, grey otherwise.
    pub fn render(
        &mut self,
        label: &str,
        state: SessionState,
    ) -> Result<tray_icon::Icon, Box<dyn Error>> {
        let (r, g, b): (u8, u8, u8) = match state {
            SessionState::Working => (0x00, 0xFF, 0x00),
            SessionState::Paused => (0xFF, 0x00, 0x00),
            SessionState::Stopped => (0x80, 0x80, 0x80),
        };

        let mut pixmap = Pixmap::new(SIZE, SIZE).ok_or("failed to allocate icon pixmap")?;

        let metrics = Metrics::new(FONT_SIZE, SIZE as f32);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, Some(SIZE as f32), Some(SIZE as f32));
        buffer.set_text(
            &mut self.font_system,
            label,
            Attrs::new().family(Family::Monospace),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        // Center the label horizontally.
        let line_w = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0_f32, f32::max);
        let x_off = ((SIZE as f32 - line_w) / 2.0).max(0.0) as i32;

        let width = SIZE as i32;
        let pixels = pixmap.pixels_mut();
        buffer.draw(
            &mut self.font_system,
            &mut self.swash,
            Color::rgb(r, g, b),
            |x, y, w, h, color| {
                let alpha = color.a();
                if alpha == 0 {
                    return;
                }
                let premul = |v: u8| ((v as u16 * alpha as u16) / 255) as u8;
                let Some(pixel) = PremultipliedColorU8::from_rgba(
                    premul(color.r()),
                    premul(color.g()),
                    premul(color.b()),
                    alpha,
                ) else {
                    return;
                };
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        let px = x + x_off + dx;
                        let py = y + dy;
                        if px < 0 || py < 0 || px >= width || py >= width {
                            continue;
                        }
                        pixels[(py * width + px) as usize] = pixel;
                    }
                }
            },
        );

        Ok(tray_icon::Icon::from_rgba(pixmap.take(), SIZE, SIZE)?)
    }
}
