// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// odmcheck · Diagnostic display
//
// Shows the declared and actual version records on the panel
// when the check fails. Nothing in here may abort the run:
// every failure is logged and the sequence carries on.
//
// Sub-modules
// -----------
// * `backlight`   – LED class brightness node
// * `font`        – 5×7 bitmap font and [`Layout`]
// * `framebuffer` – Linux fbdev [`Surface`]
// ─────────────────────────────────────────────────────────────

pub mod backlight;
pub mod font;
pub mod framebuffer;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use log::{error, info, warn};
use thiserror::Error;

pub use backlight::Backlight;
pub use font::{draw_text, Layout};
pub use framebuffer::Framebuffer;

use crate::version::VersionRecord;

/// Background of the diagnostic screen.
pub const BACKGROUND: Rgb = Rgb(0, 128, 255);
/// Text colour of the diagnostic screen.
pub const FOREGROUND: Rgb = Rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Errors from the display surface.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unusable framebuffer geometry: {0}")]
    Geometry(String),
    #[error("framebuffer write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// A full-screen pixel target.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self, color: Rgb);
    /// Set one pixel; coordinates outside the surface are ignored.
    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb);
    /// Push the drawn frame to the output.
    fn flip(&mut self) -> Result<(), DisplayError>;
}

/// In-memory surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); (width * height) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Number of pixels differing from the default colour.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != Rgb::default()).count()
    }

    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|p| **p == color).count()
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    fn flip(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Draw the diagnostic screen for the two records and flip it.
pub fn render(
    surface: &mut dyn Surface,
    layout: &Layout,
    declared: &VersionRecord,
    actual: &VersionRecord,
) -> Result<(), DisplayError> {
    let layout = &layout.fit(surface.height());
    surface.clear(BACKGROUND);
    draw_text(surface, layout, Some(50), Some(300), "odm_version.prop", FOREGROUND);
    draw_text(surface, layout, Some(50), Some(350), &declared.summary(), FOREGROUND);
    draw_text(surface, layout, Some(50), Some(400), "build.prop", FOREGROUND);
    draw_text(surface, layout, Some(50), Some(450), &actual.summary(), FOREGROUND);
    surface.flip()
}

/// Reports a failed check to the operator.
pub trait Presenter {
    /// Show both records. Must not fail.
    fn present(&mut self, declared: &VersionRecord, actual: &VersionRecord);
}

/// Panel presenter: backlight, framebuffer and a fixed dwell.
#[derive(Debug, Clone)]
pub struct ScreenPresenter {
    pub framebuffer: PathBuf,
    pub fb_sysfs: PathBuf,
    pub backlight: Backlight,
    pub layout: Layout,
    pub dwell: Duration,
}

impl Presenter for ScreenPresenter {
    fn present(&mut self, declared: &VersionRecord, actual: &VersionRecord) {
        let mut surface = match Framebuffer::open(&self.framebuffer, &self.fb_sysfs) {
            Ok(fb) => Some(fb),
            Err(e) => {
                error!("display init failed: {e}");
                None
            }
        };
        self.backlight.set(true);
        if let Some(fb) = surface.as_mut() {
            if let Err(e) = render(fb, &self.layout, declared, actual) {
                warn!("diagnostic screen not shown: {e}");
            }
        }
        thread::sleep(self.dwell);
        self.backlight.set(false);
        drop(surface);
    }
}

/// Presenter for headless runs: the records go to the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn present(&mut self, declared: &VersionRecord, actual: &VersionRecord) {
        info!("odm_version.prop: {}", declared.summary());
        info!("build.prop: {}", actual.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse_str;
    use crate::version::TruncationPolicy;

    #[test]
    fn render_paints_background_and_text() {
        let mut canvas = Canvas::new(1200, 500);
        let declared = parse_str("ro.build.version = 9\n", TruncationPolicy::Truncate);
        render(&mut canvas, &Layout::new(2), &declared, &VersionRecord::default()).unwrap();
        let total = 1200 * 500;
        let bg = canvas.count(BACKGROUND);
        let fg = canvas.count(FOREGROUND);
        assert_eq!(bg + fg, total);
        assert!(fg > 0);
        // nothing drawn above the first text line
        for x in 0..1200 {
            assert_eq!(canvas.pixel(x, 299), Some(BACKGROUND));
        }
    }

    #[test]
    fn render_fits_huge_scale_to_surface() {
        let mut canvas = Canvas::new(64, 16);
        render(&mut canvas, &Layout::new(1000), &VersionRecord::default(), &VersionRecord::default())
            .unwrap();
        assert_eq!(canvas.count(BACKGROUND), 64 * 16);
    }

    #[test]
    fn screen_presenter_survives_missing_hardware() {
        let dir = tempfile::tempdir().unwrap();
        let mut presenter = ScreenPresenter {
            framebuffer: dir.path().join("fb0"),
            fb_sysfs: dir.path().join("sysfs"),
            backlight: Backlight::new(dir.path().join("brightness"), 100),
            layout: Layout::default(),
            dwell: Duration::ZERO,
        };
        presenter.present(&VersionRecord::default(), &VersionRecord::default());
    }
}
