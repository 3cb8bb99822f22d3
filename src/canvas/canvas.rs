//! Canvas: the thread-safe print-and-draw surface.
//!
//! Mutations run on the calling thread. Flushing may run concurrently on
//! another thread (see [`AutoFlusher`](crate::actor::AutoFlusher)), so state
//! lives behind three locks, always taken in this order:
//!
//! 1. `text`: print buffer and formatted buffer, as one unit
//! 2. `draw`: the vector surface
//! 3. `view`: background color and zoom factor
//!
//! Invalid arguments are logged with `log::error!` and leave the canvas
//! unchanged. No drawing call returns an error or panics.

use super::config::CanvasConfig;
use crate::compositor;
use crate::draw::VectorSurface;
use crate::encode::bmp;
use crate::error::{self, CanvasError, Result};
use crate::font::FontMetrics;
use crate::raster::{self, Frame, NamedColor, Rgb};
use crate::text::{FormattedBuffer, Geometry, PrintBuffer, TextLayer};
use std::fmt::Display;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Display state that does not affect layout or drawing.
#[derive(Debug, Clone, Copy)]
struct View {
    background: Rgb,
    zoom: u32,
}

/// A logical canvas of text output and vector drawings.
///
/// Drawing coordinates are always in unscaled canvas pixels; zoom only
/// affects the frames returned by [`Canvas::flush`].
#[derive(Debug)]
pub struct Canvas {
    text: Mutex<TextLayer>,
    draw: Mutex<VectorSurface>,
    view: Mutex<View>,
    flush_rate: Duration,
}

/// Lock, recovering from poisoning; every critical section leaves its state
/// consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Log a rejected argument and turn it into `None`.
fn accept<T>(result: Result<T>) -> Option<T> {
    result.map_err(|err| log::error!("{err}")).ok()
}

impl Canvas {
    /// Create a canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    /// Create a canvas with a custom configuration.
    ///
    /// Zero sizes, zoom or thickness are logged and replaced by defaults.
    pub fn with_config(config: CanvasConfig) -> Self {
        let config = config.validated();
        let geometry = Geometry::new(config.width, config.height, config.metrics);
        let surface = VectorSurface::new(
            config.width,
            config.height,
            config.foreground,
            config.thickness,
            config.metrics,
        );
        log::debug!(
            "canvas {}x{} ({} columns x {} rows)",
            config.width,
            config.height,
            geometry.columns(),
            geometry.rows()
        );

        Self {
            text: Mutex::new(TextLayer::new(geometry, config.foreground)),
            draw: Mutex::new(surface),
            view: Mutex::new(View {
                background: config.background,
                zoom: config.zoom,
            }),
            flush_rate: config.flush_rate,
        }
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Print `value` at the end of the text output.
    pub fn print(&self, value: impl Display) {
        lock(&self.text).print(&value.to_string());
    }

    /// Print `value` followed by a newline.
    pub fn println(&self, value: impl Display) {
        lock(&self.text).print(&format!("{value}\n"));
    }

    /// Remove the last printed character.
    ///
    /// Returns it, or `None` if nothing is printed.
    pub fn backspace(&self) -> Option<String> {
        lock(&self.text).backspace()
    }

    // ------------------------------------------------------------------
    // Colors
    // ------------------------------------------------------------------

    /// Set the color of subsequent text and drawings.
    pub fn color(&self, color: impl Into<Rgb>) {
        let color = color.into();
        let mut text = lock(&self.text);
        let mut draw = lock(&self.draw);
        text.set_color(color);
        draw.set_color(color);
    }

    /// Set the foreground from components in `0..=255`.
    pub fn color_rgb(&self, r: i32, g: i32, b: i32) {
        if let Some(color) = accept(Rgb::checked("color", r.into(), g.into(), b.into())) {
            self.color(color);
        }
    }

    /// Set the foreground from a palette index in `0..=15`.
    pub fn color_named(&self, index: i32) {
        if let Some(named) = accept(NamedColor::from_index("color", index.into())) {
            self.color(named);
        }
    }

    /// Get the current foreground color.
    pub fn foreground(&self) -> Rgb {
        lock(&self.text).color()
    }

    /// Get the current background color.
    pub fn background(&self) -> Rgb {
        lock(&self.view).background
    }

    // ------------------------------------------------------------------
    // Clearing
    // ------------------------------------------------------------------

    /// Erase all text and drawings.
    pub fn clear(&self) {
        let mut text = lock(&self.text);
        let mut draw = lock(&self.draw);
        text.clear();
        draw.clear();
    }

    /// Set the background color, then clear.
    pub fn clear_with(&self, background: impl Into<Rgb>) {
        let background = background.into();
        let mut text = lock(&self.text);
        let mut draw = lock(&self.draw);
        let mut view = lock(&self.view);
        text.clear();
        draw.clear();
        view.background = background;
    }

    /// Set the background from components in `0..=255`, then clear.
    pub fn clear_rgb(&self, r: i32, g: i32, b: i32) {
        if let Some(color) = accept(Rgb::checked("clear", r.into(), g.into(), b.into())) {
            self.clear_with(color);
        }
    }

    /// Set the background from a palette index in `0..=15`, then clear.
    pub fn clear_named(&self, index: i32) {
        if let Some(named) = accept(NamedColor::from_index("clear", index.into())) {
            self.clear_with(named);
        }
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Draw a point with the current pen.
    pub fn point(&self, x: i32, y: i32) {
        lock(&self.draw).point(x, y);
    }

    /// Draw a line with the current pen. Off-canvas parts are clipped.
    pub fn line(&self, x0: i32, y0: i32, x1: i32, y1: i32) {
        lock(&self.draw).line(x0, y0, x1, y1);
    }

    /// Draw a circle outline. A radius of 0 draws a point; negative radii
    /// are rejected.
    pub fn circle(&self, x: i32, y: i32, r: i32) {
        if accept(error::non_negative("circle", r.into())).is_some() {
            lock(&self.draw).circle(x, y, r.unsigned_abs());
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn text(&self, x: i32, y: i32, text: impl Display) {
        lock(&self.draw).text(x, y, &text.to_string());
    }

    /// Set the pen thickness; must be positive.
    pub fn thickness(&self, width: i32) {
        if let Some(width) = accept(error::positive("thickness", width.into())) {
            lock(&self.draw).set_thickness(width);
        }
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Resize the canvas; both sizes must be positive and the zoomed frame
    /// must fit in [`MAX_PIXELS`](crate::raster::MAX_PIXELS).
    ///
    /// Drawings keep their top-left anchoring. Text is laid out again, which
    /// may discard lines that no longer fit.
    pub fn screen(&self, width: i32, height: i32) {
        let call = format!("screen({width}, {height})");
        let Some(w) = accept(error::positive(call.clone(), width.into())) else {
            return;
        };
        let Some(h) = accept(error::positive(call.clone(), height.into())) else {
            return;
        };

        let mut text = lock(&self.text);
        let mut draw = lock(&self.draw);
        let zoom = lock(&self.view).zoom;
        if raster::frame_pixels(w, h, zoom).is_none() {
            let area = i64::from(width).saturating_mul(i64::from(height));
            log::error!("{}", CanvasError::out_of_range(call, area, CanvasError::FRAME_SIZE));
            return;
        }
        // The surface allocates; text geometry only changes once it has.
        draw.resize(w, h);
        text.resize(w, h);
        log::debug!("screen resized to {w}x{h}");
    }

    /// Set the display zoom; must be positive and keep the zoomed frame
    /// within [`MAX_PIXELS`](crate::raster::MAX_PIXELS).
    pub fn zoom(&self, factor: i32) {
        let Some(factor) = accept(error::positive("zoom", factor.into())) else {
            return;
        };
        let text = lock(&self.text);
        let Geometry { width, height, .. } = *text.geometry();
        let mut view = lock(&self.view);
        if raster::frame_pixels(width, height, factor).is_none() {
            let err = CanvasError::out_of_range("zoom", factor.into(), CanvasError::FRAME_ZOOM);
            log::error!("{err}");
            return;
        }
        view.zoom = factor;
    }

    /// Get the logical width.
    pub fn width(&self) -> u32 {
        lock(&self.text).geometry().width
    }

    /// Get the logical height.
    pub fn height(&self) -> u32 {
        lock(&self.text).geometry().height
    }

    /// Get the zoom factor.
    pub fn zoom_factor(&self) -> u32 {
        lock(&self.view).zoom
    }

    /// Get the pen thickness.
    pub fn thickness_width(&self) -> u32 {
        lock(&self.draw).thickness()
    }

    /// Get the number of text columns.
    pub fn columns(&self) -> u32 {
        lock(&self.text).geometry().columns()
    }

    /// Get the number of text rows.
    pub fn rows(&self) -> u32 {
        lock(&self.text).geometry().rows()
    }

    /// Get the glyph cell size.
    pub fn metrics(&self) -> FontMetrics {
        lock(&self.text).metrics()
    }

    /// Get the configured auto-flush interval.
    pub const fn flush_rate(&self) -> Duration {
        self.flush_rate
    }

    /// Snapshot the print buffer.
    pub fn print_buffer(&self) -> PrintBuffer {
        lock(&self.text).buffer().clone()
    }

    /// Snapshot the formatted buffer.
    pub fn formatted(&self) -> FormattedBuffer {
        lock(&self.text).formatted().clone()
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Reflow, composite and zoom: the frame to display.
    pub fn flush(&self) -> Frame {
        let (frame, zoom) = {
            let mut text = lock(&self.text);
            text.reflow();
            let draw = lock(&self.draw);
            let view = *lock(&self.view);
            (compositor::composite(&text, &draw, view.background), view.zoom)
        };
        log::trace!("flush {}x{} at zoom {zoom}", frame.width(), frame.height());
        raster::scale(&frame, zoom)
    }

    /// The unscaled composited frame.
    pub fn composite(&self) -> Frame {
        let text = lock(&self.text);
        let draw = lock(&self.draw);
        let background = lock(&self.view).background;
        compositor::composite(&text, &draw, background)
    }

    /// The unscaled frame encoded as a bitmap file.
    pub fn encode_frame(&self) -> Vec<u8> {
        bmp::encode(&self.composite())
    }

    /// Save the unscaled frame as a bitmap file.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Io`](crate::CanvasError::Io) if the file cannot
    /// be written. The failure is also logged.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        bmp::save(&self.composite(), path).map_err(|err| {
            log::error!("save({}): {err}", path.display());
            err
        })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
