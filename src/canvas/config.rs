//! Canvas configuration.

use crate::font::FontMetrics;
use crate::raster::{self, Rgb};
use std::time::Duration;

/// Initial state of a [`Canvas`](super::Canvas).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    /// Text and pen color.
    pub foreground: Rgb,
    /// Color behind everything.
    pub background: Rgb,
    /// Display scale factor applied by `flush`.
    pub zoom: u32,
    /// Pen side length in pixels.
    pub thickness: u32,
    /// Glyph cell size.
    pub metrics: FontMetrics,
    /// Interval for an [`AutoFlusher`](crate::actor::AutoFlusher) started
    /// for this canvas.
    pub flush_rate: Duration,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            foreground: Rgb::DEFAULT_FG,
            background: Rgb::DEFAULT_BG,
            zoom: 1,
            thickness: 1,
            metrics: FontMetrics::default(),
            flush_rate: Duration::from_millis(250),
        }
    }
}

impl CanvasConfig {
    /// Set the logical size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn with_foreground(mut self, color: Rgb) -> Self {
        self.foreground = color;
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn with_background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    /// Set the zoom factor.
    #[must_use]
    pub const fn with_zoom(mut self, zoom: u32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the pen thickness.
    #[must_use]
    pub const fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the glyph cell size.
    #[must_use]
    pub const fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the auto-flush interval. Zero disables periodic flushing.
    #[must_use]
    pub const fn with_flush_rate(mut self, rate: Duration) -> Self {
        self.flush_rate = rate;
        self
    }

    /// Replace zero or oversized sizes, zoom and thickness with their
    /// defaults.
    pub(crate) fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.width == 0
            || self.height == 0
            || raster::frame_pixels(self.width, self.height, 1).is_none()
        {
            log::error!(
                "config: {}x{} is out of range. Try a number greater than 0.",
                self.width,
                self.height
            );
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if self.zoom == 0 {
            log::error!("config: zoom 0 is out of range. Try a number greater than 0.");
            self.zoom = defaults.zoom;
        } else if raster::frame_pixels(self.width, self.height, self.zoom).is_none() {
            log::error!(
                "config: zoom {} is out of range for {}x{}. Try a smaller zoom.",
                self.zoom,
                self.width,
                self.height
            );
            self.zoom = defaults.zoom;
        }
        if self.thickness == 0 {
            log::error!("config: thickness 0 is out of range. Try a number greater than 0.");
            self.thickness = defaults.thickness;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!((config.width, config.height), (500, 500));
        assert_eq!(config.foreground, Rgb::WHITE);
        assert_eq!(config.background, Rgb::BLACK);
        assert_eq!(config.zoom, 1);
        assert_eq!(config.thickness, 1);
        assert_eq!(config.metrics, FontMetrics::new(8, 10, 8));
        assert_eq!(config.flush_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_builders() {
        let config = CanvasConfig::default()
            .with_size(320, 200)
            .with_zoom(2)
            .with_thickness(3)
            .with_background(Rgb::WHITE);
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.zoom, 2);
        assert_eq!(config.thickness, 3);
        assert_eq!(config.background, Rgb::WHITE);
    }

    #[test_log::test]
    fn test_validated_replaces_zeros() {
        let config = CanvasConfig::default()
            .with_size(0, 100)
            .with_zoom(0)
            .with_thickness(0)
            .validated();
        assert_eq!((config.width, config.height), (500, 500));
        assert_eq!(config.zoom, 1);
        assert_eq!(config.thickness, 1);
    }

    #[test_log::test]
    fn test_validated_rejects_oversized_frames() {
        let config = CanvasConfig::default().with_size(100_000, 100_000).validated();
        assert_eq!((config.width, config.height), (500, 500));

        let config = CanvasConfig::default()
            .with_size(4000, 4000)
            .with_zoom(3)
            .validated();
        assert_eq!((config.width, config.height), (4000, 4000));
        assert_eq!(config.zoom, 1);
    }

    #[test]
    fn test_zero_metrics_are_bumped() {
        let config = CanvasConfig::default()
            .with_metrics(FontMetrics::new(0, 0, 0))
            .validated();
        assert_eq!(config.metrics.char_width(), 1);
        assert_eq!(config.metrics.char_height(), 1);
    }
}
