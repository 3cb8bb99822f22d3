//! Color runs: everything printed so far, before wrapping.

use crate::raster::Rgb;
use unicode_segmentation::UnicodeSegmentation;

/// A maximal span of printed text sharing one foreground color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRun {
    /// Foreground color of the text.
    pub color: Rgb,
    /// The text, newlines included.
    pub text: String,
}

impl ColorRun {
    /// Create a new run.
    pub fn new(color: Rgb, text: impl Into<String>) -> Self {
        Self {
            color,
            text: text.into(),
        }
    }
}

/// Ordered color runs in insertion order.
///
/// Never empty: the last run is the active one, which further appends extend
/// while its color matches the current foreground color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintBuffer {
    /// Runs in print order.
    runs: Vec<ColorRun>,
    /// Current foreground color for appends.
    color: Rgb,
}

impl PrintBuffer {
    /// Create a buffer holding one empty run of `color`.
    pub fn new(color: Rgb) -> Self {
        Self {
            runs: vec![ColorRun::new(color, String::new())],
            color,
        }
    }

    /// Rebuild a buffer from existing runs.
    ///
    /// An empty `runs` yields a single empty run of `color`.
    pub fn from_runs(runs: Vec<ColorRun>, color: Rgb) -> Self {
        if runs.is_empty() {
            Self::new(color)
        } else {
            Self { runs, color }
        }
    }

    /// Get the runs in print order.
    #[inline]
    pub fn runs(&self) -> &[ColorRun] {
        &self.runs
    }

    /// Get the number of runs (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether nothing has been printed.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    /// Get the current foreground color.
    #[inline]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Change the color used by subsequent appends.
    ///
    /// Existing runs keep their colors.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// The run further appends may extend.
    pub fn active(&self) -> &ColorRun {
        // `runs` is never empty; see `new` and `from_runs`.
        &self.runs[self.runs.len() - 1]
    }

    /// Append literal text, control characters included.
    pub fn append(&mut self, text: &str) {
        match self.runs.last_mut() {
            Some(active) if active.color == self.color => active.text.push_str(text),
            _ => self.runs.push(ColorRun::new(self.color, text)),
        }
    }

    /// Remove the last printed grapheme.
    ///
    /// Returns the removed grapheme, or `None` if nothing was printed.
    pub fn backspace(&mut self) -> Option<String> {
        let run = self.runs.iter_mut().rev().find(|run| !run.text.is_empty())?;
        let (start, last) = run.text.grapheme_indices(true).next_back()?;
        let removed = last.to_owned();
        run.text.truncate(start);
        Some(removed)
    }

    /// Reset to a single empty run of the current color.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.runs.push(ColorRun::new(self.color, String::new()));
    }

    /// All printed text, colors dropped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_print_buffer_new() {
        let buf = PrintBuffer::new(Rgb::WHITE);
        assert_eq!(buf.len(), 1);
        assert!(buf.is_empty());
        assert_eq!(buf.active().color, Rgb::WHITE);
    }

    #[test]
    fn test_append_same_color_merges() {
        let mut buf = PrintBuffer::new(Rgb::WHITE);
        buf.append("Hello");
        buf.append(", world!");
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.active().text, "Hello, world!");
    }

    #[test]
    fn test_color_change_starts_run() {
        let mut buf = PrintBuffer::new(Rgb::WHITE);
        buf.append("a");
        buf.set_color(RED);
        assert_eq!(buf.len(), 1);
        buf.append("b");
        assert_eq!(buf.len(), 2);
        buf.append("c");
        assert_eq!(buf.len(), 2);
        buf.set_color(BLUE);
        buf.append("d");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.runs()[0], ColorRun::new(Rgb::WHITE, "a"));
        assert_eq!(buf.runs()[1], ColorRun::new(RED, "bc"));
        assert_eq!(buf.runs()[2], ColorRun::new(BLUE, "d"));
    }

    #[test]
    fn test_set_color_does_not_touch_runs() {
        let mut buf = PrintBuffer::new(Rgb::WHITE);
        buf.append("x");
        buf.set_color(RED);
        assert_eq!(buf.runs()[0].color, Rgb::WHITE);
    }

    #[test]
    fn test_control_characters_are_literal() {
        let mut buf = PrintBuffer::new(Rgb::WHITE);
        buf.append("a\tb\u{7}\n");
        assert_eq!(buf.text(), "a\tb\u{7}\n");
    }

    #[test]
    fn test_clear_keeps_current_color() {
        let mut buf = PrintBuffer::new(Rgb::WHITE);
        buf.append("old");
        buf.set_color(RED);
        buf.append("text");
        buf.clear();
        assert_eq!(buf.len(), 1);
        assert!(buf.is_empty());
        assert_eq!(buf.active().color, RED);
        buf.append("new");
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_backspace_walks_back_across_runs() {
        let mut buf = PrintBuffer::new(Rgb::WHITE);
        buf.append("ab");
        buf.set_color(RED);
        buf.append("c");
        buf.set_color(BLUE);
        buf.append("");

        assert_eq!(buf.backspace().as_deref(), Some("c"));
        assert_eq!(buf.backspace().as_deref(), Some("b"));
        assert_eq!(buf.text(), "a");
        assert_eq!(buf.backspace().as_deref(), Some("a"));
        assert_eq!(buf.backspace(), None);
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut buf = PrintBuffer::new(Rgb::WHITE);
        buf.append("ne\u{301}");
        assert_eq!(buf.backspace().as_deref(), Some("e\u{301}"));
        assert_eq!(buf.text(), "n");
    }
}
