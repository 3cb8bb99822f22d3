//! Message types for the flusher thread.

use crate::raster::Frame;
use std::time::Duration;

/// Commands sent to an [`AutoFlusher`](super::AutoFlusher) thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushCommand {
    /// Change the flush interval; `None` disables periodic flushing.
    ///
    /// A new interval takes effect immediately with a flush, then repeats.
    SetRate(Option<Duration>),
    /// Flush once, outside the schedule.
    FlushNow,
    /// Stop the thread.
    Shutdown,
}

/// Destination for flushed frames, typically a window shell.
///
/// `present` runs on the flusher thread and should return quickly.
pub trait FrameSink: Send + 'static {
    /// Show `frame`. It is already zoomed to display size.
    fn present(&mut self, frame: Frame);
}

impl FrameSink for crossbeam_channel::Sender<Frame> {
    /// Non-blocking: if the consumer lags and the channel is full, the frame
    /// is dropped.
    fn present(&mut self, frame: Frame) {
        if self.try_send(frame).is_err() {
            log::trace!("frame dropped; consumer is behind");
        }
    }
}
