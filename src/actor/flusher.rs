//! Auto Flusher: dedicated thread that flushes a canvas on a fixed rate.
//!
//! The thread owns nothing but an `Arc<Canvas>` and a sink. Rate changes
//! arrive over a control channel and are applied before the next tick; a
//! flush already in progress always completes.

use super::messages::{FlushCommand, FrameSink};
use crate::canvas::Canvas;
use crate::error;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often an idle flusher checks the shutdown flag.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Handle to a running flusher thread.
///
/// Dropping the handle stops the thread without waiting for it.
pub struct AutoFlusher {
    /// Handle to the flusher thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Control channel into the thread.
    control: Sender<FlushCommand>,
    /// Frames presented so far.
    frames: Arc<AtomicU64>,
}

impl AutoFlusher {
    /// Spawn a flusher for `canvas`.
    ///
    /// With a non-zero `rate` the first flush happens immediately. A zero
    /// rate starts idle; frames are then produced only by
    /// [`flush_now`](Self::flush_now) until a rate is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(canvas: Arc<Canvas>, rate: Duration, sink: impl FrameSink) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));
        let (control, commands) = unbounded();

        let worker = Worker {
            canvas,
            sink,
            shutdown: Arc::clone(&shutdown),
            frames: Arc::clone(&frames),
        };
        let rate = (!rate.is_zero()).then_some(rate);

        let handle = thread::Builder::new()
            .name("easel-flusher".to_string())
            .spawn(move || worker.run_loop(&commands, rate))?;

        log::debug!("auto flush started at {rate:?}");
        Ok(Self {
            handle: Some(handle),
            shutdown,
            control,
            frames,
        })
    }

    /// Spawn a flusher at the canvas's configured
    /// [`flush_rate`](crate::CanvasConfig::flush_rate).
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn for_canvas(canvas: Arc<Canvas>, sink: impl FrameSink) -> io::Result<Self> {
        let rate = canvas.flush_rate();
        Self::spawn(canvas, rate, sink)
    }

    /// Change the flush interval in milliseconds.
    ///
    /// `0` disables periodic flushing; negative values are logged and
    /// ignored.
    pub fn set_rate(&self, millis: i64) {
        match error::non_negative("autoFlush", millis) {
            Ok(0) => self.send(FlushCommand::SetRate(None)),
            Ok(ms) => self.send(FlushCommand::SetRate(Some(Duration::from_millis(ms)))),
            Err(err) => log::error!("{err}"),
        }
    }

    /// Request one flush outside the schedule.
    pub fn flush_now(&self) {
        self.send(FlushCommand::FlushNow);
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Signal the flusher thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.send(FlushCommand::Shutdown);
    }

    /// Wait for the flusher thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn send(&self, command: FlushCommand) {
        // Fails only once the thread has exited, which is what shutdown wants.
        let _ = self.control.send(command);
    }
}

impl Drop for AutoFlusher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// State moved onto the flusher thread.
struct Worker<S> {
    canvas: Arc<Canvas>,
    sink: S,
    shutdown: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
}

impl<S: FrameSink> Worker<S> {
    /// Main flusher loop.
    fn run_loop(mut self, commands: &Receiver<FlushCommand>, mut rate: Option<Duration>) {
        let mut next_tick = rate.map(|_| Instant::now());

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            let timeout = next_tick.map_or(IDLE_POLL, |tick| {
                tick.saturating_duration_since(Instant::now())
            });

            match commands.recv_timeout(timeout) {
                Ok(FlushCommand::SetRate(new_rate)) => {
                    log::debug!("auto flush rate {rate:?} -> {new_rate:?}");
                    rate = new_rate;
                    next_tick = rate.map(|_| Instant::now());
                }
                Ok(FlushCommand::FlushNow) => self.flush(),
                Ok(FlushCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    let (Some(tick), Some(interval)) = (next_tick, rate) else {
                        continue;
                    };
                    let now = Instant::now();
                    if now < tick {
                        continue;
                    }
                    self.flush();

                    // Fixed rate; when behind, skip ahead instead of bursting.
                    let mut following = tick + interval;
                    if following < now {
                        following = now + interval;
                    }
                    next_tick = Some(following);
                }
            }
        }

        log::debug!("auto flush stopped after {} frame(s)", self.frames.load(Ordering::Relaxed));
    }

    fn flush(&mut self) {
        let frame = self.canvas.flush();
        self.frames.fetch_add(1, Ordering::Relaxed);
        self.sink.present(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasConfig;
    use crate::raster::{Frame, Rgb};
    use crossbeam_channel::bounded;

    fn canvas() -> Arc<Canvas> {
        Arc::new(Canvas::with_config(CanvasConfig::default().with_size(16, 16)))
    }

    fn drain(rx: &Receiver<Frame>) {
        while rx.try_recv().is_ok() {}
    }

    #[test_log::test]
    fn test_first_flush_is_immediate() {
        let (tx, rx) = bounded(4);
        let flusher = AutoFlusher::spawn(canvas(), Duration::from_secs(60), tx).unwrap();
        let frame = rx.recv_timeout(Duration::from_secs(1));
        assert!(frame.is_ok());
        assert_eq!(frame.unwrap().width(), 16);
        flusher.join();
    }

    #[test_log::test]
    fn test_periodic_frames() {
        let (tx, rx) = bounded(16);
        let flusher = AutoFlusher::spawn(canvas(), Duration::from_millis(10), tx).unwrap();
        for _ in 0..3 {
            assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
        }
        assert!(flusher.frames() >= 3);
        flusher.join();
    }

    #[test_log::test]
    fn test_for_canvas_uses_configured_rate() {
        let canvas = Arc::new(Canvas::with_config(
            CanvasConfig::default()
                .with_size(16, 16)
                .with_flush_rate(Duration::ZERO),
        ));
        let (tx, rx) = bounded(4);
        let flusher = AutoFlusher::for_canvas(canvas, tx).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        let canvas = Arc::new(Canvas::with_config(
            CanvasConfig::default()
                .with_size(16, 16)
                .with_flush_rate(Duration::from_millis(5)),
        ));
        let (tx, rx) = bounded(16);
        let periodic = AutoFlusher::for_canvas(canvas, tx).unwrap();
        for _ in 0..2 {
            assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
        }
        periodic.join();
        flusher.join();
    }

    #[test_log::test]
    fn test_zero_rate_is_idle() {
        let (tx, rx) = bounded(4);
        let flusher = AutoFlusher::spawn(canvas(), Duration::ZERO, tx).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        flusher.flush_now();
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
        assert_eq!(flusher.frames(), 1);
        flusher.join();
    }

    #[test_log::test]
    fn test_disable_and_reenable() {
        let (tx, rx) = bounded(64);
        let flusher = AutoFlusher::spawn(canvas(), Duration::from_millis(5), tx).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());

        flusher.set_rate(0);
        thread::sleep(Duration::from_millis(50));
        drain(&rx);
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        flusher.set_rate(5);
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
        flusher.join();
    }

    #[test_log::test]
    fn test_negative_rate_ignored() {
        let (tx, rx) = bounded(64);
        let flusher = AutoFlusher::spawn(canvas(), Duration::from_millis(5), tx).unwrap();
        flusher.set_rate(-10);
        thread::sleep(Duration::from_millis(30));
        drain(&rx);
        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
        flusher.join();
    }

    #[test_log::test]
    fn test_frames_reflect_canvas() {
        let canvas = canvas();
        let (tx, rx) = bounded(4);
        let flusher = AutoFlusher::spawn(Arc::clone(&canvas), Duration::ZERO, tx).unwrap();
        canvas.clear_named(15);
        canvas.zoom(2);
        flusher.flush_now();
        let frame = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(frame.width(), 32);
        assert!(frame.pixels().iter().all(|&p| p == Rgb::WHITE));
        flusher.join();
    }

    #[test_log::test]
    fn test_shutdown_on_drop() {
        let (tx, rx) = bounded(4);
        let flusher = AutoFlusher::spawn(canvas(), Duration::from_millis(5), tx).unwrap();
        drop(flusher);
        // The sender lives on the thread; it disconnects once the thread ends.
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
                _ => assert!(Instant::now() < deadline, "flusher did not stop"),
            }
        }
    }
}
