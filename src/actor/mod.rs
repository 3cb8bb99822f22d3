//! Actors: background threads driving the canvas.
//!
//! The only actor is the auto flusher:
//!
//! ```text
//! ┌──────────────┐  FlushCommand   ┌────────────────┐   Frame   ┌──────────┐
//! │ Caller       │ ──────────────▶ │ Flusher Thread │ ────────▶ │ FrameSink│
//! └──────────────┘                 └────────────────┘           └──────────┘
//!        │ print / draw                   │ flush()
//!        ▼                                ▼
//!  ┌──────────────────────────────────────────┐
//!  │              Arc<Canvas>                 │
//!  └──────────────────────────────────────────┘
//! ```

mod flusher;
mod messages;

pub use flusher::AutoFlusher;
pub use messages::{FlushCommand, FrameSink};
