//! Error types shared across the crate.
//!
//! The drawing API itself never returns these to callers: invalid parameters
//! are logged and turned into no-ops. They surface from validation helpers,
//! from [`crate::Canvas::save`], and from the bitmap decoder.

use std::borrow::Cow;
use std::io;

/// Result alias used throughout the crate.
pub type Result<T, E = CanvasError> = std::result::Result<T, E>;

/// Everything that can go wrong inside the canvas.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// A numeric parameter was outside its accepted range.
    #[error("{op}: {value} is out of range. Try {hint}.")]
    OutOfRange {
        /// The call that rejected the value.
        op: Cow<'static, str>,
        /// The offending value.
        value: i64,
        /// What the caller should pass instead.
        hint: &'static str,
    },

    /// The frame could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bytes handed to the decoder are not a bitmap we produce.
    #[error("Malformed bitmap: {0}")]
    MalformedBitmap(String),
}

impl CanvasError {
    pub(crate) const POSITIVE: &'static str = "a number greater than 0";
    pub(crate) const COMPONENT: &'static str = "a number between 0 and 255 instead";
    pub(crate) const NON_NEGATIVE: &'static str = "a number greater or equal to 0";
    pub(crate) const PALETTE: &'static str = "a palette index between 0 and 15";
    pub(crate) const FRAME_SIZE: &'static str = "a size of at most 8192 x 8192 pixels";
    pub(crate) const FRAME_ZOOM: &'static str =
        "a zoom that keeps the frame within 8192 x 8192 pixels";

    pub(crate) fn out_of_range(
        op: impl Into<Cow<'static, str>>,
        value: i64,
        hint: &'static str,
    ) -> Self {
        Self::OutOfRange {
            op: op.into(),
            value,
            hint,
        }
    }
}

/// Require `value > 0`.
pub(crate) fn positive(op: impl Into<Cow<'static, str>>, value: i64) -> Result<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(CanvasError::out_of_range(op, value, CanvasError::POSITIVE)),
    }
}

/// Require `0 <= value <= 255`.
pub(crate) fn component(op: &'static str, value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| CanvasError::out_of_range(op, value, CanvasError::COMPONENT))
}

/// Require `value >= 0`.
pub(crate) fn non_negative(op: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| CanvasError::out_of_range(op, value, CanvasError::NON_NEGATIVE))
}
