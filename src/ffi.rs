//! C Foreign Function Interface (FFI) for Easel.
//!
//! This module provides a C-compatible API so a host program (typically a
//! window shell written in another language) can drive a canvas and blit its
//! frames. All functions are `extern "C"` with stable ABI.
//!
//! # Safety
//!
//! All functions that accept pointers require valid pointers; null is
//! checked and reported, dangling is not. Strings must be NUL-terminated
//! UTF-8. The caller owns the handle and must release it with
//! `easel_canvas_destroy`.
//!
//! # Example (C)
//!
//! ```c
//! #include "easel.h"
//!
//! int main() {
//!     EaselCanvas* canvas = easel_canvas_new(320, 200);
//!     if (!canvas) return 1;
//!
//!     easel_canvas_print(canvas, "Hello from C!\n");
//!     easel_canvas_color_named(canvas, 12);
//!     easel_canvas_circle(canvas, 160, 100, 40);
//!
//!     size_t size = easel_canvas_flush_rgb(canvas, NULL, 0);
//!     uint8_t* pixels = malloc(size);
//!     easel_canvas_flush_rgb(canvas, pixels, size);
//!     // Blit pixels...
//!
//!     easel_canvas_destroy(canvas);
//!     return 0;
//! }
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]

use crate::canvas::{Canvas, CanvasConfig};
use std::ffi::CStr;
use std::os::raw::{c_char, c_int, c_uint};

// =============================================================================
// Opaque Handle Types
// =============================================================================

/// Opaque handle to a canvas.
pub struct EaselCanvas(Canvas);

// =============================================================================
// Result and Error Codes
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaselResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
    /// Invalid UTF-8 string.
    InvalidUtf8 = 2,
    /// I/O error.
    IoError = 3,
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Create a canvas of `width` x `height` logical pixels.
///
/// Non-positive sizes fall back to the default 500 x 500.
#[unsafe(no_mangle)]
pub extern "C" fn easel_canvas_new(width: c_int, height: c_int) -> *mut EaselCanvas {
    let size = |v: c_int| u32::try_from(v).unwrap_or(0);
    let config = CanvasConfig::default().with_size(size(width), size(height));
    Box::into_raw(Box::new(EaselCanvas(Canvas::with_config(config))))
}

/// Destroy a canvas.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_destroy(canvas: *mut EaselCanvas) {
    if !canvas.is_null() {
        drop(Box::from_raw(canvas));
    }
}

// =============================================================================
// Text
// =============================================================================

/// Print a string at the end of the text output.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_print(
    canvas: *const EaselCanvas,
    text: *const c_char,
) -> EaselResult {
    let Some(canvas) = canvas.as_ref() else {
        return EaselResult::NullPointer;
    };
    match str_arg(text) {
        Ok(text) => {
            canvas.0.print(text);
            EaselResult::Ok
        }
        Err(code) => code,
    }
}

// =============================================================================
// Colors and Pen
// =============================================================================

/// Set the foreground color from RGB components in 0..=255.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_color_rgb(
    canvas: *const EaselCanvas,
    r: c_int,
    g: c_int,
    b: c_int,
) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.color_rgb(r, g, b);
    }
}

/// Set the foreground color from a palette index in 0..=15.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_color_named(canvas: *const EaselCanvas, index: c_int) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.color_named(index);
    }
}

/// Set the pen thickness.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_thickness(canvas: *const EaselCanvas, width: c_int) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.thickness(width);
    }
}

/// Erase all text and drawings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_clear(canvas: *const EaselCanvas) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.clear();
    }
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw a point.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_point(canvas: *const EaselCanvas, x: c_int, y: c_int) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.point(x, y);
    }
}

/// Draw a line.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_line(
    canvas: *const EaselCanvas,
    x0: c_int,
    y0: c_int,
    x1: c_int,
    y1: c_int,
) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.line(x0, y0, x1, y1);
    }
}

/// Draw a circle outline.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_circle(
    canvas: *const EaselCanvas,
    x: c_int,
    y: c_int,
    r: c_int,
) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.circle(x, y, r);
    }
}

/// Draw a string with its top-left corner at `(x, y)`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_text(
    canvas: *const EaselCanvas,
    x: c_int,
    y: c_int,
    text: *const c_char,
) -> EaselResult {
    let Some(canvas) = canvas.as_ref() else {
        return EaselResult::NullPointer;
    };
    match str_arg(text) {
        Ok(text) => {
            canvas.0.text(x, y, text);
            EaselResult::Ok
        }
        Err(code) => code,
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Resize the canvas.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_screen(
    canvas: *const EaselCanvas,
    width: c_int,
    height: c_int,
) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.screen(width, height);
    }
}

/// Set the display zoom factor.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_zoom(canvas: *const EaselCanvas, factor: c_int) {
    if let Some(canvas) = canvas.as_ref() {
        canvas.0.zoom(factor);
    }
}

/// Get the logical width.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_width(canvas: *const EaselCanvas) -> c_uint {
    canvas.as_ref().map_or(0, |canvas| canvas.0.width())
}

/// Get the logical height.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_height(canvas: *const EaselCanvas) -> c_uint {
    canvas.as_ref().map_or(0, |canvas| canvas.0.height())
}

// =============================================================================
// Output
// =============================================================================

/// Flush the canvas and copy the zoomed frame into `out` as packed RGB,
/// row-major, top row first.
///
/// Returns the number of bytes the frame needs. Nothing is copied when `out`
/// is NULL or `len` is smaller than that; call once with NULL to size the
/// buffer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_flush_rgb(
    canvas: *const EaselCanvas,
    out: *mut u8,
    len: usize,
) -> usize {
    let Some(canvas) = canvas.as_ref() else {
        return 0;
    };
    let frame = canvas.0.flush();
    let needed = frame.len() * 3;
    if out.is_null() || len < needed {
        return needed;
    }

    let dst = std::slice::from_raw_parts_mut(out, needed);
    for (chunk, pixel) in dst.chunks_exact_mut(3).zip(frame.pixels()) {
        chunk.copy_from_slice(&[pixel.r, pixel.g, pixel.b]);
    }
    needed
}

/// Save the unscaled frame as a 24-bit BMP file.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn easel_canvas_save(
    canvas: *const EaselCanvas,
    path: *const c_char,
) -> EaselResult {
    let Some(canvas) = canvas.as_ref() else {
        return EaselResult::NullPointer;
    };
    let path = match str_arg(path) {
        Ok(path) => path,
        Err(code) => return code,
    };
    match canvas.0.save(path) {
        Ok(()) => EaselResult::Ok,
        Err(_) => EaselResult::IoError,
    }
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the Easel version string.
#[unsafe(no_mangle)]
pub extern "C" fn easel_version() -> *const c_char {
    static VERSION: &[u8] = b"0.1.0\0";
    VERSION.as_ptr().cast::<c_char>()
}

// =============================================================================
// Helper Functions
// =============================================================================

unsafe fn str_arg<'a>(ptr: *const c_char) -> Result<&'a str, EaselResult> {
    if ptr.is_null() {
        return Err(EaselResult::NullPointer);
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| EaselResult::InvalidUtf8)
}
