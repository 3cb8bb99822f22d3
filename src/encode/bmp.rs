//! 24-bit BMP: uncompressed, bottom-up, BGR.
//!
//! The whole file is built in one pre-sized buffer and written with a single
//! `write_all`. Each pixel row is padded with zeros to a multiple of 4 bytes.

use crate::error::{CanvasError, Result};
use crate::raster::{Frame, Rgb};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File header (14) plus `BITMAPINFOHEADER` (40).
pub const HEADER_SIZE: usize = 54;

const FILE_HEADER_SIZE: usize = 14;
const INFO_HEADER_SIZE: u32 = 40;
const BITS_PER_PIXEL: u16 = 24;

/// Bytes per stored row, padding included.
#[inline]
pub const fn row_stride(width: u32) -> usize {
    (width as usize * 3 + 3) & !3
}

/// Total file size for a `width` x `height` image.
#[inline]
pub const fn file_size(width: u32, height: u32) -> usize {
    HEADER_SIZE + row_stride(width) * height as usize
}

/// Encode `frame` as a complete BMP file.
pub fn encode(frame: &Frame) -> Vec<u8> {
    let stride = row_stride(frame.width());
    let image_size = stride * frame.height() as usize;
    let mut out = Vec::with_capacity(HEADER_SIZE + image_size);

    // File header
    out.extend_from_slice(b"BM");
    put_u32(&mut out, len_u32(HEADER_SIZE + image_size));
    put_u16(&mut out, 0);
    put_u16(&mut out, 0);
    put_u32(&mut out, len_u32(HEADER_SIZE));

    // Info header
    put_u32(&mut out, INFO_HEADER_SIZE);
    put_u32(&mut out, frame.width());
    put_u32(&mut out, frame.height());
    put_u16(&mut out, 1);
    put_u16(&mut out, BITS_PER_PIXEL);
    put_u32(&mut out, 0);
    put_u32(&mut out, len_u32(image_size));
    for _ in 0..4 {
        put_u32(&mut out, 0);
    }
    debug_assert_eq!(out.len(), HEADER_SIZE);

    let padding = stride - frame.width() as usize * 3;
    for row in frame.rows().rev() {
        for pixel in row {
            out.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
        }
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    out
}

/// Encode `frame` into `writer`.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_to<W: Write>(frame: &Frame, writer: &mut W) -> std::io::Result<()> {
    writer.write_all(&encode(frame))?;
    writer.flush()
}

/// Encode `frame` into a file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CanvasError::Io`] if the file cannot be created or written. A
/// partially written file may be left behind.
pub fn save(frame: &Frame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(frame, &mut writer)?;
    log::debug!(
        "saved {}x{} bitmap to {}",
        frame.width(),
        frame.height(),
        path.display()
    );
    Ok(())
}

/// Decode a bitmap produced by [`encode`].
///
/// # Errors
///
/// Returns [`CanvasError::MalformedBitmap`] for anything other than an
/// uncompressed bottom-up 24-bit image with a 40-byte info header.
pub fn decode(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < HEADER_SIZE {
        return Err(malformed(format!("{} bytes is shorter than a header", bytes.len())));
    }
    if &bytes[..2] != b"BM" {
        return Err(malformed("missing BM signature"));
    }

    let offset = get_u32(bytes, 10) as usize;
    let info_size = get_u32(bytes, FILE_HEADER_SIZE);
    let width = get_i32(bytes, 18);
    let height = get_i32(bytes, 22);
    let planes = get_u16(bytes, 26);
    let bpp = get_u16(bytes, 28);
    let compression = get_u32(bytes, 30);

    if info_size != INFO_HEADER_SIZE {
        return Err(malformed(format!("unsupported info header size {info_size}")));
    }
    if planes != 1 || bpp != BITS_PER_PIXEL || compression != 0 {
        return Err(malformed(format!(
            "unsupported format: {planes} plane(s), {bpp} bpp, compression {compression}"
        )));
    }
    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(malformed(format!("unsupported dimensions {width}x{height}")));
    };
    if width == 0 || height == 0 {
        return Err(malformed(format!("empty image {width}x{height}")));
    }

    let stride = row_stride(width);
    let data = offset
        .checked_add(stride * height as usize)
        .and_then(|end| bytes.get(offset..end))
        .ok_or_else(|| malformed("pixel data truncated"))?;

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks_exact(stride).rev() {
        pixels.extend(
            row[..width as usize * 3]
                .chunks_exact(3)
                .map(|bgr| Rgb::new(bgr[2], bgr[1], bgr[0])),
        );
    }

    Frame::from_pixels(width, height, pixels).ok_or_else(|| malformed("pixel count mismatch"))
}

fn malformed(reason: impl Into<String>) -> CanvasError {
    CanvasError::MalformedBitmap(reason.into())
}

/// Header fields are 32-bit; frames never come close.
fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[inline]
fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[inline]
fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

// Callers check the length against HEADER_SIZE first.
fn get_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn get_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn get_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn gradient(width: u32, height: u32) -> Frame {
        let mut frame = Raster::filled(width, height, Rgb::BLACK);
        for y in 0..height {
            for x in 0..width {
                frame.set(x as i32, y as i32, Rgb::new(x as u8, y as u8, (x ^ y) as u8));
            }
        }
        frame
    }

    #[test]
    fn test_row_stride() {
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(2), 8);
        assert_eq!(row_stride(3), 12);
        assert_eq!(row_stride(4), 12);
        assert_eq!(row_stride(5), 16);
    }

    #[test]
    fn test_two_by_two_red() {
        let frame = Raster::filled(2, 2, RED);
        let bytes = encode(&frame);
        assert_eq!(bytes.len(), 70);
        assert_eq!(&bytes[..2], b"BM");
        assert_eq!(get_u32(&bytes, 2), 70);
        assert_eq!(get_u32(&bytes, 10), 54);
        assert_eq!(get_u32(&bytes, 34), 16);
        assert_eq!(&bytes[54..62], &[0, 0, 255, 0, 0, 255, 0, 0]);

        let decoded = decode(&bytes).unwrap();
        assert!(decoded.pixels().iter().all(|&p| p == RED));
    }

    #[test]
    fn test_header_fields() {
        let bytes = encode(&gradient(5, 3));
        assert_eq!(bytes.len(), file_size(5, 3));
        assert_eq!(get_u32(&bytes, 14), 40);
        assert_eq!(get_i32(&bytes, 18), 5);
        assert_eq!(get_i32(&bytes, 22), 3);
        assert_eq!(get_u16(&bytes, 26), 1);
        assert_eq!(get_u16(&bytes, 28), 24);
        assert_eq!(get_u32(&bytes, 30), 0);
        assert!(bytes[38..54].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rows_bottom_up() {
        let mut frame = Raster::filled(1, 2, Rgb::BLACK);
        frame.set(0, 0, Rgb::new(1, 2, 3));
        let bytes = encode(&frame);
        // Bottom row first, then the top row in BGR order.
        assert_eq!(&bytes[54..58], &[0, 0, 0, 0]);
        assert_eq!(&bytes[58..62], &[3, 2, 1, 0]);
    }

    #[test]
    fn test_round_trip_padding() {
        for (w, h) in [(4, 4), (8, 3), (1, 1), (3, 5), (7, 2)] {
            let frame = gradient(w, h);
            assert_eq!(decode(&encode(&frame)).unwrap(), frame, "{w}x{h}");
        }
    }

    #[test]
    fn test_write_to() {
        let frame = gradient(3, 2);
        let mut sink = Vec::new();
        write_to(&frame, &mut sink).unwrap();
        assert_eq!(sink, encode(&frame));
    }

    #[test]
    fn test_decode_rejects() {
        let good = encode(&gradient(3, 3));
        assert!(matches!(decode(&good[..20]), Err(CanvasError::MalformedBitmap(_))));
        assert!(decode(&good[..good.len() - 1]).is_err());

        let mut bad_magic = good.clone();
        bad_magic[0] = b'X';
        assert!(decode(&bad_magic).is_err());

        let mut bad_bpp = good.clone();
        bad_bpp[28] = 32;
        assert!(decode(&bad_bpp).is_err());

        let mut top_down = good;
        top_down[22..26].copy_from_slice(&(-3i32).to_le_bytes());
        assert!(decode(&top_down).is_err());
    }

    #[test]
    fn test_save_missing_directory() {
        let frame = gradient(2, 2);
        let path = std::env::temp_dir().join("easel-no-such-dir").join("x.bmp");
        assert!(matches!(save(&frame, &path), Err(CanvasError::Io(_))));
    }

    #[test]
    fn test_save_writes_file() {
        let frame = gradient(6, 4);
        let path = std::env::temp_dir().join(format!("easel-bmp-{}.bmp", std::process::id()));
        save(&frame, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(decode(&bytes).unwrap(), frame);
    }
}
