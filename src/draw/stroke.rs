//! Stroke rasterization: integer line and circle walks.
//!
//! These functions only enumerate pixel centers; callers decide what a pixel
//! looks like (see [`VectorSurface`](super::VectorSurface), which stamps a
//! square pen at each one). Points may be off-canvas or repeated.

/// Walk the pixels of the segment `(x0, y0)`-`(x1, y1)`, endpoints included.
///
/// Bresenham's algorithm, all octants. A zero-length segment yields its
/// single point.
pub fn line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);
    loop {
        // Every step stays between the i32 endpoints.
        #[allow(clippy::cast_possible_truncation)]
        let (px, py) = (x as i32, y as i32);
        plot(px, py);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Walk the outline of the circle of radius `r` centered on `(cx, cy)`.
///
/// Midpoint algorithm with eight-way symmetry. `r == 0` yields the center.
pub fn circle(cx: i32, cy: i32, r: u32, mut plot: impl FnMut(i32, i32)) {
    if r == 0 {
        plot(cx, cy);
        return;
    }

    let mut x = i64::from(r);
    let mut y = 0i64;
    let mut err = 0i64;
    let (cx, cy) = (i64::from(cx), i64::from(cy));

    let mut put = |px: i64, py: i64| {
        if let (Ok(px), Ok(py)) = (i32::try_from(px), i32::try_from(py)) {
            plot(px, py);
        }
    };

    while x >= y {
        put(cx + x, cy + y);
        put(cx + y, cy + x);
        put(cx - y, cy + x);
        put(cx - x, cy + y);
        put(cx - x, cy - y);
        put(cx - y, cy - x);
        put(cx + y, cy - x);
        put(cx + x, cy - y);

        y += 1;
        err += 1 + 2 * y;
        if 2 * (err - x) + 1 > 0 {
            x -= 1;
            err += 1 - 2 * x;
        }
    }
}

/// Top-left offset of a square pen of side `thickness` around its center.
///
/// Odd sizes are centered; even sizes lean down and right.
#[inline]
pub const fn pen_offset(thickness: u32) -> i32 {
    -((thickness.saturating_sub(1) / 2) as i32)
}
