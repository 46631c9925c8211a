//! Integer line rasterization (midpoint / Bresenham)

use crate::tactics::vertex::Coordinate;

/// Cells on the line from `from` to `to`, both endpoints included
///
/// Exactly one cell is produced per unit step along the major axis, so the
/// result has `max(|dx|, |dy|) + 1` entries and consecutive cells are
/// 8-adjacent.
pub fn bresenham(from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);
    let mut dx = (x1 - x0).abs();
    let mut dy = (y1 - y0).abs();

    let steep = dy > dx;
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
        std::mem::swap(&mut dx, &mut dy);
    }

    let xstep = if x1 < x0 { -1 } else { 1 };
    let ystep = if y1 < y0 { -1 } else { 1 };
    let plot = |major: i32, minor: i32| {
        if steep {
            Coordinate::new(minor, major)
        } else {
            Coordinate::new(major, minor)
        }
    };

    let mut line = Vec::with_capacity(dx as usize + 1);
    let mut err = dx / 2;
    let mut y = y0;
    let mut x = x0;
    while x != x1 {
        line.push(plot(x, y));
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
        x += xstep;
    }
    line.push(plot(x1, y));
    line
}
