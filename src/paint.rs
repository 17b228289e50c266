// SPDX-License-Identifier: MIT
//
// Painting gradient stops into a terminal.
//
// A terminal cell is roughly twice as tall as it is wide, so each cell
// carries two pixels: the upper half-block `▀` takes the top pixel as its
// foreground and the bottom pixel as its background. That makes the pixel
// grid close to square and a circle on screen looks like a circle.
//
//   cell (x, y)  ┌───┐  pixel (x, 2y)      → fg
//                └───┘  pixel (x, 2y + 1)  → bg
//
// Pixel coordinates are mapped into the same 0–100 percent space the burst
// animator uses, and a pixel's gradient position is its distance from the
// origin in that space. Color changes are only emitted when a value
// actually differs from the previous cell.

use std::io::{self, Write};

use mb_color::color::Rgb;
use mb_engine::burst::{GradientStop, sample_gradient};

use crate::ansi;
use crate::terminal::Size;

const UPPER_HALF: &str = "▀";

/// Color of the pixel at `(px, py)` on a `width × height` pixel grid.
fn pixel(stops: &[GradientStop], origin: (f64, f64), px: u32, py: u32, width: u32, height: u32) -> Rgb {
    let x = (f64::from(px) + 0.5) / f64::from(width) * 100.0;
    let y = (f64::from(py) + 0.5) / f64::from(height) * 100.0;
    let distance = (x - origin.0).hypot(y - origin.1);
    sample_gradient(stops, distance)
}

/// Paint a radial gradient filling `size`, one line per row.
///
/// Rows end with an SGR reset and a newline, so the output can be printed
/// inline or, after a cursor home, redrawn in place.
pub fn radial(w: &mut impl Write, stops: &[GradientStop], origin: (f64, f64), size: Size) -> io::Result<()> {
    let width = u32::from(size.cols);
    let height = u32::from(size.rows) * 2;

    for row in 0..u32::from(size.rows) {
        let mut last: Option<(Rgb, Rgb)> = None;
        for col in 0..width {
            let top = pixel(stops, origin, col, row * 2, width, height);
            let bottom = pixel(stops, origin, col, row * 2 + 1, width, height);
            match last {
                Some((fg, bg)) if fg == top && bg == bottom => {}
                Some((fg, _)) if fg == top => ansi::bg(w, bottom)?,
                Some((_, bg)) if bg == bottom => ansi::fg(w, top)?,
                _ => {
                    ansi::fg(w, top)?;
                    ansi::bg(w, bottom)?;
                }
            }
            last = Some((top, bottom));
            w.write_all(UPPER_HALF.as_bytes())?;
        }
        ansi::reset(w)?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// A solid block of `width` cells.
pub fn swatch(w: &mut impl Write, color: Rgb, width: usize) -> io::Result<()> {
    ansi::bg(w, color)?;
    write!(w, "{:width$}", "")?;
    ansi::reset(w)
}

/// `text` in `fg` over `bg`, padded by one cell on each side.
pub fn sample(w: &mut impl Write, fg: Rgb, bg: Rgb, text: &str) -> io::Result<()> {
    ansi::fg(w, fg)?;
    ansi::bg(w, bg)?;
    write!(w, " {text} ")?;
    ansi::reset(w)
}
