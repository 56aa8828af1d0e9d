//! TerminalPresenter: flushes a pixel surface to a real terminal.
//!
//! Each terminal cell shows two vertically stacked pixels using an upper half
//! block: the top pixel is the foreground, the bottom pixel the background.
//! The overlay is composited over a black backdrop standing in for the 3D view.
//! The presenter only writes; it never reads input, so the overlay cannot
//! intercept events meant for the host.

use std::io::{self, IsTerminal, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::hud_view::Viewport;
use crate::surface::{Pixel, PixelSurface, SurfaceError, SurfaceProvider};
use crate::types::Rgb;

const HALF_BLOCK: char = '▀';
const BACKDROP: Rgb = Rgb::new(0, 0, 0);

/// Surface viewport for a terminal of `cols` x `rows` character cells.
pub fn viewport_for_terminal(cols: u16, rows: u16) -> Viewport {
    Viewport::new(cols, rows.saturating_mul(2))
}

/// Provides surfaces only when stdout is an interactive terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalSurfaceProvider;

impl SurfaceProvider for TerminalSurfaceProvider {
    fn acquire(&mut self, width: u16, height: u16) -> Result<PixelSurface, SurfaceError> {
        if !io::stdout().is_terminal() {
            return Err(SurfaceError::Unavailable("stdout is not a terminal".into()));
        }
        Ok(PixelSurface::new(width, height))
    }
}

pub struct TerminalPresenter {
    stdout: io::Stdout,
    last: Option<PixelSurface>,
    buf: Vec<u8>,
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next present to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present a surface, diffing against the previously presented one.
    ///
    /// The previous frame is kept by copying into a retained buffer, so after
    /// the first frame (and after resizes) this does not allocate.
    pub fn present(&mut self, surface: &PixelSurface) -> Result<()> {
        self.buf.clear();
        match self.last.as_mut() {
            Some(prev) if prev.width() == surface.width() && prev.height() == surface.height() => {
                encode_diff_into(prev, surface, &mut self.buf)?;
                prev.copy_from(surface);
            }
            Some(prev) => {
                encode_full_into(surface, &mut self.buf)?;
                prev.copy_from(surface);
            }
            None => {
                encode_full_into(surface, &mut self.buf)?;
                self.last = Some(surface.clone());
            }
        }
        self.flush_buf()
    }

    /// Blank the screen (overlay disabled).
    pub fn blank(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Top and bottom colors of terminal cell `(x, row)`.
fn cell_colors(s: &PixelSurface, x: u16, row: u16) -> (Rgb, Rgb) {
    let top = s.get(x, row * 2).unwrap_or(Pixel::TRANSPARENT);
    let bottom = s
        .get(x, row.saturating_mul(2).saturating_add(1))
        .unwrap_or(Pixel::TRANSPARENT);
    (top.over(BACKDROP), bottom.over(BACKDROP))
}

fn rows(s: &PixelSurface) -> u16 {
    s.height().div_ceil(2)
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(s: &PixelSurface, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(Rgb, Rgb)> = None;
    let rows = rows(s);
    for row in 0..rows {
        for x in 0..s.width() {
            let colors = cell_colors(s, x, row);
            if current != Some(colors) {
                apply_colors_into(out, colors)?;
                current = Some(colors);
            }
            out.queue(Print(HALF_BLOCK))?;
        }
        if row + 1 < rows {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only the changed runs of cells into `out`.
pub fn encode_diff_into(prev: &PixelSurface, next: &PixelSurface, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<(Rgb, Rgb)> = None;

    for_each_changed_run(prev, next, |x, row, len| {
        out.queue(cursor::MoveTo(x, row))?;
        for dx in 0..len {
            let colors = cell_colors(next, x + dx, row);
            if current != Some(colors) {
                apply_colors_into(out, colors)?;
                current = Some(colors);
            }
            out.queue(Print(HALF_BLOCK))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn apply_colors_into(out: &mut Vec<u8>, (top, bottom): (Rgb, Rgb)) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(top)))?;
    out.queue(SetBackgroundColor(rgb_to_color(bottom)))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &PixelSurface,
    next: &PixelSurface,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for row in 0..rows(next) {
            f(0, row, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for row in 0..rows(next) {
        let mut x = 0;
        while x < w {
            if cell_colors(prev, x, row) == cell_colors(next, x, row) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && cell_colors(prev, x, row) != cell_colors(next, x, row) {
                x += 1;
            }
            f(start, row, x - start)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_viewport_doubles_rows() {
        assert_eq!(viewport_for_terminal(80, 24), Viewport::new(80, 48));
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let a = PixelSurface::new(5, 2);
        let mut b = PixelSurface::new(5, 2);

        // Bottom pixel row of cells 1..=3.
        for x in 1..=3 {
            b.blend(x, 1, Rgb::new(255, 255, 255), 1.0);
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn odd_height_surface_pads_last_row() {
        let s = PixelSurface::new(1, 3);
        assert_eq!(rows(&s), 2);
        assert_eq!(cell_colors(&s, 0, 1), (BACKDROP, BACKDROP));
    }

    #[test]
    fn full_encode_emits_one_block_per_cell() {
        let s = PixelSurface::new(3, 4);
        let mut out = Vec::new();
        encode_full_into(&s, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
    }
}
