//! Software rasterizer for [`DrawList`]s.
//!
//! Works directly on a [`PixelSurface`]; nothing here allocates. Commands whose
//! geometry is not finite are skipped, and all loops are clipped to the surface
//! before iterating, so a wild coordinate costs nothing.

use crate::draw::{DrawCmd, DrawList, Paint, Point, TextAlign};
use crate::font::{glyph, text_width, ADVANCE, GLYPH_H, GLYPH_W};
use crate::surface::PixelSurface;
use crate::types::Rgb;

/// Halo opacity relative to the shape it surrounds.
const GLOW_STRENGTH: f32 = 0.35;

#[derive(Debug, Clone, Copy)]
struct Glow {
    rgb: Rgb,
    blur: f32,
}

/// Execute every command in order onto `surface`.
pub fn execute(list: &DrawList, surface: &mut PixelSurface) {
    let mut glow: Option<Glow> = None;
    for cmd in list {
        match *cmd {
            DrawCmd::SetGlow { rgb, blur } => {
                glow = (blur.is_finite() && blur > 0.0).then_some(Glow { rgb, blur });
            }
            DrawCmd::ClearGlow => glow = None,
            DrawCmd::Line {
                from,
                to,
                width,
                paint,
            } => {
                if !(from.is_finite() && to.is_finite() && width.is_finite()) {
                    continue;
                }
                if let Some(g) = glow {
                    line(surface, from, to, width + 2.0 * g.blur, halo(g, paint));
                }
                line(surface, from, to, width, paint);
            }
            DrawCmd::FillRect { origin, w, h, paint } => {
                if !(origin.is_finite() && w.is_finite() && h.is_finite()) {
                    continue;
                }
                if let Some(g) = glow {
                    fill_rect(
                        surface,
                        origin.x - g.blur,
                        origin.y - g.blur,
                        w + 2.0 * g.blur,
                        h + 2.0 * g.blur,
                        halo(g, paint),
                    );
                }
                fill_rect(surface, origin.x, origin.y, w, h, paint);
            }
            DrawCmd::StrokeRect {
                origin,
                w,
                h,
                width,
                paint,
            } => {
                if !(origin.is_finite() && w.is_finite() && h.is_finite() && width.is_finite()) {
                    continue;
                }
                if let Some(g) = glow {
                    stroke_rect(
                        surface,
                        Point::new(origin.x - g.blur, origin.y - g.blur),
                        w + 2.0 * g.blur,
                        h + 2.0 * g.blur,
                        width + 2.0 * g.blur,
                        halo(g, paint),
                    );
                }
                stroke_rect(surface, origin, w, h, width, paint);
            }
            DrawCmd::FillCircle {
                center,
                radius,
                paint,
            } => {
                if !(center.is_finite() && radius.is_finite()) {
                    continue;
                }
                if let Some(g) = glow {
                    fill_circle(surface, center, radius + g.blur, halo(g, paint));
                }
                fill_circle(surface, center, radius, paint);
            }
            // Text is not haloed; at 3x5 a blurred glyph is unreadable.
            DrawCmd::Text {
                anchor,
                ref text,
                scale,
                align,
                paint,
            } => {
                if !(anchor.is_finite() && scale.is_finite()) {
                    continue;
                }
                draw_text(surface, anchor, text, scale, align, paint);
            }
        }
    }
}

fn halo(g: Glow, paint: Paint) -> Paint {
    Paint::new(g.rgb, paint.alpha * GLOW_STRENGTH)
}

/// Pixel index range `[lo, hi)` whose centers fall in `[a, b)`, clipped to `0..max`.
fn span(a: f32, b: f32, max: u16) -> (i32, i32) {
    let lo = (a - 0.5).ceil().max(0.0);
    let hi = (b - 0.5).ceil().min(max as f32);
    if hi <= lo {
        return (0, 0);
    }
    (lo as i32, hi as i32)
}

fn fill_rect(s: &mut PixelSurface, x: f32, y: f32, w: f32, h: f32, paint: Paint) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let (x0, x1) = span(x, x + w, s.width());
    let (y0, y1) = span(y, y + h, s.height());
    for py in y0..y1 {
        for px in x0..x1 {
            s.blend(px, py, paint.rgb, paint.alpha);
        }
    }
}

fn stroke_rect(s: &mut PixelSurface, o: Point, w: f32, h: f32, width: f32, paint: Paint) {
    let t = width.min(w / 2.0).min(h / 2.0);
    if t <= 0.0 {
        return;
    }
    fill_rect(s, o.x, o.y, w, t, paint);
    fill_rect(s, o.x, o.y + h - t, w, t, paint);
    fill_rect(s, o.x, o.y + t, t, h - 2.0 * t, paint);
    fill_rect(s, o.x + w - t, o.y + t, t, h - 2.0 * t, paint);
}

/// Thick segment: every pixel whose center lies within `width / 2` of the segment.
fn line(s: &mut PixelSurface, a: Point, b: Point, width: f32, paint: Paint) {
    let r = (width / 2.0).max(0.5);
    let (x0, x1) = span(a.x.min(b.x) - r, a.x.max(b.x) + r, s.width());
    let (y0, y1) = span(a.y.min(b.y) - r, a.y.max(b.y) + r, s.height());
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let r2 = r * r;
    for py in y0..y1 {
        for px in x0..x1 {
            let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
            let t = if len2 > 0.0 {
                (((cx - a.x) * dx + (cy - a.y) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (ex, ey) = (a.x + t * dx - cx, a.y + t * dy - cy);
            if ex * ex + ey * ey <= r2 {
                s.blend(px, py, paint.rgb, paint.alpha);
            }
        }
    }
}

fn fill_circle(s: &mut PixelSurface, c: Point, radius: f32, paint: Paint) {
    if radius <= 0.0 {
        return;
    }
    let (x0, x1) = span(c.x - radius, c.x + radius, s.width());
    let (y0, y1) = span(c.y - radius, c.y + radius, s.height());
    let r2 = radius * radius;
    for py in y0..y1 {
        for px in x0..x1 {
            let (ex, ey) = (px as f32 + 0.5 - c.x, py as f32 + 0.5 - c.y);
            if ex * ex + ey * ey <= r2 {
                s.blend(px, py, paint.rgb, paint.alpha);
            }
        }
    }
}

fn draw_text(
    s: &mut PixelSurface,
    anchor: Point,
    text: &str,
    scale: f32,
    align: TextAlign,
    paint: Paint,
) {
    let k = scale.max(1.0).round();
    let x = match align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - text_width(text) as f32 * k / 2.0,
    };
    let (x, y) = (x.round(), anchor.y.round());
    let mut pen = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (gy, bits) in rows.iter().enumerate().take(GLYPH_H as usize) {
                for gx in 0..GLYPH_W {
                    if bits & (0b100 >> gx) != 0 {
                        fill_rect(
                            s,
                            pen + gx as f32 * k,
                            y + gy as f32 * k,
                            k,
                            k,
                            paint,
                        );
                    }
                }
            }
        }
        pen += ADVANCE as f32 * k;
    }
}
