//! HudView: maps a [`HudSnapshot`] into a list of draw commands.
//!
//! This module is pure (no I/O, no allocation). The instrument set and its
//! geometry are a fixed template; only the centering depends on the viewport.

use std::fmt::Write as _;

use crate::core::HudSnapshot;
use crate::draw::{DrawCmd, DrawList, Paint, Point, Text, TextAlign};
use crate::types::{half_fov_radians, Palette, Rgb, HORIZON_CULL_MARGIN};

/// Viewport dimensions in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

// Layout template, in unscaled pixels relative to the viewport center.
const HORIZON_GAP: f32 = 10.0;
const HORIZON_SPAN: f32 = 50.0;
const CROSSHAIR_INNER: f32 = 3.0;
const CROSSHAIR_OUTER: f32 = 8.0;
const CROSSHAIR_DROP: f32 = 3.0;
const CENTER_DOT_RADIUS: f32 = 1.0;
const READOUT_X: f32 = 16.0;
const ALT_PANEL_Y: f32 = -11.0;
const VS_PANEL_Y: f32 = 2.0;
const PANEL_W: f32 = 48.0;
const PANEL_H: f32 = 9.0;
const PANEL_PAD: f32 = 2.0;
const HEADING_PANEL_Y: f32 = -30.0;
const HEADING_PANEL_W: f32 = 24.0;
const HEADING_LABEL_GAP: f32 = 7.0;
const CLIMB_TRACK_X: f32 = 70.0;
const CLIMB_TRACK_W: f32 = 3.0;
const CLIMB_TRACK_H: f32 = 40.0;
const CLIMB_BLOCK_W: f32 = 7.0;
const CLIMB_BLOCK_H: f32 = 2.0;
const GLOW_BLUR: f32 = 1.0;
const LIVE_GLOW_BLUR: f32 = 3.0;

// Operation opacities, multiplied by the overlay alpha.
const HORIZON_OPACITY: f32 = 0.8;
const CROSSHAIR_OPACITY: f32 = 0.5;
const PANEL_FILL_OPACITY: f32 = 0.15;
const PANEL_BORDER_OPACITY: f32 = 0.6;
const TEXT_OPACITY: f32 = 0.95;
const LABEL_OPACITY: f32 = 0.7;
const TRACK_OPACITY: f32 = 0.4;
const TRACK_CENTER_OPACITY: f32 = 0.6;
const INDICATOR_OPACITY: f32 = 0.95;

/// Fixed geometry template with a uniform scale.
///
/// Scale 1 suits a terminal (two pixel rows per character row); pixel hosts
/// typically want 3 or 4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudLayout {
    scale: f32,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl HudLayout {
    pub fn new(scale: u16) -> Self {
        Self {
            scale: scale.max(1) as f32,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline(always)]
    fn px(&self, v: f32) -> f32 {
        v * self.scale
    }

    /// Vertical extent of the climb track around its center.
    pub fn climb_half_height(&self) -> f32 {
        self.px(CLIMB_TRACK_H / 2.0)
    }
}

/// Screen y of the horizon for `pitch` radians on a viewport `height` pixels tall.
///
/// Linear in pitch: the horizon sits at the vertical center for level flight
/// and moves half a viewport per half field of view.
pub fn horizon_y(pitch: f64, height: u16) -> f64 {
    let half_h = height as f64 / 2.0;
    let offset = -(pitch / half_fov_radians()) * half_h;
    half_h + offset
}

/// Cheap culling band for the horizon line.
pub fn horizon_visible(y: f64, height: u16) -> bool {
    y >= -HORIZON_CULL_MARGIN && y <= height as f64 + HORIZON_CULL_MARGIN
}

/// Shown in place of a number too wide for the panel.
pub const READOUT_OVERFLOW: &str = "----";

/// `label` followed by `value` to two decimals. A value that does not fit the
/// text payload is replaced by [`READOUT_OVERFLOW`] rather than cut short.
fn readout(label: &str, value: f64) -> Text {
    let mut t = Text::new();
    if write!(t, "{label}{value:.2}").is_err() {
        t.clear();
        t.push_str(label);
        t.push_str(READOUT_OVERFLOW);
    }
    t
}

/// Altitude readout, e.g. `ALT: 1.49`.
pub fn altitude_text(snap: &HudSnapshot) -> Text {
    readout("ALT: ", snap.altitude())
}

pub fn vertical_speed_text(snap: &HudSnapshot) -> Text {
    readout("V/S: ", snap.vertical_speed_display())
}

pub fn heading_text(snap: &HudSnapshot) -> Text {
    let mut t = Text::new();
    let _ = write!(t, "{}°", snap.heading_display());
    t
}

/// The instrument renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HudView {
    layout: HudLayout,
}

impl HudView {
    pub fn new(layout: HudLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> HudLayout {
        self.layout
    }

    /// Screen y of the climb indicator's center for this snapshot.
    pub fn climb_indicator_y(&self, snap: &HudSnapshot, viewport: Viewport) -> f32 {
        let cy = viewport.height as f32 / 2.0;
        cy - snap.climb_fraction() as f32 * self.layout.climb_half_height()
    }

    /// Issue this frame's commands into `out`, replacing its contents.
    ///
    /// Leaves `out` empty when the overlay is faded out.
    pub fn render_into(&self, snap: &HudSnapshot, viewport: Viewport, out: &mut DrawList) {
        out.clear();
        let snap = snap.sanitized();

        // 1. Visibility gate.
        if !snap.is_visible() {
            return;
        }
        let alpha = snap.overlay_alpha() as f32;

        // 2. Palette.
        let palette = Palette::for_status(snap.collision);
        let base = |opacity: f32| Paint::new(palette.base, opacity * alpha);
        let glow = |opacity: f32| Paint::new(palette.glow, opacity * alpha);

        let l = &self.layout;
        let cx = viewport.width as f32 / 2.0;
        let cy = viewport.height as f32 / 2.0;
        let stroke = l.px(1.0);

        out.push(DrawCmd::SetGlow {
            rgb: palette.glow,
            blur: l.px(GLOW_BLUR),
        });

        // 3. Horizon.
        let hy = horizon_y(snap.pitch, viewport.height);
        if horizon_visible(hy, viewport.height) {
            let hy = hy as f32;
            out.push(DrawCmd::Line {
                from: Point::new(cx - l.px(HORIZON_SPAN), hy),
                to: Point::new(cx - l.px(HORIZON_GAP), hy),
                width: stroke,
                paint: base(HORIZON_OPACITY),
            });
            out.push(DrawCmd::Line {
                from: Point::new(cx + l.px(HORIZON_GAP), hy),
                to: Point::new(cx + l.px(HORIZON_SPAN), hy),
                width: stroke,
                paint: base(HORIZON_OPACITY),
            });
        }

        // 4. Crosshair / waterline.
        self.draw_crosshair(out, cx, cy, stroke, base(CROSSHAIR_OPACITY));

        // 5. Altitude and vertical speed.
        out.push(DrawCmd::ClearGlow);
        let panel_x = cx + l.px(READOUT_X);
        self.draw_panel(
            out,
            Point::new(panel_x, cy + l.px(ALT_PANEL_Y)),
            l.px(PANEL_W),
            altitude_text(&snap),
            TextAlign::Left,
            &base,
        );
        self.draw_panel(
            out,
            Point::new(panel_x, cy + l.px(VS_PANEL_Y)),
            l.px(PANEL_W),
            vertical_speed_text(&snap),
            TextAlign::Left,
            &base,
        );

        // 6. Heading.
        let heading_origin = Point::new(
            cx - l.px(HEADING_PANEL_W) / 2.0,
            cy + l.px(HEADING_PANEL_Y),
        );
        let mut label = Text::new();
        label.push_str("HDG");
        out.push(DrawCmd::Text {
            anchor: Point::new(cx, heading_origin.y - l.px(HEADING_LABEL_GAP)),
            text: label,
            scale: l.scale,
            align: TextAlign::Center,
            paint: glow(LABEL_OPACITY),
        });
        self.draw_panel(
            out,
            heading_origin,
            l.px(HEADING_PANEL_W),
            heading_text(&snap),
            TextAlign::Center,
            &base,
        );

        // 7. Climb-rate indicator.
        self.draw_climb(out, &snap, viewport, stroke, palette, alpha);
        out.push(DrawCmd::ClearGlow);
    }

    fn draw_crosshair(&self, out: &mut DrawList, cx: f32, cy: f32, stroke: f32, paint: Paint) {
        let l = &self.layout;
        let (inner, outer, drop) = (
            l.px(CROSSHAIR_INNER),
            l.px(CROSSHAIR_OUTER),
            l.px(CROSSHAIR_DROP),
        );
        // Waterline wings with short tips hanging down.
        out.push(DrawCmd::Line {
            from: Point::new(cx - outer, cy),
            to: Point::new(cx - inner, cy),
            width: stroke,
            paint,
        });
        out.push(DrawCmd::Line {
            from: Point::new(cx + inner, cy),
            to: Point::new(cx + outer, cy),
            width: stroke,
            paint,
        });
        out.push(DrawCmd::Line {
            from: Point::new(cx - outer, cy),
            to: Point::new(cx - outer, cy + drop),
            width: stroke,
            paint,
        });
        out.push(DrawCmd::Line {
            from: Point::new(cx + outer, cy),
            to: Point::new(cx + outer, cy + drop),
            width: stroke,
            paint,
        });
        out.push(DrawCmd::FillCircle {
            center: Point::new(cx, cy),
            radius: CENTER_DOT_RADIUS,
            paint,
        });
    }

    fn draw_panel(
        &self,
        out: &mut DrawList,
        origin: Point,
        w: f32,
        text: Text,
        align: TextAlign,
        base: &dyn Fn(f32) -> Paint,
    ) {
        let l = &self.layout;
        let h = l.px(PANEL_H);
        out.push(DrawCmd::FillRect {
            origin,
            w,
            h,
            paint: base(PANEL_FILL_OPACITY),
        });
        out.push(DrawCmd::StrokeRect {
            origin,
            w,
            h,
            width: l.px(1.0),
            paint: base(PANEL_BORDER_OPACITY),
        });
        let anchor_x = match align {
            TextAlign::Left => origin.x + l.px(PANEL_PAD),
            TextAlign::Center => origin.x + w / 2.0,
        };
        out.push(DrawCmd::Text {
            anchor: Point::new(anchor_x, origin.y + l.px(PANEL_PAD)),
            text,
            scale: l.scale,
            align,
            paint: base(TEXT_OPACITY),
        });
    }

    fn draw_climb(
        &self,
        out: &mut DrawList,
        snap: &HudSnapshot,
        viewport: Viewport,
        stroke: f32,
        palette: Palette,
        alpha: f32,
    ) {
        let l = &self.layout;
        let cx = viewport.width as f32 / 2.0;
        let cy = viewport.height as f32 / 2.0;
        let track_x = cx + l.px(CLIMB_TRACK_X);
        let half = l.climb_half_height();

        out.push(DrawCmd::StrokeRect {
            origin: Point::new(track_x, cy - half),
            w: l.px(CLIMB_TRACK_W),
            h: half * 2.0,
            width: stroke,
            paint: Paint::new(palette.base, TRACK_OPACITY * alpha),
        });
        out.push(DrawCmd::Line {
            from: Point::new(track_x - l.px(1.0), cy),
            to: Point::new(track_x + l.px(CLIMB_TRACK_W + 1.0), cy),
            width: stroke,
            paint: Paint::new(palette.glow, TRACK_CENTER_OPACITY * alpha),
        });

        // Live control: stronger halo.
        let iy = self.climb_indicator_y(snap, viewport);
        let block_w = l.px(CLIMB_BLOCK_W);
        let block_h = l.px(CLIMB_BLOCK_H);
        out.push(DrawCmd::SetGlow {
            rgb: palette.glow,
            blur: l.px(LIVE_GLOW_BLUR),
        });
        out.push(DrawCmd::FillRect {
            origin: Point::new(
                track_x + l.px(CLIMB_TRACK_W) / 2.0 - block_w / 2.0,
                iy - block_h / 2.0,
            ),
            w: block_w,
            h: block_h,
            paint: Paint::new(palette.glow, INDICATOR_OPACITY * alpha),
        });
    }
}

/// Base color and glow color actually used by a command list, if any.
pub fn palette_of(list: &DrawList) -> Option<(Rgb, Rgb)> {
    let glow = list.iter().find_map(|c| match c {
        DrawCmd::SetGlow { rgb, .. } => Some(*rgb),
        _ => None,
    })?;
    let base = list.iter().find_map(|c| match c {
        DrawCmd::Line { paint, .. } => Some(paint.rgb),
        _ => None,
    })?;
    Some((base, glow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CollisionStatus;

    fn level() -> HudSnapshot {
        HudSnapshot {
            hud_enabled: true,
            ..HudSnapshot::default()
        }
    }

    fn render(snap: &HudSnapshot, vp: Viewport) -> DrawList {
        let mut out = DrawList::new();
        HudView::default().render_into(snap, vp, &mut out);
        out
    }

    #[test]
    fn level_flight_scenario() {
        let list = render(&level(), Viewport::new(160, 100));
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"ALT: 1.49"));
        assert!(texts.contains(&"V/S: 0.00"));
        assert!(texts.contains(&"0°"));
        assert_eq!(
            palette_of(&list),
            Some((Rgb::new(120, 200, 255), Rgb::new(180, 150, 255)))
        );
    }

    #[test]
    fn first_horizon_segment_sits_on_center_for_level_flight() {
        let list = render(&level(), Viewport::new(160, 100));
        let first_line = list
            .iter()
            .find_map(|c| match c {
                DrawCmd::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_line.0.y, 50.0);
        assert_eq!(first_line.1.y, 50.0);
    }

    #[test]
    fn faded_out_overlay_issues_nothing() {
        let snap = HudSnapshot {
            transition: 0.995,
            ..level()
        };
        assert!(render(&snap, Viewport::new(160, 100)).is_empty());
    }

    #[test]
    fn nan_inputs_still_produce_a_frame() {
        let snap = HudSnapshot {
            pitch: f64::NAN,
            velocity: [0.0, f64::NAN, 0.0],
            collision: CollisionStatus::Approaching,
            ..level()
        };
        let list = render(&snap, Viewport::new(160, 100));
        assert!(!list.is_empty());
        for cmd in &list {
            if let Some(p) = cmd.paint() {
                assert!(p.alpha.is_finite());
            }
        }
    }
}
