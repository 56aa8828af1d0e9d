//! Draw commands issued by the instrument renderer.
//!
//! A frame is a flat list of commands executed in order. Glow works like a
//! canvas shadow: `SetGlow` applies to every following shape until `ClearGlow`
//! or the end of the frame.

use arrayvec::{ArrayString, ArrayVec};

use crate::types::Rgb;

/// Maximum commands in one frame. The fixed HUD template uses well under half.
pub const DRAW_LIST_CAPACITY: usize = 64;

/// Text payload capacity in bytes.
pub const TEXT_CAPACITY: usize = 24;

pub type Text = ArrayString<TEXT_CAPACITY>;

/// Color plus effective opacity (operation opacity times overlay alpha).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Paint {
    pub fn new(rgb: Rgb, alpha: f32) -> Self {
        Self { rgb, alpha }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    SetGlow {
        rgb: Rgb,
        blur: f32,
    },
    ClearGlow,
    Line {
        from: Point,
        to: Point,
        width: f32,
        paint: Paint,
    },
    FillRect {
        origin: Point,
        w: f32,
        h: f32,
        paint: Paint,
    },
    StrokeRect {
        origin: Point,
        w: f32,
        h: f32,
        width: f32,
        paint: Paint,
    },
    FillCircle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    /// `anchor` is the top edge of the glyph row; x is interpreted per `align`.
    Text {
        anchor: Point,
        text: Text,
        scale: f32,
        align: TextAlign,
        paint: Paint,
    },
}

impl DrawCmd {
    pub fn paint(&self) -> Option<Paint> {
        match self {
            DrawCmd::SetGlow { .. } | DrawCmd::ClearGlow => None,
            DrawCmd::Line { paint, .. }
            | DrawCmd::FillRect { paint, .. }
            | DrawCmd::StrokeRect { paint, .. }
            | DrawCmd::FillCircle { paint, .. }
            | DrawCmd::Text { paint, .. } => Some(*paint),
        }
    }
}

/// Reusable, fixed-capacity command list. Pushing never allocates; commands
/// past capacity are dropped.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    cmds: ArrayVec<DrawCmd, DRAW_LIST_CAPACITY>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        let _ = self.cmds.try_push(cmd);
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.cmds.iter()
    }

    pub fn as_slice(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// All text payloads in issue order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCmd;
    type IntoIter = std::slice::Iter<'a, DrawCmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_past_capacity_is_dropped() {
        let mut list = DrawList::new();
        for _ in 0..DRAW_LIST_CAPACITY + 5 {
            list.push(DrawCmd::ClearGlow);
        }
        assert_eq!(list.len(), DRAW_LIST_CAPACITY);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn texts_filters_text_commands() {
        let mut list = DrawList::new();
        list.push(DrawCmd::ClearGlow);
        let mut t = Text::new();
        t.push_str("ALT: 1.49");
        list.push(DrawCmd::Text {
            anchor: Point::new(0.0, 0.0),
            text: t,
            scale: 1.0,
            align: TextAlign::Left,
            paint: Paint::new(Rgb::new(1, 2, 3), 1.0),
        });
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["ALT: 1.49"]);
    }
}
