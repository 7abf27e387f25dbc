use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Solid rectangle command.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Text run command.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub origin: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color,
    pub font: FontId,
}

/// Renderer-agnostic overlay draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Text(TextCmd),
}

/// Ordered overlay command stream.
///
/// Commands paint in insertion order. Rebuilt every frame; `clear` is called
/// by the app before repainting.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Rect(RectCmd { rect, color }));
    }

    pub fn push_text(
        &mut self,
        origin: Vec2,
        text: impl Into<String>,
        size: f32,
        color: Color,
        font: FontId,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Text(TextCmd {
            origin,
            text,
            size,
            color,
            font,
        }));
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rects_are_dropped() {
        let mut dl = DrawList::new();
        dl.push_rect(Rect::new(0.0, 0.0, 0.0, 10.0), Color::WHITE);
        assert!(dl.is_empty());
    }

    #[test]
    fn commands_keep_insertion_order() {
        let mut dl = DrawList::new();
        dl.push_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        dl.push_text(Vec2::new(0.0, 0.0), "a", 12.0, Color::WHITE, FontId(0));
        let kinds: Vec<_> = dl
            .iter()
            .map(|c| match c {
                DrawCmd::Rect(_) => "rect",
                DrawCmd::Text(_) => "text",
            })
            .collect();
        assert_eq!(kinds, ["rect", "text"]);
    }
}
