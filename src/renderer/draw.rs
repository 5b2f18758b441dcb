//! Draw command types and the surface they are issued to

use glam::Vec2;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Horizontal anchoring for text commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// A single primitive draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle, `pos` is the top-left corner
    FillRect { pos: Vec2, size: Vec2, color: Color },
    /// Filled ellipse inscribed in the box at `pos` (top-left) of `size`
    FillOval { pos: Vec2, size: Vec2, color: Color },
    /// Outlined ellipse inscribed in the box at `pos` (top-left) of `size`
    StrokeOval {
        pos: Vec2,
        size: Vec2,
        color: Color,
        line_width: f32,
    },
    /// Text anchored at `pos` (baseline)
    Text {
        pos: Vec2,
        text: String,
        font_size: f32,
        color: Color,
        align: TextAlign,
    },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::FillRect { color, .. }
            | DrawCommand::FillOval { color, .. }
            | DrawCommand::StrokeOval { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }
}

/// Anything that accepts draw calls
pub trait Surface {
    fn draw(&mut self, command: DrawCommand);
}

/// A surface that records commands in issue order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings, in issue order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any text command contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    /// Number of filled rectangles drawn with exactly `color`
    pub fn count_rects(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillRect { color: fill, .. } if *fill == color))
            .count()
    }
}

impl Surface for DrawList {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
