//! Shape helpers for 2D primitives

use glam::Vec2;

use super::draw::{Color, DrawCommand, Surface, TextAlign};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER: Color = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_BULLET: Color = [0.0, 1.0, 1.0, 1.0];
    pub const PLAYER_BULLET_CORE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const ENEMY_BULLET: Color = [1.0, 0.0, 0.0, 1.0];
    pub const ENEMY: Color = [0.2, 0.9, 0.2, 1.0];
    pub const ENEMY_EYE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const SPEED_BOOST: Color = [1.0, 1.0, 0.0, 1.0];
    pub const SHIELD: Color = [0.0, 1.0, 1.0, 0.6];
    pub const FIRE_POWER: Color = [1.0, 0.65, 0.0, 1.0];
    pub const HUD_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const HINT_TEXT: Color = [0.7, 0.7, 0.7, 1.0];
    pub const TITLE: Color = [0.0, 1.0, 0.5, 1.0];
    pub const PAUSE_DIM: Color = [0.0, 0.0, 0.0, 0.7];
    pub const GAME_OVER_TINT: Color = [0.2, 0.0, 0.0, 1.0];
    pub const GAME_OVER_TEXT: Color = [1.0, 0.2, 0.2, 1.0];
    pub const VICTORY_TINT: Color = [0.2, 0.15, 0.0, 1.0];
    pub const VICTORY_TEXT: Color = [1.0, 0.84, 0.0, 1.0];
}

/// Filled rectangle centered on `center`
pub fn fill_rect_centered(surface: &mut dyn Surface, center: Vec2, size: Vec2, color: Color) {
    surface.draw(DrawCommand::FillRect {
        pos: center - size * 0.5,
        size,
        color,
    });
}

/// Filled ellipse centered on `center`
pub fn fill_oval_centered(surface: &mut dyn Surface, center: Vec2, size: Vec2, color: Color) {
    surface.draw(DrawCommand::FillOval {
        pos: center - size * 0.5,
        size,
        color,
    });
}

/// Outlined ellipse centered on `center`
pub fn stroke_oval_centered(
    surface: &mut dyn Surface,
    center: Vec2,
    size: Vec2,
    color: Color,
    line_width: f32,
) {
    surface.draw(DrawCommand::StrokeOval {
        pos: center - size * 0.5,
        size,
        color,
        line_width,
    });
}

/// Cover the whole logical screen
pub fn fill_screen(surface: &mut dyn Surface, color: Color) {
    surface.draw(DrawCommand::FillRect {
        pos: Vec2::ZERO,
        size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        color,
    });
}

pub fn text(surface: &mut dyn Surface, pos: Vec2, text: impl Into<String>, font_size: f32, color: Color) {
    surface.draw(DrawCommand::Text {
        pos,
        text: text.into(),
        font_size,
        color,
        align: TextAlign::Left,
    });
}

/// Text horizontally centered on the screen at height `y`
pub fn centered_text(surface: &mut dyn Surface, y: f32, text: impl Into<String>, font_size: f32, color: Color) {
    surface.draw(DrawCommand::Text {
        pos: Vec2::new(SCREEN_WIDTH / 2.0, y),
        text: text.into(),
        font_size,
        color,
        align: TextAlign::Center,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;

    #[test]
    fn test_centered_rect_offsets_by_half_size() {
        let mut list = DrawList::new();
        fill_rect_centered(&mut list, Vec2::new(100.0, 100.0), Vec2::new(40.0, 30.0), colors::ENEMY);

        match &list.commands[0] {
            DrawCommand::FillRect { pos, size, .. } => {
                assert_eq!(*pos, Vec2::new(80.0, 85.0));
                assert_eq!(*size, Vec2::new(40.0, 30.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_fill_screen_covers_logical_space() {
        let mut list = DrawList::new();
        fill_screen(&mut list, colors::PAUSE_DIM);
        assert_eq!(
            list.commands[0],
            DrawCommand::FillRect {
                pos: Vec2::ZERO,
                size: Vec2::new(800.0, 600.0),
                color: colors::PAUSE_DIM,
            }
        );
    }
}
