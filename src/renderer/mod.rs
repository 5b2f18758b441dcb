//! Drawable descriptions
//!
//! The simulation never touches pixels. Every `render` call emits primitive
//! draw commands into a [`Surface`] addressed in the fixed 800×600 logical
//! space; whatever owns the real canvas replays them.

pub mod draw;
pub mod shapes;

pub use draw::{Color, DrawCommand, DrawList, Surface, TextAlign};
pub use shapes::colors;
