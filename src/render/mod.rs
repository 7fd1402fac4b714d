pub mod palette;
pub mod renderer;

pub use palette::{Palette, Role};
pub use renderer::{Content, Frame, Renderer};
