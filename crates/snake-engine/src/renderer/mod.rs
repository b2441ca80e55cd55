pub mod draw_list;
pub mod traits;

pub use draw_list::{DrawCommand, DrawList, Paint, Palette, TextStyle};
pub use traits::{FrameData, Renderer};
