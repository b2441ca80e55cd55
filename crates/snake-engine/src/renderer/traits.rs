//! Renderer trait for paint backends.
//!
//! The engine never touches a drawing surface. Each frame it produces a
//! [`DrawList`] from a read-only snapshot and hands it to a backend through
//! this trait: Canvas 2D in the browser, a recorder in tests.

use super::draw_list::{DrawCommand, DrawList};

/// Complete frame data for painting.
pub struct FrameData<'a> {
    /// Paint commands in order. The first one clears the surface.
    pub commands: &'a [DrawCommand],
    /// Surface dimensions in pixels.
    pub width: u32,
    pub height: u32,
}

impl<'a> FrameData<'a> {
    pub fn new(list: &'a DrawList, width: u32, height: u32) -> Self {
        Self {
            commands: &list.commands,
            width,
            height,
        }
    }
}

/// Paint backend.
///
/// # Example Implementation
///
/// ```ignore
/// struct TerminalRenderer { /* ... */ }
///
/// impl Renderer for TerminalRenderer {
///     type Error = std::io::Error;
///     fn backend(&self) -> &'static str { "terminal" }
///     fn draw(&mut self, frame: &FrameData) -> Result<(), Self::Error> {
///         // Map each command to terminal cells...
///     }
///     fn resize(&mut self, width: u32, height: u32) { /* ... */ }
/// }
/// ```
pub trait Renderer {
    type Error;

    /// Backend identifier (e.g., "canvas2d").
    fn backend(&self) -> &'static str;

    /// Paint one frame.
    fn draw(&mut self, frame: &FrameData<'_>) -> Result<(), Self::Error>;

    /// The surface changed size.
    fn resize(&mut self, width: u32, height: u32);
}
