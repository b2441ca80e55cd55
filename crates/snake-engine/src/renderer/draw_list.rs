use glam::Vec2;

/// Which configured color a command paints with.
/// Backends resolve these against their [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Background,
    Snake,
    Food,
}

/// Text sizes used by the game-over overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Bold 48px monospace.
    Title,
    /// 24px monospace.
    Body,
    /// 18px monospace.
    Hint,
}

impl TextStyle {
    /// CSS font shorthand.
    pub fn css_font(self) -> &'static str {
        match self {
            TextStyle::Title => "bold 48px monospace",
            TextStyle::Body => "24px monospace",
            TextStyle::Hint => "18px monospace",
        }
    }
}

/// One paint operation. Positions and sizes are in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle. `glow` is a blur radius; 0.0 means none.
    FillRect {
        origin: Vec2,
        size: Vec2,
        paint: Paint,
        alpha: f32,
        glow: f32,
    },
    /// Text centered on `center`.
    FillText {
        text: String,
        center: Vec2,
        style: TextStyle,
        paint: Paint,
    },
}

/// Colors a backend paints [`Paint`] slots with. CSS color strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: String,
    pub snake: String,
    pub food: String,
}

impl Palette {
    pub fn color(&self, paint: Paint) -> &str {
        match paint {
            Paint::Background => &self.background,
            Paint::Snake => &self.snake,
            Paint::Food => &self.food,
        }
    }
}

/// Ordered paint commands for one frame, rebuilt every frame.
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}
