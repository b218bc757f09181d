/// Viewport rectangle in window pixels.
///
/// Width and height are coerced to at least one pixel, so the aspect
/// ratio is always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Viewport {
        Viewport {
            x,
            y,
            width: f32::max(width, 1.0),
            height: f32::max(height, 1.0),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(0.0, 0.0, 1.0, 1.0)
    }
}
