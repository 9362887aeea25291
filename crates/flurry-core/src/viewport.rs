use glam::Vec2;

/// Render target extent in pixels. Both the simulation and render
/// shaders receive this; particle positions are expressed relative to
/// its center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Half extent; positions span [-half.x, half.x] × [-half.y, half.y].
    pub fn half_extent(&self) -> Vec2 {
        self.extent() * 0.5
    }
}
