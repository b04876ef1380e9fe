use crate::coords::Vec2;

use super::Texture;

/// Draws `texture` stretched over a `size` box centered on `center`, rotated
/// by `rotation_deg` degrees counter-clockwise (as seen on screen) about that
/// center.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub texture: Texture,
    pub center: Vec2,
    pub size: Vec2,
    pub rotation_deg: f32,
}

impl SpriteCmd {
    /// Unrotated command drawn at the texture's natural size.
    pub fn new(texture: Texture, center: Vec2) -> Self {
        let size = Vec2::new(texture.width() as f32, texture.height() as f32);
        Self {
            texture,
            center,
            size,
            rotation_deg: 0.0,
        }
    }

    /// Unrotated command whose top-left corner sits at `origin`.
    pub fn at_top_left(texture: Texture, origin: Vec2) -> Self {
        let size = Vec2::new(texture.width() as f32, texture.height() as f32);
        let center = Vec2::new(origin.x + size.x * 0.5, origin.y + size.y * 0.5);
        Self {
            texture,
            center,
            size,
            rotation_deg: 0.0,
        }
    }

    #[inline]
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_deg = degrees;
        self
    }
}
