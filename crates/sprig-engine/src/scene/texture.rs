use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Texture`].
///
/// The renderer keys its GPU upload cache on this value, so two textures with
/// equal pixels but different ids are uploaded separately.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TextureId(u64);

/// Immutable, shared RGBA8 pixel data (straight alpha, sRGB).
///
/// Cloning is cheap; clones share pixels and identity.
#[derive(Clone)]
pub struct Texture {
    id: TextureId,
    pixels: Arc<RgbaImage>,
}

impl Texture {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            id: TextureId(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed)),
            pixels: Arc::new(pixels),
        }
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `true` when the texture has no pixels and cannot be uploaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Texture {}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id.0)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_texture_gets_a_fresh_id() {
        let a = Texture::new(RgbaImage::new(2, 2));
        let b = Texture::new(RgbaImage::new(2, 2));
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn clones_share_identity() {
        let a = Texture::new(RgbaImage::new(3, 1));
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.width(), 3);
        assert_eq!(b.height(), 1);
    }

    #[test]
    fn zero_sized_texture_is_empty() {
        assert!(Texture::new(RgbaImage::new(0, 5)).is_empty());
        assert!(!Texture::new(RgbaImage::new(1, 1)).is_empty());
    }
}
