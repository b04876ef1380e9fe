use std::ops::{Deref, DerefMut};

use crate::image::Image;
use crate::object::{Entity, Object};

/// An object that shows an image.
///
/// Derefs to its [`Object`], so `sprite.x`, `sprite.rotation` and friends
/// work directly.
#[derive(Debug)]
pub struct Sprite {
    object: Object,
    image: Image,
}

impl Sprite {
    /// A collideable sprite centered on `(x, y)`.
    pub fn new(x: f32, y: f32, image: Image) -> Self {
        Self {
            object: Object::with_surface(x, y, image.clone(), true),
            image,
        }
    }

    pub fn with_collideable(mut self, collideable: bool) -> Self {
        self.object.collideable = collideable;
        self
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Swaps the image; the object's size follows immediately.
    pub fn set_image(&mut self, image: Image) {
        self.object.set_surface(image.clone());
        self.image = image;
    }
}

impl Deref for Sprite {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.object
    }
}

impl DerefMut for Sprite {
    fn deref_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl Entity for Sprite {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

#[cfg(test)]
mod tests {
    use sprig_engine::paint::Color;

    use super::*;

    #[test]
    fn set_image_resizes() {
        let mut sprite = Sprite::new(0.0, 0.0, Image::solid(4, 4, Color::WHITE));
        assert_eq!(sprite.width(), 4.0);

        let big = Image::solid(16, 8, Color::BLACK);
        sprite.set_image(big.clone());
        assert_eq!((sprite.width(), sprite.height()), (16.0, 8.0));
        assert_eq!(sprite.image(), &big);
        assert_eq!(sprite.surface(), Some(&big));
    }

    #[test]
    fn sprites_collide_unless_told_otherwise() {
        let img = Image::solid(1, 1, Color::WHITE);
        assert!(Sprite::new(0.0, 0.0, img.clone()).collideable);
        assert!(!Sprite::new(0.0, 0.0, img).with_collideable(false).collideable);
    }
}
