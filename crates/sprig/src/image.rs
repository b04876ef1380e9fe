use std::path::Path;

use image::{Rgba, RgbaImage};
use sprig_engine::coords::Vec2;
use sprig_engine::paint::Color;
use sprig_engine::scene::Texture;

use crate::error::AssetError;

/// Decoded RGBA pixels, shared by every object that shows them.
///
/// Cloning is cheap and keeps the same GPU texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image(Texture);

impl Image {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self(Texture::new(pixels))
    }

    /// A `width` x `height` image filled with `color`.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self::from_rgba(RgbaImage::from_pixel(width, height, Rgba(color.to_srgb_u8())))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        self.0.pixels()
    }

    pub fn texture(&self) -> &Texture {
        &self.0
    }
}

/// Loads an image file.
///
/// With `transparent`, the top-left pixel's color becomes the transparent
/// color; see [`apply_color_key`].
pub fn load_image(path: impl AsRef<Path>, transparent: bool) -> Result<Image, AssetError> {
    let path = path.as_ref();
    let mut pixels = image::open(path)
        .map_err(|e| AssetError::Image {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .to_rgba8();

    if transparent {
        apply_color_key(&mut pixels);
    }
    Ok(Image::from_rgba(pixels))
}

/// Makes every pixel whose RGB exactly equals the top-left pixel's RGB fully
/// transparent (`0,0,0,0`). All other pixels become fully opaque.
pub fn apply_color_key(pixels: &mut RgbaImage) {
    let Some(&Rgba([kr, kg, kb, _])) = pixels.pixels().next() else {
        return;
    };

    for px in pixels.pixels_mut() {
        let Rgba([r, g, b, _]) = *px;
        *px = if (r, g, b) == (kr, kg, kb) {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([r, g, b, 255])
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);

    fn keyed_fixture() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(3, 2, MAGENTA);
        img.put_pixel(1, 0, Rgba([10, 20, 30, 128]));
        img.put_pixel(2, 1, Rgba([255, 0, 254, 255]));
        img
    }

    #[test]
    fn color_key_clears_matching_pixels() {
        let mut img = keyed_fixture();
        apply_color_key(&mut img);

        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*img.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*img.get_pixel(0, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn color_key_forces_other_pixels_opaque() {
        let mut img = keyed_fixture();
        apply_color_key(&mut img);

        assert_eq!(*img.get_pixel(1, 0), Rgba([10, 20, 30, 255]));
        // Off by one in blue is not a match.
        assert_eq!(*img.get_pixel(2, 1), Rgba([255, 0, 254, 255]));
    }

    #[test]
    fn color_key_ignores_alpha_when_matching() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([5, 5, 5, 255]));
        img.put_pixel(1, 0, Rgba([5, 5, 5, 7]));
        apply_color_key(&mut img);
        assert_eq!(*img.get_pixel(1, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn empty_image_is_left_alone() {
        let mut img = RgbaImage::new(0, 0);
        apply_color_key(&mut img);
        assert_eq!(img.dimensions(), (0, 0));
    }

    #[test]
    fn load_image_keys_a_png_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ship.png");
        keyed_fixture().save(&path).expect("write png");

        let keyed = load_image(&path, true).expect("load keyed");
        assert_eq!(keyed.pixels().get_pixel(0, 0)[3], 0);
        assert_eq!(keyed.pixels().get_pixel(1, 0)[3], 255);

        let plain = load_image(&path, false).expect("load plain");
        assert_eq!(*plain.pixels().get_pixel(0, 0), MAGENTA);
        assert_eq!(plain.size(), Vec2::new(3.0, 2.0));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_image("does/not/exist.png", false).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.png"));
    }
}
