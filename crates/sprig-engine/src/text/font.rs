use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fontdue::layout::{CoordinateSystem, GlyphPosition, Layout, LayoutSettings, TextStyle};
use image::{Rgba, RgbaImage};

use crate::paint::Color;

/// Error returned when a font file cannot be read or parsed.
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// A parsed TrueType/OpenType font at a fixed pixel size.
///
/// Cloning is cheap; clones share the parsed font data.
#[derive(Clone)]
pub struct Font {
    inner: Arc<fontdue::Font>,
    size: f32,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.inner.name())
            .field("size", &self.size)
            .finish()
    }
}

impl Font {
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(font),
            size: size.max(1.0),
        })
    }

    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FontLoadError(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes, size)
            .map_err(|FontLoadError(msg)| FontLoadError(format!("{}: {msg}", path.display())))
    }

    /// Pixel size glyphs are rasterized at.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Same face at another pixel size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            size: size.max(1.0),
        }
    }

    fn layout(&self, text: &str) -> Layout<()> {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[self.inner.as_ref()], &TextStyle::new(text, self.size, 0));
        layout
    }

    fn extent(&self, layout: &Layout<()>) -> (u32, u32) {
        let glyphs = layout.glyphs();
        let line_height = self
            .inner
            .horizontal_line_metrics(self.size)
            .map(|m| m.new_line_size)
            .unwrap_or(self.size * 1.2);

        // Pen position after each glyph, so trailing spaces count.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = self.inner.metrics_indexed(g.key.glyph_index, self.size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(layout.height().max(line_height), f32::max);

        (w.ceil() as u32, h.ceil() as u32)
    }

    /// Renders `text` in `color` onto a transparent image sized to fit.
    ///
    /// Empty text yields a 0x0 image.
    pub fn rasterize(&self, text: &str, color: Color) -> RgbaImage {
        if text.is_empty() {
            return RgbaImage::new(0, 0);
        }

        let layout = self.layout(text);
        let (w, h) = self.extent(&layout);
        let mut out = RgbaImage::new(w, h);

        let [r, g, b, a] = color.to_srgb_u8();
        for glyph in layout.glyphs() {
            self.blit_glyph(&mut out, glyph, [r, g, b], a);
        }
        out
    }

    fn blit_glyph(&self, out: &mut RgbaImage, glyph: &GlyphPosition<()>, rgb: [u8; 3], alpha: u8) {
        if glyph.width == 0 || glyph.height == 0 {
            return;
        }
        let (metrics, coverage) = self.inner.rasterize_config(glyph.key);
        let ox = glyph.x.round() as i64;
        let oy = glyph.y.round() as i64;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let cov = coverage[row * metrics.width + col];
                if cov == 0 {
                    continue;
                }
                let x = ox + col as i64;
                let y = oy + row as i64;
                if x < 0 || y < 0 || x >= out.width() as i64 || y >= out.height() as i64 {
                    continue;
                }

                let a = ((cov as u16 * alpha as u16 + 127) / 255) as u8;
                let px = out.get_pixel_mut(x as u32, y as u32);
                // Overlapping glyph boxes keep the stronger coverage.
                if a > px[3] {
                    *px = Rgba([rgb[0], rgb[1], rgb[2], a]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONO_TTF: &[u8] =
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/DejaVuSansMono.ttf"));

    fn mono(size: f32) -> Font {
        Font::from_bytes(MONO_TTF, size).expect("fixture parses")
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(Font::from_bytes(b"not a font", 12.0).is_err());
        let err = Font::from_file("/definitely/missing.ttf", 12.0).unwrap_err();
        assert!(err.to_string().contains("missing.ttf"));
    }

    #[test]
    fn empty_text_rasterizes_to_nothing() {
        let img = mono(16.0).rasterize("", Color::WHITE);
        assert_eq!(img.dimensions(), (0, 0));
    }

    #[test]
    fn wider_text_makes_wider_images() {
        let font = mono(16.0);
        let one = font.rasterize("a", Color::WHITE);
        let four = font.rasterize("aaaa", Color::WHITE);
        assert!(one.width() > 0 && one.height() > 0);
        assert!(four.width() > one.width() * 3);
        assert_eq!(four.height(), one.height());
    }

    #[test]
    fn bigger_sizes_make_taller_images() {
        let small = mono(12.0);
        let big = small.with_size(36.0);
        assert_eq!(big.size(), 36.0);
        assert!(big.rasterize("Hg", Color::WHITE).height() > small.rasterize("Hg", Color::WHITE).height());
    }

    #[test]
    fn ink_takes_the_requested_color() {
        let img = mono(24.0).rasterize("M", Color::rgb(255, 0, 0));
        let inked: Vec<_> = img.pixels().filter(|p| p[3] > 0).collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|p| p[0] == 255 && p[1] == 0 && p[2] == 0));
    }
}
