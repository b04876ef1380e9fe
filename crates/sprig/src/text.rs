use std::ops::{Deref, DerefMut};

use sprig_engine::paint::Color;
use sprig_engine::text::Font;

use crate::image::Image;
use crate::object::{Entity, Object};

/// A line of text rendered with a font.
///
/// Every setter re-renders the surface right away. Text does not collide
/// unless `collideable` is switched on.
#[derive(Debug)]
pub struct Text {
    object: Object,
    font: Font,
    text: String,
    color: Color,
}

impl Text {
    /// White text centered on `(x, y)`.
    pub fn new(x: f32, y: f32, font: Font, text: impl Into<String>) -> Self {
        Self::with_color(x, y, font, text, Color::WHITE)
    }

    pub fn with_color(x: f32, y: f32, font: Font, text: impl Into<String>, color: Color) -> Self {
        let mut this = Self {
            object: Object::new(x, y, false),
            font,
            text: text.into(),
            color,
        };
        this.render();
        this
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.render();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
        self.render();
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.render();
    }

    fn render(&mut self) {
        let pixels = self.font.rasterize(&self.text, self.color);
        self.object.set_surface(Image::from_rgba(pixels));
    }
}

impl Deref for Text {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.object
    }
}

impl DerefMut for Text {
    fn deref_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

impl Entity for Text {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

#[cfg(test)]
mod tests {
    use sprig_engine::coords::Vec2;
    use sprig_engine::scene::DrawList;

    use super::*;
    use crate::scene::Scene;

    const MONO_TTF: &[u8] =
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/DejaVuSansMono.ttf"));

    fn mono(size: f32) -> Font {
        Font::from_bytes(MONO_TTF, size).expect("fixture parses")
    }

    fn surface(text: &Text) -> Image {
        text.surface().cloned().expect("text always has a surface")
    }

    #[test]
    fn set_text_swaps_the_surface_and_resizes() {
        let mut label = Text::new(10.0, 10.0, mono(16.0), "hi");
        let before = surface(&label);
        let width = label.width();

        label.set_text("hello there");
        assert_ne!(surface(&label), before);
        assert!(label.width() > width);
        assert_eq!(label.text(), "hello there");
        assert_eq!(label.position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn set_font_rerenders_at_the_new_size() {
        let mut label = Text::new(0.0, 0.0, mono(12.0), "Score");
        let before = surface(&label);
        let height = label.height();

        label.set_font(mono(32.0));
        assert_ne!(surface(&label), before);
        assert!(label.height() > height);
        assert_eq!(label.font().size(), 32.0);
    }

    #[test]
    fn set_color_keeps_the_size() {
        let mut label = Text::new(0.0, 0.0, mono(16.0), "Score");
        let before = surface(&label);
        let size = (label.width(), label.height());

        label.set_color(Color::rgb(0, 255, 0));
        assert_ne!(surface(&label), before);
        assert_eq!((label.width(), label.height()), size);
        assert_eq!(label.color(), Color::rgb(0, 255, 0));
    }

    #[test]
    fn empty_text_is_never_drawn() {
        let label = Text::new(5.0, 5.0, mono(16.0), "");
        assert_eq!((label.width(), label.height()), (0.0, 0.0));
        assert!(label.draw_cmd().is_none());

        let mut scene = Scene::headless(100, 100);
        scene.add(label);
        let mut list = DrawList::new();
        scene.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn text_does_not_collide_by_default() {
        let label = Text::new(0.0, 0.0, mono(16.0), "x");
        assert!(!label.collideable);
    }
}
