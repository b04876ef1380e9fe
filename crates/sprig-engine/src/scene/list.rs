use super::{SortKey, SpriteCmd, ZIndex};

/// A single draw item: sort key + sprite command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: SpriteCmd,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a sprite command on layer `z`.
    ///
    /// Commands with an empty texture are dropped here so renderers never see
    /// a zero-sized upload.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: SpriteCmd) {
        if cmd.texture.is_empty() {
            return;
        }

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Iterates items in paint order (back-to-front) without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;
    use crate::coords::Vec2;
    use crate::scene::Texture;

    fn cmd(w: u32) -> SpriteCmd {
        SpriteCmd::new(Texture::new(RgbaImage::new(w, 1)), Vec2::zero())
    }

    #[test]
    fn background_layer_paints_first() {
        let mut list = DrawList::new();
        list.push(ZIndex::OBJECTS, cmd(1));
        list.push(ZIndex::BACKGROUND, cmd(2));
        list.push(ZIndex::OBJECTS, cmd(3));

        let widths: Vec<f32> = list.iter_in_paint_order().map(|i| i.cmd.size.x).collect();
        assert_eq!(widths, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn empty_textures_are_skipped() {
        let mut list = DrawList::new();
        list.push(ZIndex::OBJECTS, cmd(0));
        assert!(list.is_empty());
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        list.push(ZIndex::OBJECTS, cmd(1));
        list.clear();
        list.push(ZIndex::OBJECTS, cmd(2));
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].key.order, 0);
    }
}
