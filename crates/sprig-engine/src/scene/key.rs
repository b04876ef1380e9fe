use super::ZIndex;

/// Paint-order key for draw items.
///
/// The derived ordering compares `z` first (back-to-front), then `order`, so
/// items sharing a layer keep their insertion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}
