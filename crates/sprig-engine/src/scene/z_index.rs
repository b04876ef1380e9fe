/// Z-ordering key for draw items.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Layer for full-screen backgrounds; painted before everything else.
    pub const BACKGROUND: ZIndex = ZIndex(i32::MIN);

    /// Layer scene objects are pushed onto, in their own paint order.
    pub const OBJECTS: ZIndex = ZIndex(0);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}
