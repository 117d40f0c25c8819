use crate::{
    config::effect::EffectConfig,
    foundation::core::{Color, CompareKind, SortOrder, wide_channels},
};

/// Strict ordering over two pixels under one comparison policy.
///
/// Descending order flips the predicate itself rather than reversing sorted output, so ties
/// are resolved by the merge the same way in both orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Comparator {
    /// Which channel(s) form the key.
    pub kind: CompareKind,
    /// Predicate direction.
    pub order: SortOrder,
}

impl Comparator {
    /// Comparator described by an effect config.
    pub fn from_config(config: &EffectConfig) -> Self {
        Self {
            kind: config.compare,
            order: config.order,
        }
    }

    /// Sort key of one pixel at full (16-bit) precision.
    pub fn key(self, px: Color) -> u32 {
        let [r, g, b, _] = wide_channels(px);
        match self.kind {
            CompareKind::Mean => (r + g + b) / 3,
            CompareKind::Red => r,
        }
    }

    /// `true` when `a` must be placed before `b`.
    pub fn less(self, a: Color, b: Color) -> bool {
        let (ka, kb) = (self.key(a), self.key(b));
        match self.order {
            SortOrder::Ascending => ka < kb,
            SortOrder::Descending => ka > kb,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sort/compare.rs"]
mod tests;
