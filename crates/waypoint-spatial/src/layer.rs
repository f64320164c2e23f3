//! Collision layers and trigger filtering.
//!
//! Every collider lives on exactly one of 32 layers. Queries carry a
//! [`LayerMask`] selecting which layers count as solid, and a
//! [`TriggerPolicy`] deciding whether trigger volumes participate.

use std::ops::BitOr;

/// Number of distinct collision layers.
pub const LAYER_COUNT: u8 = 32;

/// A bit mask over the 32 collision layers.
///
/// # Example
///
/// ```
/// use waypoint_spatial::LayerMask;
///
/// let mask = LayerMask::layer(0) | LayerMask::layer(3);
/// assert!(mask.contains(0));
/// assert!(mask.contains(3));
/// assert!(!mask.contains(1));
///
/// assert!(LayerMask::ALL.contains(31));
/// assert!(!LayerMask::NONE.contains(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(u32);

impl LayerMask {
    /// Mask selecting every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask selecting no layer.
    pub const NONE: Self = Self(0);

    /// Creates a mask from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Creates a mask selecting a single layer.
    ///
    /// Layers at or above [`LAYER_COUNT`] produce an empty mask.
    #[must_use]
    pub const fn layer(layer: u8) -> Self {
        if layer < LAYER_COUNT {
            Self(1 << layer)
        } else {
            Self::NONE
        }
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if the mask selects `layer`.
    #[must_use]
    pub const fn contains(self, layer: u8) -> bool {
        layer < LAYER_COUNT && self.0 & (1 << layer) != 0
    }

    /// Returns a copy of this mask with `layer` added.
    #[must_use]
    pub const fn with_layer(self, layer: u8) -> Self {
        Self(self.0 | Self::layer(layer).0)
    }

    /// Returns a copy of this mask with `layer` removed.
    #[must_use]
    pub const fn without_layer(self, layer: u8) -> Self {
        Self(self.0 & !Self::layer(layer).0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Whether trigger volumes take part in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerPolicy {
    /// Trigger colliders are skipped.
    #[default]
    Ignore,
    /// Trigger colliders are reported like solid ones.
    Collide,
}

impl TriggerPolicy {
    /// Returns `true` if a collider with the given trigger flag passes this policy.
    #[must_use]
    pub const fn admits(self, is_trigger: bool) -> bool {
        match self {
            Self::Ignore => !is_trigger,
            Self::Collide => true,
        }
    }
}
