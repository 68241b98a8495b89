use crate::geometry::{Point, Vec2};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SlotLabel(String);

crate::impl_text_newtype!(SlotLabel);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Normal,
    Selected,
}

impl Variant {
    pub fn from_selected(selected: bool) -> Self {
        if selected { Self::Selected } else { Self::Normal }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
    pub label: SlotLabel,
    /// Scale the slot had before any multiplier is applied.
    pub base_scale: Vec2,
}

impl SlotSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: SlotLabel::new(label),
            base_scale: Vec2::ONE,
        }
    }

    pub fn with_base_scale(mut self, scale: Vec2) -> Self {
        self.base_scale = scale;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub label: SlotLabel,
    pub base_scale: Vec2,
    pub position: Point,
    pub scale: Vec2,
    pub angle: f64,
    pub variant: Variant,
}

impl Slot {
    pub fn from_spec(spec: SlotSpec) -> Self {
        Self {
            label: spec.label,
            base_scale: spec.base_scale,
            position: Point::default(),
            scale: spec.base_scale,
            angle: 0.0,
            variant: Variant::Normal,
        }
    }
}
