pub mod easing;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod macros;
pub mod menu;
pub mod rotation;
pub mod slot;
pub mod toggle;
pub mod tween;

pub use easing::Easing;
pub use error::SetupError;
pub use geometry::{Point, Vec2};
pub use layout::{CENTER_SLOT, Layout, LayoutParams, SLOT_COUNT};
pub use menu::{LabelSink, MenuConfig, RadialMenu, Transition};
pub use rotation::Rotation;
pub use slot::{Slot, SlotLabel, SlotSpec, Variant};
pub use toggle::{PanelConfig, PanelState, ToggleController};
pub use tween::{Lerp, Progress, Tween};
