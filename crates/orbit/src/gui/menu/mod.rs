pub mod model;
pub mod view;

pub use model::{Frame, Hit, SlotArt, State};
pub use view::draw;

pub const REFERENCE_SIZE: f64 = 640.0;
pub const ICON_SIZE: i32 = 128;
pub const SLOT_RADIUS: f64 = 36.0; // slot bg circle size at scale 1
pub const ICON_FILL: f64 = 0.75; // share of the slot diameter an icon covers
pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const TOGGLE_CORNER_RADIUS: f64 = 16.0;
pub const BACKDROP_PADDING: f64 = 24.0; // beyond the open radius plus slot
