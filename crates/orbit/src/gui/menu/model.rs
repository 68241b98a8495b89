use crate::config::{Config, ConfigError, SlotConfig};
use crate::gui::menu::{ICON_SIZE, REFERENCE_SIZE, SLOT_RADIUS};
use gdk_pixbuf::Pixbuf;
use spindle::{
    LabelSink, Point, RadialMenu, SLOT_COUNT, Slot, ToggleController, Variant, Vec2,
};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Default)]
pub struct SlotArt {
    pub normal: Option<Pixbuf>,
    pub selected: Option<Pixbuf>,
}

impl SlotArt {
    pub fn from_config(cfg: &SlotConfig) -> Self {
        Self {
            normal: cfg.normal_icon.as_deref().and_then(Self::load_icon),
            selected: cfg.selected_icon.as_deref().and_then(Self::load_icon),
        }
    }

    fn load_icon(path: &Path) -> Option<Pixbuf> {
        Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true)
            .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
            .ok()
    }

    /// Falls back to the normal image when no selected image is configured.
    pub fn for_variant(&self, variant: Variant) -> Option<&Pixbuf> {
        match variant {
            Variant::Selected => self.selected.as_ref().or(self.normal.as_ref()),
            Variant::Normal => self.normal.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Toggle,
    Slot(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Running,
    Settled,
    Idle,
}

pub struct State {
    pub center: Point,
    pub scale_factor: f64,
    pub toggle: ToggleController,
    pub art: [SlotArt; SLOT_COUNT],
    pub hover_index: Option<usize>,
}

impl State {
    pub fn new(toggle: ToggleController, art: [SlotArt; SLOT_COUNT]) -> Self {
        Self {
            center: Point::new(REFERENCE_SIZE / 2.0, REFERENCE_SIZE / 2.0),
            scale_factor: 1.0,
            toggle,
            art,
            hover_index: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let placed = config.placed_slots();
        let menu = RadialMenu::new(
            config.menu_config()?,
            placed.map(|cfg| cfg.map(SlotConfig::spec)),
        )?;
        let toggle = ToggleController::new(menu, config.panel_config()?);
        let art = placed.map(|cfg| cfg.map(SlotArt::from_config).unwrap_or_default());
        Ok(Self::new(toggle, art))
    }

    pub fn reload(
        &mut self,
        config: &Config,
        sink: impl LabelSink + 'static,
    ) -> Result<(), ConfigError> {
        let mut fresh = Self::from_config(config)?;
        fresh.toggle.menu_mut().set_label_sink(sink);
        fresh.center = self.center;
        fresh.scale_factor = self.scale_factor;
        *self = fresh;
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.center = Point::new(width / 2.0, height / 2.0);
        self.scale_factor = width.min(height) / REFERENCE_SIZE;
    }

    /// Menu-local coordinates are y-up; the canvas is y-down.
    pub fn to_screen(&self, local: Point) -> Point {
        Point::new(
            self.center.x + local.x * self.scale_factor,
            self.center.y - local.y * self.scale_factor,
        )
    }

    pub fn slot_radius(&self, slot: &Slot) -> f64 {
        SLOT_RADIUS * slot.scale.x.max(slot.scale.y) * self.scale_factor
    }

    /// Screen rectangle of the toggle button as `(top_left, size)`.
    pub fn toggle_rect(&self) -> (Point, Vec2) {
        let panel = self.toggle.panel();
        let center = self.to_screen(panel.position);
        let size = panel.size * self.scale_factor;
        (Point::new(center.x - size.x / 2.0, center.y - size.y / 2.0), size)
    }

    /// Slots take priority over the toggle button where they overlap.
    pub fn hit_test(&self, cursor: Point) -> Option<Hit> {
        let slot = self
            .toggle
            .menu()
            .slots()
            .filter(|(_, slot)| {
                self.to_screen(slot.position).distance(cursor) <= self.slot_radius(slot)
            })
            .min_by(|(_, a), (_, b)| {
                let da = self.to_screen(a.position).distance(cursor);
                let db = self.to_screen(b.position).distance(cursor);
                da.total_cmp(&db)
            })
            .map(|(i, _)| Hit::Slot(i));

        slot.or_else(|| {
            let (origin, size) = self.toggle_rect();
            let inside = (origin.x..=origin.x + size.x).contains(&cursor.x)
                && (origin.y..=origin.y + size.y).contains(&cursor.y);
            inside.then_some(Hit::Toggle)
        })
    }

    /// Returns true when the hovered slot changed.
    pub fn update_cursor(&mut self, cursor: Point) -> bool {
        let new_idx = match self.hit_test(cursor) {
            Some(Hit::Slot(i)) if self.toggle.is_open() => Some(i),
            _ => None,
        };
        let changed = self.hover_index != new_idx;
        self.hover_index = new_idx;
        changed
    }

    pub fn advance(&mut self, dt: Duration) -> Frame {
        if !self.toggle.is_animating() {
            return Frame::Idle;
        }
        self.toggle.tick(dt);
        if self.toggle.is_animating() {
            Frame::Running
        } else {
            Frame::Settled
        }
    }

    pub fn click(&mut self, cursor: Point) -> bool {
        match self.hit_test(cursor) {
            Some(Hit::Slot(i)) if self.toggle.is_open() => self.toggle.select_slot(i),
            Some(Hit::Slot(_)) | None => false,
            Some(Hit::Toggle) => self.toggle.on_activate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State {
        State::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_local_to_screen_flips_y() {
        let mut state = state();
        state.resize(1280.0, 640.0);
        assert_eq!(state.center, Point::new(640.0, 320.0));
        assert_eq!(state.scale_factor, 1.0);
        assert_eq!(state.to_screen(Point::new(10.0, 20.0)), Point::new(650.0, 300.0));
    }

    #[test]
    fn test_hit_test_slots_and_toggle() {
        let state = state();

        // closed layout: slot 0 sits straight above the centre
        let top = state.to_screen(Point::new(0.0, 100.0));
        assert_eq!(state.hit_test(top), Some(Hit::Slot(0)));

        assert_eq!(state.hit_test(state.center), Some(Hit::Toggle));
        assert_eq!(state.hit_test(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_click_drives_controller() {
        let mut state = state();
        let top = state.to_screen(Point::new(0.0, 100.0));
        assert!(!state.click(top), "closed menu ignores slots");

        assert!(state.click(state.center));
        assert!(state.toggle.is_open());
        assert!(!state.click(state.center), "still animating");
    }

    #[test]
    fn test_hover_only_while_open() {
        let mut state = state();
        let top = state.to_screen(Point::new(0.0, 100.0));
        assert!(!state.update_cursor(top));
        assert_eq!(state.hover_index, None);
    }

    #[test]
    fn test_advance_settles_then_goes_idle() {
        let mut state = state();
        assert_eq!(state.advance(Duration::from_millis(16)), Frame::Idle);

        assert!(state.click(state.center));
        let mut frames = 0;
        let last = loop {
            match state.advance(Duration::from_millis(16)) {
                Frame::Running => frames += 1,
                other => break other,
            }
            assert!(frames < 1_000);
        };
        assert_eq!(last, Frame::Settled);
        assert!(!state.toggle.is_animating());
        assert_eq!(state.advance(Duration::from_millis(16)), Frame::Idle);
    }
}
