use crate::geometry::Vec2;
use crate::menu::RadialMenu;
use crate::tween::{Lerp, Progress, Tween};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub duration: Duration,
    pub open_position: Vec2,
    pub open_size: Vec2,
    pub closed_position: Vec2,
    pub closed_size: Vec2,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(500),
            open_position: Vec2::new(100.0, 100.0),
            open_size: Vec2::new(200.0, 200.0),
            closed_position: Vec2::default(),
            closed_size: Vec2::new(100.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelState {
    pub position: Vec2,
    pub size: Vec2,
    pub opacity: f64,
}

pub struct ToggleController {
    menu: RadialMenu,
    config: PanelConfig,
    panel: PanelState,
    open: bool,
    in_flight: bool,
    position: Option<Tween<Vec2>>,
    size: Option<Tween<Vec2>>,
    fade: Option<Tween<f64>>,
}

impl ToggleController {
    pub fn new(menu: RadialMenu, config: PanelConfig) -> Self {
        let panel = PanelState {
            position: config.closed_position,
            size: config.closed_size,
            opacity: 0.0,
        };
        Self {
            menu,
            config,
            panel,
            open: false,
            in_flight: false,
            position: None,
            size: None,
            fade: None,
        }
    }

    pub fn menu(&self) -> &RadialMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut RadialMenu {
        &mut self.menu
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight
            || self.menu.is_animating()
            || self.position.is_some()
            || self.size.is_some()
            || self.fade.is_some()
    }

    /// Flips between open and closed. Returns false when the request was dropped.
    pub fn on_activate(&mut self) -> bool {
        if self.in_flight || self.menu.is_animating() {
            log::trace!("Ignoring activation while a transition is running");
            return false;
        }

        let open = !self.open;
        if !self.menu.set_open(open) {
            log::warn!("Menu refused to {}", if open { "open" } else { "close" });
            return false;
        }

        self.in_flight = true;
        self.open = open;

        let (position, size, fade) = if open {
            (self.config.open_position, self.config.open_size, (0.0, 1.0))
        } else {
            (self.config.closed_position, self.config.closed_size, (1.0, 0.0))
        };
        let duration = self.config.duration;

        self.position = Some(Tween::new(self.panel.position, position, duration));
        self.size = Some(
            Tween::new(self.panel.size, size, duration)
                .on_complete(move || log::debug!("Panel {} animation complete", state_name(open))),
        );
        self.fade = Some(Tween::new(fade.0, fade.1, duration));
        self.panel.opacity = fade.0;
        true
    }

    pub fn select_slot(&mut self, index: usize) -> bool {
        self.menu.select_slot(index)
    }

    pub fn tick(&mut self, dt: Duration) -> Progress {
        let menu = self.menu.tick(dt);
        let position = advance(&mut self.position, dt, &mut self.panel.position);
        let fade = advance(&mut self.fade, dt, &mut self.panel.opacity);

        let had_size = self.size.is_some();
        let size = advance(&mut self.size, dt, &mut self.panel.size);
        if had_size && size.is_complete() {
            self.in_flight = false;
        }

        menu.join(position).join(fade).join(size)
    }
}

fn state_name(open: bool) -> &'static str {
    if open { "open" } else { "close" }
}

fn advance<T: Lerp>(tween: &mut Option<Tween<T>>, dt: Duration, value: &mut T) -> Progress {
    let Some(active) = tween.as_mut() else {
        return Progress::Complete;
    };

    let progress = active.tick(dt);
    *value = active.value();
    if progress.is_complete() {
        *tween = None;
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SLOT_COUNT;
    use crate::menu::MenuConfig;
    use crate::slot::SlotSpec;

    const FRAME: Duration = Duration::from_millis(10);

    fn controller(panel_duration: Duration) -> ToggleController {
        let specs = (0..SLOT_COUNT).map(|i| Some(SlotSpec::new(format!("{i}"))));
        let menu = RadialMenu::new(MenuConfig::default(), specs).unwrap();
        let config = PanelConfig {
            duration: panel_duration,
            ..PanelConfig::default()
        };
        ToggleController::new(menu, config)
    }

    fn settle(toggle: &mut ToggleController) {
        let mut frames = 0;
        while toggle.tick(FRAME) == Progress::Running {
            frames += 1;
            assert!(frames < 1_000);
        }
    }

    #[test]
    fn test_starts_closed_and_hidden() {
        let toggle = controller(Duration::from_millis(500));
        let panel = toggle.panel();
        assert!(!toggle.is_open());
        assert!(!toggle.is_animating());
        assert_eq!(panel.position, Vec2::new(0.0, 0.0));
        assert_eq!(panel.size, Vec2::new(100.0, 100.0));
        assert_eq!(panel.opacity, 0.0);
    }

    #[test]
    fn test_open_and_close_cycle() {
        let mut toggle = controller(Duration::from_millis(500));

        assert!(toggle.on_activate());
        assert!(toggle.is_open());
        assert!(toggle.is_in_flight());
        assert!(toggle.menu().is_open());
        assert!(!toggle.on_activate(), "second activation is dropped");

        settle(&mut toggle);
        let panel = toggle.panel();
        assert!(!toggle.is_in_flight());
        assert!(!toggle.menu().is_animating());
        assert_eq!(panel.position, Vec2::new(100.0, 100.0));
        assert_eq!(panel.size, Vec2::new(200.0, 200.0));
        assert_eq!(panel.opacity, 1.0);

        assert!(toggle.on_activate());
        assert!(!toggle.menu().is_open());
        settle(&mut toggle);
        let panel = toggle.panel();
        assert!(!toggle.is_open());
        assert_eq!(panel.position, Vec2::new(0.0, 0.0));
        assert_eq!(panel.size, Vec2::new(100.0, 100.0));
        assert_eq!(panel.opacity, 0.0);
    }

    #[test]
    fn test_tweens_are_linear() {
        let mut toggle = controller(Duration::from_millis(500));
        toggle.on_activate();
        for _ in 0..25 {
            toggle.tick(FRAME);
        }
        let panel = toggle.panel();
        assert!((panel.position.x - 50.0).abs() < 1e-6);
        assert!((panel.size.y - 150.0).abs() < 1e-6);
        assert!((panel.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_panel_and_menu_finish_independently() {
        let mut toggle = controller(Duration::from_millis(100));
        toggle.on_activate();

        for _ in 0..10 {
            toggle.tick(FRAME);
        }
        assert!(!toggle.is_in_flight());
        assert_eq!(toggle.panel().opacity, 1.0);
        assert!(toggle.menu().is_animating());
        assert!(!toggle.on_activate(), "menu still rotating");

        settle(&mut toggle);
        assert!(toggle.on_activate());
        assert!(!toggle.is_open());
    }

    #[test]
    fn test_selection_forwarded_only_when_open() {
        let mut toggle = controller(Duration::from_millis(200));
        assert!(!toggle.select_slot(4));

        toggle.on_activate();
        assert!(!toggle.select_slot(4), "still opening");
        settle(&mut toggle);

        assert!(toggle.select_slot(4));
        assert!(!toggle.on_activate(), "menu is re-centring");
        settle(&mut toggle);
        assert_eq!(toggle.menu().selected(), 4);

        toggle.on_activate();
        settle(&mut toggle);
        assert_eq!(toggle.menu().last_open(), 4);
    }
}
